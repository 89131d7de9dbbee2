pub mod config;
pub mod error;
pub mod insights;
pub mod scanner;
pub mod updates;

pub use config::{ApiConfig, Config, StorageConfig};
pub use error::{Error, Result};
pub use insights::InsightFeed;
pub use scanner::{MessageScanner, ScanReport};
pub use updates::{ContextUpdates, extract_context_updates};
