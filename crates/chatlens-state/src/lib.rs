pub mod error;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
pub use storage::{FsStorage, MemoryStorage, Storage};
pub use store::{ContextSnapshot, ContextStore};
