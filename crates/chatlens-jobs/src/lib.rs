pub mod client;
pub mod error;
pub mod poller;

pub use client::{HttpJobsClient, JobsApi, MonitorStarted};
pub use error::{Error, Result};
pub use poller::{JobPoller, PollEvent, PollerConfig};
