pub mod chat;
pub mod domain;
pub mod insight;
pub mod job;

pub use chat::*;
pub use domain::*;
pub use insight::*;
pub use job::*;
