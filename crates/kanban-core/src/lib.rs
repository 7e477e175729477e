pub mod config;
pub mod error;
pub mod result;

pub use config::{AppConfig, BehaviorSettings, MissingTargetPolicy, ServerSettings, StorageSettings, WriteMode};
pub use error::KanbanError;
pub use result::KanbanResult;
