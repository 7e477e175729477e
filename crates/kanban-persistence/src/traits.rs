use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kanban_core::{KanbanResult, WriteMode};
use kanban_domain::Document;
use std::path::Path;

/// What a save actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub bytes_written: usize,
    pub write_mode: WriteMode,
    pub saved_at: DateTime<Utc>,
}

/// Whole-document storage. Every load reads the full tree and every save
/// rewrites it; there is no partial update and no locking at this level.
#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Read and parse the entire document
    async fn load(&self) -> KanbanResult<Document>;

    /// Serialize the entire document, replacing whatever is stored
    async fn save(&self, document: &Document) -> KanbanResult<SaveReport>;

    /// Check if the backing file exists
    async fn exists(&self) -> bool;

    /// Get the path to the backing file
    fn path(&self) -> &Path;
}

/// Trait for serialization/deserialization strategies
pub trait Serializer<T: Send + Sync>: Send + Sync {
    /// Serialize data to bytes
    fn serialize(&self, data: &T) -> KanbanResult<Vec<u8>>;

    /// Deserialize data from bytes
    fn deserialize(&self, bytes: &[u8]) -> KanbanResult<T>;
}
