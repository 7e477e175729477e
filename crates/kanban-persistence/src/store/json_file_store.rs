use crate::serialization::JsonSerializer;
use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{PersistenceStore, SaveReport, Serializer};
use kanban_core::{KanbanResult, WriteMode};
use kanban_domain::Document;
use std::path::{Path, PathBuf};

/// JSON file-based persistence store
/// The file holds the bare document (`{"boards": [...]}`) with no envelope
/// or version field.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_mode: WriteMode,
}

impl JsonFileStore {
    /// Create a store that rewrites the file in place
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_write_mode(path, WriteMode::Overwrite)
    }

    pub fn with_write_mode(path: impl AsRef<Path>, write_mode: WriteMode) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_mode,
        }
    }
}

#[async_trait::async_trait]
impl PersistenceStore for JsonFileStore {
    async fn load(&self) -> KanbanResult<Document> {
        let bytes = AtomicWriter::read_all(&self.path).await?;
        let document: Document = JsonSerializer.deserialize(&bytes)?;

        tracing::debug!(
            "Loaded {} bytes ({} boards, {} cards) from {}",
            bytes.len(),
            document.boards.len(),
            document.card_count(),
            self.path.display()
        );

        Ok(document)
    }

    async fn save(&self, document: &Document) -> KanbanResult<SaveReport> {
        let bytes = JsonSerializer.serialize(document)?;

        match self.write_mode {
            WriteMode::Overwrite => AtomicWriter::write_in_place(&self.path, &bytes).await?,
            WriteMode::Atomic => AtomicWriter::write_atomic(&self.path, &bytes).await?,
        }

        tracing::info!("Saved {} bytes to {}", bytes.len(), self.path.display());

        Ok(SaveReport {
            bytes_written: bytes.len(),
            write_mode: self.write_mode,
            saved_at: chrono::Utc::now(),
        })
    }

    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_core::KanbanError;
    use kanban_domain::{Board, Card, List, NewCard};
    use serde_json::json;
    use tempfile::tempdir;

    fn sample() -> Document {
        let mut todo = List::new(10, "Todo");
        todo.cards.push(Card::new(
            5,
            NewCard::titled("Card"),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        ));
        Document::new(vec![Board::new(1, "Main")
            .with_list(todo)
            .with_list(List::new(20, "Done"))])
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("data.json");
        let store = JsonFileStore::new(&file_path);
        let doc = sample();

        let report = store.save(&doc).await.unwrap();
        assert_eq!(report.write_mode, WriteMode::Overwrite);
        assert!(report.bytes_written > 0);
        assert!(file_path.exists());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, doc);
    }

    #[tokio::test]
    async fn test_atomic_mode_round_trip() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::with_write_mode(dir.path().join("data.json"), WriteMode::Atomic);
        let doc = sample();

        store.save(&doc).await.unwrap();
        store.save(&doc).await.unwrap();

        assert_eq!(store.load().await.unwrap(), doc);
    }

    #[tokio::test]
    async fn test_file_has_no_envelope() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("data.json");
        let store = JsonFileStore::new(&file_path);
        store.save(&sample()).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&file_path).unwrap()).unwrap();
        let keys: Vec<_> = raw.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["boards".to_string()]);
        assert_eq!(raw["boards"][0]["lists"][0]["cards"][0]["prioridad"], "Task");
    }

    #[tokio::test]
    async fn test_unknown_keys_survive_save() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("data.json");
        std::fs::write(
            &file_path,
            serde_json::to_vec(&json!({
                "boards": [{ "id": 1, "name": "B", "color": "teal", "lists": [] }],
                "theme": "dark"
            }))
            .unwrap(),
        )
        .unwrap();

        let store = JsonFileStore::new(&file_path);
        let doc = store.load().await.unwrap();
        store.save(&doc).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&file_path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["boards"][0]["color"], "teal");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nonexistent.json"));

        assert!(!store.exists().await);
        assert!(matches!(store.load().await, Err(KanbanError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("data.json");
        std::fs::write(&file_path, b"{\"boards\": [").unwrap();

        let store = JsonFileStore::new(&file_path);
        assert!(store.exists().await);
        assert!(matches!(
            store.load().await,
            Err(KanbanError::Serialization(_))
        ));
    }
}
