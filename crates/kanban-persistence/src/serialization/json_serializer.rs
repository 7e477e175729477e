use crate::traits::Serializer;
use kanban_core::{KanbanError, KanbanResult};

/// Pretty-printed JSON (two-space indent), the on-disk format of the board
/// document.
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> KanbanResult<Vec<u8>> {
        let json = serde_json::to_vec_pretty(data)
            .map_err(|e| KanbanError::Serialization(e.to_string()))?;
        Ok(json)
    }

    fn deserialize(&self, bytes: &[u8]) -> KanbanResult<T> {
        let data = serde_json::from_slice(bytes)
            .map_err(|e| KanbanError::Serialization(e.to_string()))?;
        Ok(data)
    }
}
