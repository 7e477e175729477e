use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::{BoardId, ListId};
use crate::list::List;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lists: Vec<List>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Board {
    pub fn new(id: BoardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lists: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_list(mut self, list: List) -> Self {
        self.lists.push(list);
        self
    }

    pub fn list(&self, id: ListId) -> Option<&List> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn list_mut(&mut self, id: ListId) -> Option<&mut List> {
        self.lists.iter_mut().find(|l| l.id == id)
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(List::len).sum()
    }
}
