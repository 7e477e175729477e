use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field_update::FieldUpdate;
use crate::ids::CardId;

pub const DEFAULT_PRIORITY: &str = "Task";
pub const DEFAULT_TAG: &str = "TASK";
pub const DEFAULT_STATUS: &str = "Backlog";

/// Format used for every date stored on a card.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// A task card. Field names on disk follow the stored document
/// (`prioridad`, `estado`, `fecha_*`, `autor`, `responsable`); dates are
/// `YYYY-MM-DD` strings where the empty string means "no date".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "prioridad", default = "default_priority")]
    pub priority: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(rename = "estado", default = "default_status")]
    pub status: String,
    #[serde(rename = "fecha_creacion", default)]
    pub created_on: String,
    #[serde(rename = "fecha_inicio", default)]
    pub start_date: String,
    #[serde(rename = "fecha_fin", default)]
    pub end_date: String,
    #[serde(rename = "autor", default)]
    pub author: String,
    #[serde(rename = "responsable", default)]
    pub assignee: String,
    /// Keys this model does not know about, kept so a save never drops them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields submitted when creating a card. Only the title is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCard {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub tag: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub author: Option<String>,
    pub assignee: Option<String>,
}

impl NewCard {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Fields submitted when editing a card.
///
/// The fallback rules differ per field:
/// - `title` always replaces the current value.
/// - `description`, `author`, `assignee` always replace it; absent means empty.
/// - `priority`, `tag`, `status` keep the current value when absent or blank.
/// - dates keep the current value only on [`FieldUpdate::NoChange`]; an
///   explicitly submitted empty value arrives as [`FieldUpdate::Clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardEdit {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub tag: Option<String>,
    pub status: Option<String>,
    pub start_date: FieldUpdate<String>,
    pub end_date: FieldUpdate<String>,
    pub author: Option<String>,
    pub assignee: Option<String>,
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Card {
    pub fn new(id: CardId, fields: NewCard, created_on: NaiveDate) -> Self {
        Self {
            id,
            title: fields.title.trim().to_string(),
            description: trimmed(fields.description.as_deref()),
            priority: non_blank(fields.priority.as_deref()).unwrap_or_else(default_priority),
            tag: non_blank(fields.tag.as_deref()).unwrap_or_else(default_tag),
            status: non_blank(fields.status.as_deref()).unwrap_or_else(default_status),
            created_on: created_on.format(DATE_FORMAT).to_string(),
            start_date: trimmed(fields.start_date.as_deref()),
            end_date: trimmed(fields.end_date.as_deref()),
            author: trimmed(fields.author.as_deref()),
            assignee: trimmed(fields.assignee.as_deref()),
            extra: Map::new(),
        }
    }

    pub fn apply_edit(&mut self, edit: CardEdit) {
        self.title = edit.title.trim().to_string();
        self.description = trimmed(edit.description.as_deref());
        if let Some(priority) = non_blank(edit.priority.as_deref()) {
            self.priority = priority;
        }
        if let Some(tag) = non_blank(edit.tag.as_deref()) {
            self.tag = tag;
        }
        if let Some(status) = non_blank(edit.status.as_deref()) {
            self.status = status;
        }
        edit.start_date.apply_to_text(&mut self.start_date);
        edit.end_date.apply_to_text(&mut self.end_date);
        self.author = trimmed(edit.author.as_deref());
        self.assignee = trimmed(edit.assignee.as_deref());
    }
}
