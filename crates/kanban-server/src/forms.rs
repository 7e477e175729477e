//! Submitted card forms.
//!
//! Every field is optional on the wire. Ids stay as text until a lookup
//! needs them, so an unreadable id behaves like one that matches nothing.

use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{parse_id, CardEdit, CardId, FieldUpdate, ListRef, NewCard};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardFields {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "prioridad")]
    pub priority: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "estado")]
    pub status: Option<String>,
    #[serde(rename = "fecha_inicio")]
    pub start_date: Option<String>,
    #[serde(rename = "fecha_fin")]
    pub end_date: Option<String>,
    #[serde(rename = "autor")]
    pub author: Option<String>,
    #[serde(rename = "responsable")]
    pub assignee: Option<String>,
}

impl CardFields {
    fn required_title(&self) -> KanbanResult<String> {
        self.title
            .clone()
            .ok_or_else(|| KanbanError::Validation("title is required".to_string()))
    }
}

fn target(board_id: Option<&str>, list_id: Option<&str>) -> KanbanResult<ListRef> {
    let board = board_id.and_then(parse_id);
    let list = list_id.and_then(parse_id);
    match (board, list) {
        (Some(board), Some(list)) => Ok(ListRef::new(board, list)),
        _ => Err(KanbanError::NotFound(format!(
            "List {} on board {}",
            list_id.unwrap_or_default(),
            board_id.unwrap_or_default()
        ))),
    }
}

/// Body of `POST /nueva-tarjeta`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCardForm {
    #[serde(rename = "boardId")]
    pub board_id: Option<String>,
    #[serde(rename = "listId")]
    pub list_id: Option<String>,
    #[serde(flatten)]
    pub fields: CardFields,
}

impl CreateCardForm {
    pub fn new_card(&self) -> KanbanResult<NewCard> {
        let fields = &self.fields;
        Ok(NewCard {
            title: fields.required_title()?,
            description: fields.description.clone(),
            priority: fields.priority.clone(),
            tag: fields.tag.clone(),
            status: fields.status.clone(),
            start_date: fields.start_date.clone(),
            end_date: fields.end_date.clone(),
            author: fields.author.clone(),
            assignee: fields.assignee.clone(),
        })
    }

    pub fn target(&self) -> KanbanResult<ListRef> {
        target(self.board_id.as_deref(), self.list_id.as_deref())
    }
}

/// Body of `POST /editar-tarjeta`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditCardForm {
    #[serde(rename = "cardId")]
    pub card_id: Option<String>,
    #[serde(rename = "boardId")]
    pub board_id: Option<String>,
    #[serde(rename = "listId")]
    pub list_id: Option<String>,
    #[serde(flatten)]
    pub fields: CardFields,
}

impl EditCardForm {
    pub fn edit(&self) -> KanbanResult<CardEdit> {
        let fields = &self.fields;
        Ok(CardEdit {
            title: fields.required_title()?,
            description: fields.description.clone(),
            priority: fields.priority.clone(),
            tag: fields.tag.clone(),
            status: fields.status.clone(),
            start_date: FieldUpdate::from_submitted(fields.start_date.clone()),
            end_date: FieldUpdate::from_submitted(fields.end_date.clone()),
            author: fields.author.clone(),
            assignee: fields.assignee.clone(),
        })
    }

    pub fn target(&self) -> KanbanResult<(ListRef, CardId)> {
        let at = target(self.board_id.as_deref(), self.list_id.as_deref())?;
        let card_id = self
            .card_id
            .as_deref()
            .and_then(parse_id)
            .ok_or_else(|| {
                KanbanError::NotFound(format!("Card {}", self.card_id.as_deref().unwrap_or_default()))
            })?;
        Ok((at, card_id))
    }
}
