use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{deserialize_lenient_id, BoardId, CardId, ListId, ListRef};

/// Why an authoritative move was refused. Nothing is mutated in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Board not found")]
    BoardNotFound,
    #[error("List not found")]
    ListNotFound,
    #[error("Card not found")]
    CardNotFound,
}

/// Relocation of one card out of its source list and onto the end of the
/// target list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMove {
    pub card_id: CardId,
    pub from: ListRef,
    pub to: ListRef,
}

impl CardMove {
    pub fn new(card_id: CardId, from: ListRef, to: ListRef) -> Self {
        Self { card_id, from, to }
    }
}

/// Body of the move endpoint. Ids may be numbers or numeric strings; ids
/// that cannot be read resolve to the matching not-found error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardRequest {
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub card_id: Option<CardId>,
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub from_board_id: Option<BoardId>,
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub from_list_id: Option<ListId>,
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub to_board_id: Option<BoardId>,
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub to_list_id: Option<ListId>,
}

impl MoveCardRequest {
    /// Check order matches the document lookup: boards, then lists, then card.
    pub fn resolve(&self) -> Result<CardMove, MoveError> {
        let (Some(from_board), Some(to_board)) = (self.from_board_id, self.to_board_id) else {
            return Err(MoveError::BoardNotFound);
        };
        let (Some(from_list), Some(to_list)) = (self.from_list_id, self.to_list_id) else {
            return Err(MoveError::ListNotFound);
        };
        let card_id = self.card_id.ok_or(MoveError::CardNotFound)?;
        Ok(CardMove::new(
            card_id,
            ListRef::new(from_board, from_list),
            ListRef::new(to_board, to_list),
        ))
    }
}

impl From<CardMove> for MoveCardRequest {
    fn from(mv: CardMove) -> Self {
        Self {
            card_id: Some(mv.card_id),
            from_board_id: Some(mv.from.board_id),
            from_list_id: Some(mv.from.list_id),
            to_board_id: Some(mv.to.board_id),
            to_list_id: Some(mv.to.list_id),
        }
    }
}

/// Minimal acknowledgement returned by the move endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAck {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MoveAck {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }
}

impl From<MoveError> for MoveAck {
    fn from(err: MoveError) -> Self {
        Self::failure(err.to_string())
    }
}
