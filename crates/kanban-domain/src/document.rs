use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::board::Board;
use crate::card::Card;
use crate::ids::{BoardId, CardId, ListId, ListRef};
use crate::list::List;
use crate::moves::{CardMove, MoveError};

/// The whole persisted tree: boards → lists → cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub boards: Vec<Board>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A broken uniqueness invariant found in a loaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    DuplicateBoardId { board_id: BoardId },
    DuplicateListId { board_id: BoardId, list_id: ListId },
    DuplicateCardId { card_id: CardId },
}

impl Document {
    pub fn new(boards: Vec<Board>) -> Self {
        Self {
            boards,
            extra: Map::new(),
        }
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn board_mut(&mut self, id: BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| b.id == id)
    }

    pub fn list(&self, at: ListRef) -> Option<&List> {
        self.board(at.board_id)?.list(at.list_id)
    }

    pub fn list_mut(&mut self, at: ListRef) -> Option<&mut List> {
        self.board_mut(at.board_id)?.list_mut(at.list_id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.boards
            .iter()
            .flat_map(|b| b.lists.iter())
            .flat_map(|l| l.cards.iter())
    }

    pub fn card_count(&self) -> usize {
        self.boards.iter().map(Board::card_count).sum()
    }

    pub fn list_count(&self) -> usize {
        self.boards.iter().map(|b| b.lists.len()).sum()
    }

    pub fn max_card_id(&self) -> CardId {
        self.cards().map(|c| c.id).fold(0, CardId::max)
    }

    /// Next id for a new card: one past the largest id anywhere in the
    /// document, regardless of board or list. `None` once `CardId::MAX` is
    /// taken.
    pub fn next_card_id(&self) -> Option<CardId> {
        self.max_card_id().checked_add(1)
    }

    /// Remove the card from the source list and append it to the target.
    ///
    /// Both boards are resolved first, then both lists, then the card inside
    /// the source list. On any failure the document is untouched.
    pub fn move_card(&mut self, mv: &CardMove) -> Result<(), MoveError> {
        let board_index = |id: BoardId| self.boards.iter().position(|b| b.id == id);
        let (Some(from_board), Some(to_board)) =
            (board_index(mv.from.board_id), board_index(mv.to.board_id))
        else {
            return Err(MoveError::BoardNotFound);
        };

        let list_index = |board: usize, id: ListId| {
            self.boards[board].lists.iter().position(|l| l.id == id)
        };
        let (Some(from_list), Some(to_list)) = (
            list_index(from_board, mv.from.list_id),
            list_index(to_board, mv.to.list_id),
        ) else {
            return Err(MoveError::ListNotFound);
        };

        let position = self.boards[from_board].lists[from_list]
            .card_position(mv.card_id)
            .ok_or(MoveError::CardNotFound)?;

        let card = self.boards[from_board].lists[from_list]
            .cards
            .remove(position);
        self.boards[to_board].lists[to_list].cards.push(card);
        Ok(())
    }

    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut board_ids = HashSet::new();
        let mut card_ids = HashSet::new();

        for board in &self.boards {
            if !board_ids.insert(board.id) {
                violations.push(Violation::DuplicateBoardId { board_id: board.id });
            }
            let mut list_ids = HashSet::new();
            for list in &board.lists {
                if !list_ids.insert(list.id) {
                    violations.push(Violation::DuplicateListId {
                        board_id: board.id,
                        list_id: list.id,
                    });
                }
                for card in &list.cards {
                    if !card_ids.insert(card.id) {
                        violations.push(Violation::DuplicateCardId { card_id: card.id });
                    }
                }
            }
        }
        violations
    }

    /// Small starter document used by `init`.
    pub fn seed() -> Self {
        Self::new(vec![Board::new(1, "My board")
            .with_list(List::new(1, "To do"))
            .with_list(List::new(2, "In progress"))
            .with_list(List::new(3, "Done"))])
    }
}
