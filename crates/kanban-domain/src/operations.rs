use crate::{Card, CardEdit, CardId, CardMove, Document, ListRef, NewCard};
use kanban_core::KanbanResult;

/// The operations every front end over a board document offers.
/// Lookup failures come back as `KanbanError::NotFound`; whether that is
/// surfaced to the caller is up to the implementation's policy.
pub trait KanbanOperations {
    fn document(&self) -> &Document;

    fn create_card(&mut self, at: ListRef, fields: NewCard) -> KanbanResult<Card>;

    fn edit_card(&mut self, at: ListRef, card_id: CardId, edit: CardEdit) -> KanbanResult<Card>;

    fn move_card(&mut self, mv: CardMove) -> KanbanResult<()>;
}
