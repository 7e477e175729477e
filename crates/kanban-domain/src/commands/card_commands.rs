use super::{Command, CommandContext};
use crate::{Card, CardEdit, CardId, CardMove, ListRef, NewCard};
use chrono::NaiveDate;
use kanban_core::{KanbanError, KanbanResult};

fn list_not_found(at: ListRef) -> KanbanError {
    KanbanError::NotFound(format!("List {} on board {}", at.list_id, at.board_id))
}

/// Append a new card to a list. The id is allocated from the whole document.
pub struct CreateCard {
    pub at: ListRef,
    pub fields: NewCard,
    pub created_on: NaiveDate,
}

impl Command for CreateCard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        let id = context.document.next_card_id();
        let list = context
            .document
            .list_mut(self.at)
            .ok_or_else(|| list_not_found(self.at))?;
        let id = id.ok_or_else(|| {
            KanbanError::Validation(format!("No card id left after {}", CardId::MAX))
        })?;
        list.cards.push(Card::new(id, self.fields.clone(), self.created_on));
        Ok(())
    }

    fn description(&self) -> String {
        format!("Create card: '{}'", self.fields.title.trim())
    }
}

/// Overwrite a card's fields in place. Board and list only scope the lookup.
pub struct EditCard {
    pub at: ListRef,
    pub card_id: CardId,
    pub edit: CardEdit,
}

impl Command for EditCard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        let list = context
            .document
            .list_mut(self.at)
            .ok_or_else(|| list_not_found(self.at))?;
        let card = list
            .card_mut(self.card_id)
            .ok_or_else(|| KanbanError::NotFound(format!("Card {}", self.card_id)))?;
        card.apply_edit(self.edit.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Edit card {}", self.card_id)
    }
}

/// Move a card to the end of another list, possibly on another board.
pub struct MoveCard {
    pub mv: CardMove,
}

impl Command for MoveCard {
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()> {
        context
            .document
            .move_card(&self.mv)
            .map_err(|e| KanbanError::NotFound(e.to_string()))
    }

    fn description(&self) -> String {
        format!(
            "Move card {} from list {} to list {}",
            self.mv.card_id, self.mv.from.list_id, self.mv.to.list_id
        )
    }
}
