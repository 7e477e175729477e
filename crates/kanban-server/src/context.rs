use std::sync::Arc;

use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::commands::{Command, CommandContext, CreateCard, EditCard, MoveCard};
use kanban_domain::{Card, CardEdit, CardId, CardMove, Document, KanbanOperations, ListRef, NewCard};
use kanban_persistence::{PersistenceStore, SaveReport};

/// One request's view of the board: the whole document loaded from the
/// store, mutated through domain commands, then written back in full.
pub struct BoardContext {
    pub document: Document,
    store: Arc<dyn PersistenceStore>,
}

impl BoardContext {
    pub async fn load(store: Arc<dyn PersistenceStore>) -> KanbanResult<Self> {
        let document = store.load().await?;
        Ok(Self { document, store })
    }

    pub fn execute(&mut self, command: Box<dyn Command>) -> KanbanResult<()> {
        tracing::debug!("Executing: {}", command.description());
        let mut ctx = CommandContext::new(&mut self.document);
        command.execute(&mut ctx)
    }

    pub async fn save(&self) -> KanbanResult<SaveReport> {
        self.store.save(&self.document).await
    }

    fn card_at(&self, at: ListRef, card_id: CardId) -> KanbanResult<Card> {
        self.document
            .list(at)
            .and_then(|list| list.card(card_id))
            .cloned()
            .ok_or_else(|| KanbanError::Internal(format!("Card {} vanished after write", card_id)))
    }
}

impl KanbanOperations for BoardContext {
    fn document(&self) -> &Document {
        &self.document
    }

    fn create_card(&mut self, at: ListRef, fields: NewCard) -> KanbanResult<Card> {
        self.execute(Box::new(CreateCard {
            at,
            fields,
            created_on: chrono::Utc::now().date_naive(),
        }))?;
        self.document
            .list(at)
            .and_then(|list| list.cards.last())
            .cloned()
            .ok_or_else(|| KanbanError::Internal("Created card vanished after write".into()))
    }

    fn edit_card(&mut self, at: ListRef, card_id: CardId, edit: CardEdit) -> KanbanResult<Card> {
        self.execute(Box::new(EditCard { at, card_id, edit }))?;
        self.card_at(at, card_id)
    }

    fn move_card(&mut self, mv: CardMove) -> KanbanResult<()> {
        self.execute(Box::new(MoveCard { mv }))
    }
}
