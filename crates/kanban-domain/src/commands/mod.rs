use kanban_core::KanbanResult;

pub mod card_commands;

pub use card_commands::*;

/// Trait for domain commands that mutate state
/// Commands represent intent and can be executed against a loaded document
pub trait Command: Send + Sync {
    /// Execute this command, mutating the document
    fn execute(&self, context: &mut CommandContext) -> KanbanResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation
pub struct CommandContext<'a> {
    pub document: &'a mut crate::Document,
}

impl<'a> CommandContext<'a> {
    pub fn new(document: &'a mut crate::Document) -> Self {
        Self { document }
    }
}
