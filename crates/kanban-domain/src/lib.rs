pub mod board;
pub mod card;
pub mod commands;
pub mod document;
pub mod field_update;
pub mod ids;
pub mod list;
pub mod moves;
pub mod operations;

pub use board::Board;
pub use card::{Card, CardEdit, NewCard, DEFAULT_PRIORITY, DEFAULT_STATUS, DEFAULT_TAG};
pub use document::{Document, Violation};
pub use field_update::FieldUpdate;
pub use ids::{parse_id, BoardId, CardId, ListId, ListRef};
pub use list::List;
pub use moves::{CardMove, MoveAck, MoveCardRequest, MoveError};
pub use operations::KanbanOperations;
