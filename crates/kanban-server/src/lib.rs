//! KanbanPro web server: renders the dashboard and applies card
//! mutations against a JSON document on disk.

pub mod context;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod router;
pub mod state;
pub mod views;

pub use context::BoardContext;
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::{AppState, SharedState};
pub use views::layout::{board_script_file, BOARD_SCRIPT};
