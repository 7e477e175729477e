use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::{card, pages};
use crate::state::SharedState;

/// Build the application router. Files under `public_dir` are served as the
/// fallback for every path no route claims.
pub fn build_router(state: SharedState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/register", get(pages::register))
        .route("/login", get(pages::login))
        .route("/dashboard", get(pages::dashboard))
        .route("/nueva-tarjeta", post(card::create))
        .route("/editar-tarjeta", post(card::edit))
        .route("/mover-tarjeta", post(card::move_card))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
