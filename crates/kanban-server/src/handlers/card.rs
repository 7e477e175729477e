//! Card mutations. Each request loads the whole document, applies one
//! command and writes the whole document back.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{KanbanOperations, MoveAck, MoveCardRequest};

use crate::context::BoardContext;
use crate::error::ApiResult;
use crate::forms::{CreateCardForm, EditCardForm};
use crate::state::SharedState;

pub const DASHBOARD_PATH: &str = "/dashboard";

pub async fn create(
    State(state): State<SharedState>,
    Form(form): Form<CreateCardForm>,
) -> ApiResult<Redirect> {
    let fields = form.new_card()?;

    let _guard = state.write_guard().await;
    let mut ctx = BoardContext::load(state.store.clone()).await?;

    let created = form.target().and_then(|at| ctx.create_card(at, fields));
    let created = settle(&state, created)?;

    let report = ctx.save().await?;
    if let Some(card) = created {
        tracing::info!(
            "Created card {} '{}' ({} bytes written)",
            card.id,
            card.title,
            report.bytes_written
        );
    }
    Ok(Redirect::to(DASHBOARD_PATH))
}

pub async fn edit(
    State(state): State<SharedState>,
    Form(form): Form<EditCardForm>,
) -> ApiResult<Redirect> {
    let edit = form.edit()?;

    let _guard = state.write_guard().await;
    let mut ctx = BoardContext::load(state.store.clone()).await?;

    let edited = form
        .target()
        .and_then(|(at, card_id)| ctx.edit_card(at, card_id, edit));
    let edited = settle(&state, edited)?;

    let report = ctx.save().await?;
    if let Some(card) = edited {
        tracing::info!("Edited card {} ({} bytes written)", card.id, report.bytes_written);
    }
    Ok(Redirect::to(DASHBOARD_PATH))
}

/// Lookup failures go through the missing-target policy, which yields `None`
/// when it swallows them; anything else is returned as-is.
fn settle<T>(state: &SharedState, outcome: KanbanResult<T>) -> KanbanResult<Option<T>> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => state.absorb_missing_target(err).map(|()| None),
        Err(err) => Err(err),
    }
}

fn rejected(reason: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(MoveAck::failure(reason))).into_response()
}

pub async fn move_card(
    State(state): State<SharedState>,
    payload: Result<Json<MoveCardRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return Ok(rejected(rejection.body_text())),
    };
    let mv = match request.resolve() {
        Ok(mv) => mv,
        Err(err) => return Ok(rejected(err.to_string())),
    };

    let _guard = state.write_guard().await;
    let mut ctx = BoardContext::load(state.store.clone()).await?;

    match ctx.move_card(mv) {
        Ok(()) => {
            let report = ctx.save().await?;
            tracing::info!(
                "Moved card {} from list {} to list {} ({} bytes written)",
                mv.card_id,
                mv.from.list_id,
                mv.to.list_id,
                report.bytes_written
            );
            Ok(Json(MoveAck::success()).into_response())
        }
        Err(KanbanError::NotFound(reason)) => {
            tracing::debug!("Move of card {} refused: {}", mv.card_id, reason);
            Ok(rejected(reason))
        }
        Err(err) => Err(err.into()),
    }
}
