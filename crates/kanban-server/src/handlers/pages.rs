use axum::{extract::State, response::Html};

use crate::context::BoardContext;
use crate::error::ApiResult;
use crate::state::SharedState;
use crate::views;

pub async fn home() -> Html<String> {
    Html(views::pages::home())
}

pub async fn register() -> Html<String> {
    Html(views::pages::register())
}

pub async fn login() -> Html<String> {
    Html(views::pages::login())
}

pub async fn dashboard(State(state): State<SharedState>) -> ApiResult<Html<String>> {
    let ctx = BoardContext::load(state.store.clone()).await?;
    Ok(Html(views::dashboard::render(&ctx.document)))
}
