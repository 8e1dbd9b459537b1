use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::{Form, Json};
use serde::Deserialize;
use tradewise_core::{Outcome, OutcomeView, Report};

use crate::page;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct InsightForm {
    #[serde(default)]
    pub symbol: String,
}

pub async fn index() -> Html<String> {
    Html(page::initial_page())
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Form submission from the page: run once and redraw with the result.
pub async fn insight_page(
    State(state): State<AppState>,
    Form(form): Form<InsightForm>,
) -> Html<String> {
    let outcome = state.assistant.run(&form.symbol).await;
    let shown = form.symbol.trim().to_uppercase();
    Html(page::render(&shown, Some(&Report::from_outcome(&outcome))))
}

pub async fn insight_api(
    State(state): State<AppState>,
    Json(form): Json<InsightForm>,
) -> impl IntoResponse {
    let outcome = state.assistant.run(&form.symbol).await;
    (status_for(&outcome), Json(OutcomeView::from(&outcome)))
}

fn status_for(outcome: &Outcome) -> StatusCode {
    match outcome.error() {
        None => StatusCode::OK,
        Some(error) if error.is_input_error() => StatusCode::BAD_REQUEST,
        Some(_) => StatusCode::BAD_GATEWAY,
    }
}
