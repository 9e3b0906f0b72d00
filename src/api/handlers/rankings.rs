use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use std::sync::Arc;

use super::AppState;
use crate::api::models::ErrorResponse;

pub async fn get_rankings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.load_or_empty() {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => internal_error("Failed to read rankings", e),
    }
}

pub async fn update_rankings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut service = state.rankings.lock().await;
    match service.refresh().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => internal_error("Failed to update rankings", e),
    }
}

fn internal_error(what: &str, e: anyhow::Error) -> Response {
    error!("{}: {:#}", what, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format!("{}: {:#}", what, e))),
    )
        .into_response()
}
