use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, AppState};
use crate::api::extract::ApiJson;
use crate::domain::NewAction;

pub async fn append_action(
    State(state): State<Arc<AppState>>,
    ApiJson(action): ApiJson<NewAction>,
) -> impl IntoResponse {
    match state.store.append_action(action) {
        Ok(logged) => (StatusCode::CREATED, Json(logged)).into_response(),
        Err(e) => error_response(e),
    }
}
