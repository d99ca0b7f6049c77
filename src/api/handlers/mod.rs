use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::api::models::ErrorResponse;
use crate::config::settings::AppConfig;
use crate::domain::Season;
use crate::errors::StoreError;
use crate::store::EventStore;

pub mod actions;
pub mod assessments;
pub mod matches;
pub mod players;
pub mod ratings;

pub struct AppState {
    pub store: EventStore,
    pub config: AppConfig,
}

/// Maps a failed store or service call to a user-visible error
pub fn error_response(err: anyhow::Error) -> Response {
    let status = match err.downcast_ref::<StoreError>() {
        Some(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
        Some(StoreError::DanglingReference { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(StoreError::InUse { .. }) => StatusCode::CONFLICT,
        Some(StoreError::Invalid(_)) => StatusCode::BAD_REQUEST,
        None => {
            log::error!("Request failed: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_body(status, err.to_string())
}

pub fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

pub fn parse_season(raw: Option<&str>) -> Result<Option<Season>, Response> {
    raw.map(|s| s.parse::<Season>())
        .transpose()
        .map_err(|e| error_body(StatusCode::BAD_REQUEST, e.to_string()))
}
