use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, parse_season, AppState};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::models::SeasonParams;
use crate::database::MatchFilter;
use crate::domain::{MatchId, MatchUpdate, NewMatch};

pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SeasonParams>,
) -> impl IntoResponse {
    let filter = match parse_season(params.season.as_deref()) {
        Ok(Some(season)) => MatchFilter::season(season),
        Ok(None) => MatchFilter::default(),
        Err(response) => return response,
    };

    match state.store.matches(&filter) {
        Ok(matches) => Json(matches).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_match(
    State(state): State<Arc<AppState>>,
    ApiJson(fixture): ApiJson<NewMatch>,
) -> impl IntoResponse {
    match state.store.add_match(fixture) {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_match(
    State(state): State<Arc<AppState>>,
    ApiPath(match_id): ApiPath<MatchId>,
) -> impl IntoResponse {
    match state.store.fixture(match_id) {
        Ok(fixture) => Json(fixture).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_match(
    State(state): State<Arc<AppState>>,
    ApiPath(match_id): ApiPath<MatchId>,
    ApiJson(update): ApiJson<MatchUpdate>,
) -> impl IntoResponse {
    match state.store.update_match(match_id, update) {
        Ok(fixture) => Json(fixture).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_match(
    State(state): State<Arc<AppState>>,
    ApiPath(match_id): ApiPath<MatchId>,
) -> impl IntoResponse {
    match state.store.remove_match(match_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_match_actions(
    State(state): State<Arc<AppState>>,
    ApiPath(match_id): ApiPath<MatchId>,
) -> impl IntoResponse {
    match state.store.actions_by_match(match_id) {
        Ok(actions) => Json(actions).into_response(),
        Err(e) => error_response(e),
    }
}
