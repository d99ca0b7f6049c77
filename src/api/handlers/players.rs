use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_body, error_response, parse_season, AppState};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::models::{PlayerParams, SeasonParams};
use crate::database::PlayerFilter;
use crate::domain::{NewPlayer, PlayerId, PlayerUpdate, Season};
use crate::store::EventSource;

pub async fn list_players(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PlayerParams>,
) -> impl IntoResponse {
    let filter = PlayerFilter {
        name_contains: params.filter.filter(|f| !f.trim().is_empty()),
        position: params.position,
    };

    match state.store.players(&filter) {
        Ok(players) => Json(players).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    ApiJson(player): ApiJson<NewPlayer>,
) -> impl IntoResponse {
    match state.store.add_player(player) {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_player(
    State(state): State<Arc<AppState>>,
    ApiPath(player_id): ApiPath<PlayerId>,
) -> impl IntoResponse {
    match state.store.player(player_id) {
        Ok(player) => Json(player).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_player(
    State(state): State<Arc<AppState>>,
    ApiPath(player_id): ApiPath<PlayerId>,
    ApiJson(update): ApiJson<PlayerUpdate>,
) -> impl IntoResponse {
    match state.store.update_player(player_id, update) {
        Ok(player) => Json(player).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    ApiPath(player_id): ApiPath<PlayerId>,
) -> impl IntoResponse {
    match state.store.remove_player(player_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_player_actions(
    State(state): State<Arc<AppState>>,
    ApiPath(player_id): ApiPath<PlayerId>,
) -> impl IntoResponse {
    match state.store.actions_by_player(player_id) {
        Ok(actions) => Json(actions).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_player_matches(
    State(state): State<Arc<AppState>>,
    ApiPath(player_id): ApiPath<PlayerId>,
    ApiQuery(params): ApiQuery<SeasonParams>,
) -> impl IntoResponse {
    let season = match parse_season(params.season.as_deref()) {
        Ok(Some(season)) => season,
        Ok(None) => match Season::current() {
            Some(season) => season,
            None => {
                return error_body(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "no season contains today's date".to_string(),
                )
            }
        },
        Err(response) => return response,
    };

    match state.store.matches_for_player(player_id, season) {
        Ok(matches) => Json(matches).into_response(),
        Err(e) => error_response(e),
    }
}
