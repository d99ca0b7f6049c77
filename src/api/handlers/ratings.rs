use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, parse_season, AppState};
use crate::api::extract::{ApiPath, ApiQuery};
use crate::api::models::SeasonParams;
use crate::domain::{MatchId, PlayerId};
use crate::rating::weighting_table;
use crate::services::rating::RatingService;

fn rating_service(state: &AppState) -> RatingService<crate::store::EventStore> {
    RatingService::new(state.store.clone(), state.config.rating.clone())
}

pub async fn get_match_rating(
    State(state): State<Arc<AppState>>,
    ApiPath((player_id, match_id)): ApiPath<(PlayerId, MatchId)>,
) -> impl IntoResponse {
    match rating_service(&state).match_rating(player_id, match_id) {
        Ok(rating) => Json(rating).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_season_rating(
    State(state): State<Arc<AppState>>,
    ApiPath(player_id): ApiPath<PlayerId>,
    ApiQuery(params): ApiQuery<SeasonParams>,
) -> impl IntoResponse {
    let season = match parse_season(params.season.as_deref()) {
        Ok(season) => season,
        Err(response) => return response,
    };

    match rating_service(&state).season_rating(player_id, season, params.role_transfer) {
        Ok(rating) => Json(rating).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_weights() -> impl IntoResponse {
    Json(weighting_table())
}
