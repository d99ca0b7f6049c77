use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_body, error_response, parse_season, AppState};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::models::{EvaluateRequest, EvaluateResponse, SeasonParams};
use crate::domain::{NewAssessment, PlayerId};
use crate::rating::assessment::{self, PerformanceInputs};
use crate::services::rating::{RatingService, ScoredAssessment};

pub async fn evaluate(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<EvaluateRequest>,
) -> impl IntoResponse {
    if let Some(err) = request
        .decision_points
        .iter()
        .find_map(|point| point.validate().err())
    {
        return error_body(StatusCode::BAD_REQUEST, err.to_string());
    }

    let high_impact = state.config.rating.high_impact_cav;
    let Some(aggregates) = assessment::aggregate(&request.decision_points, high_impact) else {
        return error_body(
            StatusCode::BAD_REQUEST,
            "at least one decision point is required".to_string(),
        );
    };

    let inputs = PerformanceInputs {
        aqc: aggregates.aqc,
        his: aggregates.his * 100.0,
        ec: request.ec.unwrap_or(aggregates.ec * 100.0),
        tii: request.tii,
        ibi: request.ibi,
        sci: request.sci,
        om: request.om,
        pi: request.pi,
    };

    match assessment::score(&inputs, request.role) {
        Ok(scores) => Json(EvaluateResponse {
            cavs: request.decision_points.iter().map(|p| p.cav()).collect(),
            aggregates,
            scores,
        })
        .into_response(),
        Err(err) => error_body(StatusCode::BAD_REQUEST, err.to_string()),
    }
}

pub async fn record_assessment(
    State(state): State<Arc<AppState>>,
    ApiPath(player_id): ApiPath<PlayerId>,
    ApiJson(assessment): ApiJson<NewAssessment>,
) -> impl IntoResponse {
    let scored = state
        .store
        .record_assessment(player_id, assessment)
        .and_then(ScoredAssessment::from_assessment);

    match scored {
        Ok(scored) => (StatusCode::CREATED, Json(scored)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_assessments(
    State(state): State<Arc<AppState>>,
    ApiPath(player_id): ApiPath<PlayerId>,
    ApiQuery(params): ApiQuery<SeasonParams>,
) -> impl IntoResponse {
    let season = match parse_season(params.season.as_deref()) {
        Ok(season) => season,
        Err(response) => return response,
    };

    let service = RatingService::new(state.store.clone(), state.config.rating.clone());
    match service.assessment_history(player_id, season, params.role_transfer) {
        Ok(history) => Json(history).into_response(),
        Err(e) => error_response(e),
    }
}
