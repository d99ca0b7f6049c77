use serde::{Deserialize, Serialize};

use crate::domain::Position;
use crate::rating::assessment::{AssessmentScores, DecisionPoint, MatchAggregates, Role};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
pub struct PlayerParams {
    pub filter: Option<String>,
    pub position: Option<Position>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonParams {
    pub season: Option<String>,
    pub role_transfer: Option<f64>,
}

/// Body of `POST /api/assessments/evaluate`; CAV-derived metrics are filled in from the points
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub role: Role,
    pub decision_points: Vec<DecisionPoint>,
    /// Consistency percentage; estimated from the CAV spread when absent
    pub ec: Option<f64>,
    #[serde(default)]
    pub tii: f64,
    #[serde(default)]
    pub ibi: f64,
    #[serde(default = "unit")]
    pub sci: f64,
    #[serde(default = "unit")]
    pub om: f64,
    #[serde(default = "unit")]
    pub pi: f64,
}

fn unit() -> f64 {
    1.0
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    pub cavs: Vec<f64>,
    pub aggregates: MatchAggregates,
    pub scores: AssessmentScores,
}
