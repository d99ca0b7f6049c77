use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::models::{MatchId, PlayerId};
use crate::errors::ValidationError;
use crate::rating::assessment::{PerformanceInputs, Role};

pub type AssessmentId = i64;

/// A saved weighted assessment. Only the inputs are kept; scores are derived on read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: AssessmentId,
    pub player_id: PlayerId,
    pub match_id: Option<MatchId>,
    pub role: Role,
    #[serde(flatten)]
    pub inputs: PerformanceInputs,
    pub recorded_at: NaiveDateTime,
}

/// Body of `POST /api/players/:id/assessments`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssessment {
    #[serde(default)]
    pub match_id: Option<MatchId>,
    pub role: Role,
    #[serde(flatten)]
    pub inputs: PerformanceInputs,
}

impl NewAssessment {
    pub fn new(role: Role, inputs: PerformanceInputs) -> Self {
        Self {
            match_id: None,
            role,
            inputs,
        }
    }

    pub fn for_match(mut self, match_id: MatchId) -> Self {
        self.match_id = Some(match_id);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.inputs.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_flattens_inputs() {
        let new: NewAssessment = serde_json::from_str(
            r#"{"role": "CM / 8", "matchId": 3, "aqc": 7, "his": 40, "ec": 80, "om": 1.2}"#,
        )
        .unwrap();
        assert_eq!(new.role, Role::CentralMid);
        assert_eq!(new.match_id, Some(3));
        assert_eq!(new.inputs.om, 1.2);
        assert_eq!(new.inputs.pi, 1.0);
        assert!(new.validate().is_ok());
    }

    #[test]
    fn out_of_range_inputs_fail_validation() {
        let new: NewAssessment =
            serde_json::from_str(r#"{"role": "winger", "aqc": 11, "his": 40, "ec": 80}"#).unwrap();
        assert_eq!(new.validate().unwrap_err().field, "aqc");
    }
}
