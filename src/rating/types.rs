use serde::Serialize;

use super::weights::weight_of;
use crate::domain::{Action, ActionKind};

pub type RatingValue = f64;

/// The part of a logged action the match rating depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatedAction {
    pub kind: ActionKind,
    pub outcome: f64,
}

impl RatedAction {
    pub fn new(kind: ActionKind, outcome: f64) -> Self {
        Self { kind, outcome }
    }

    /// A fully successful action
    pub fn of(kind: ActionKind) -> Self {
        Self::new(kind, 1.0)
    }

    pub fn contribution(&self) -> f64 {
        weight_of(self.kind) * self.outcome
    }
}

impl From<&Action> for RatedAction {
    fn from(action: &Action) -> Self {
        Self::new(action.kind, action.outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindContribution {
    pub kind: ActionKind,
    pub count: usize,
    pub weight: f64,
    pub total: f64,
}

/// An MPR together with what produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MprBreakdown {
    pub mpr: RatingValue,
    pub action_count: usize,
    pub mean_contribution: f64,
    pub by_kind: Vec<KindContribution>,
}
