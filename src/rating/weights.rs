use serde::Serialize;

use crate::domain::ActionKind;

/// Largest absolute weight in the table. A match of nothing but goals rates 10.
pub const WEIGHT_CEILING: f64 = 3.0;

pub fn weight_of(kind: ActionKind) -> f64 {
    match kind {
        ActionKind::Goal => 3.0,
        ActionKind::Assist => 2.0,
        ActionKind::KeyPass => 1.5,
        ActionKind::Save => 1.5,
        ActionKind::ShotOnTarget => 1.0,
        ActionKind::Tackle => 1.0,
        ActionKind::Interception => 1.0,
        ActionKind::Clearance => 0.5,
        ActionKind::Foul => -0.5,
        ActionKind::Error => -2.0,
        ActionKind::OwnGoal => -3.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightEntry {
    pub kind: ActionKind,
    pub weight: f64,
}

/// The published weighting table, in declaration order
pub fn weighting_table() -> Vec<WeightEntry> {
    ActionKind::ALL
        .into_iter()
        .map(|kind| WeightEntry {
            kind,
            weight: weight_of(kind),
        })
        .collect()
}
