use std::collections::BTreeMap;

use super::types::{KindContribution, MprBreakdown, RatedAction, RatingValue};
use super::weights::{weight_of, WEIGHT_CEILING};

pub const MPR_MIN: RatingValue = 0.0;
pub const MPR_MAX: RatingValue = 10.0;

/// Returned for a match with no logged actions: the midpoint of the scale
pub const NEUTRAL_MPR: RatingValue = 5.0;

/// Match Performance Rating on a 0-10 scale.
///
/// `mpr = clamp(mean(weight(kind) * outcome) / WEIGHT_CEILING * 10, 0, 10)`
///
/// So `[goal, tackle]` averages (3 + 1) / 2 = 2 and rates 2 / 3 * 10 = 6.67.
pub fn compute_mpr(actions: &[RatedAction]) -> RatingValue {
    if actions.is_empty() {
        return NEUTRAL_MPR;
    }
    scale(mean_contribution(actions))
}

/// Same rating as `compute_mpr`, with a per-kind account of how it was reached
pub fn explain_mpr(actions: &[RatedAction]) -> MprBreakdown {
    let mut by_kind: BTreeMap<_, Vec<f64>> = BTreeMap::new();
    for action in actions {
        by_kind.entry(action.kind).or_default().push(action.contribution());
    }

    let by_kind = by_kind
        .into_iter()
        .map(|(kind, contributions)| KindContribution {
            kind,
            count: contributions.len(),
            weight: weight_of(kind),
            total: canonical_sum(contributions),
        })
        .collect();

    MprBreakdown {
        mpr: compute_mpr(actions),
        action_count: actions.len(),
        mean_contribution: if actions.is_empty() {
            0.0
        } else {
            mean_contribution(actions)
        },
        by_kind,
    }
}

fn mean_contribution(actions: &[RatedAction]) -> f64 {
    let contributions: Vec<f64> = actions.iter().map(RatedAction::contribution).collect();
    canonical_sum(contributions) / actions.len() as f64
}

/// Sums in sorted order so any permutation of the same values gives the same bits
fn canonical_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}

fn scale(mean: f64) -> RatingValue {
    (mean / WEIGHT_CEILING * MPR_MAX).clamp(MPR_MIN, MPR_MAX)
}
