use serde::Serialize;

use super::mpr::MPR_MAX;
use super::types::RatingValue;
use crate::config::settings::RatingSettings;
use crate::errors::ValidationError;

/// Returned for a season with no rated matches
pub const DEFAULT_CSR: RatingValue = 5.0;

const AVERAGE_WEIGHT: f64 = 0.45;
const REPEATABILITY_WEIGHT: f64 = 0.20;
const ROLE_TRANSFER_WEIGHT: f64 = 0.15;
const PEAK_WEIGHT: f64 = 0.20;

/// Contextual Season Rating: the plain mean of the season's MPRs
pub fn compute_csr(mprs: &[RatingValue]) -> RatingValue {
    if mprs.is_empty() {
        return DEFAULT_CSR;
    }
    mprs.iter().sum::<f64>() / mprs.len() as f64
}

/// Distribution of a season's MPRs plus the weighted composite
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonProfile {
    pub matches: usize,
    pub average: RatingValue,
    pub peak: RatingValue,
    pub low: RatingValue,
    pub peak_average: RatingValue,
    /// Share of matches rated at or above the threshold, 0-1
    pub repeatability: f64,
    pub role_transfer: f64,
    pub composite: RatingValue,
}

impl SeasonProfile {
    /// `None` for an empty season.
    ///
    /// `composite = 0.45*average + 0.20*(repeatability*10) + 0.15*role_transfer + 0.20*peak_average`
    pub fn from_ratings(
        mprs: &[RatingValue],
        role_transfer: f64,
        settings: &RatingSettings,
    ) -> Result<Option<Self>, ValidationError> {
        validate_role_transfer(role_transfer)?;
        if mprs.is_empty() {
            return Ok(None);
        }

        let mut sorted = mprs.to_vec();
        sorted.sort_by(|a, b| b.total_cmp(a));

        let window = settings.peak_window.clamp(1, sorted.len());
        let peak_average = compute_csr(&sorted[..window]);
        let average = compute_csr(mprs);
        let repeatable = mprs
            .iter()
            .filter(|&&mpr| mpr >= settings.repeatability_threshold)
            .count();
        let repeatability = repeatable as f64 / mprs.len() as f64;

        let composite = AVERAGE_WEIGHT * average
            + REPEATABILITY_WEIGHT * repeatability * MPR_MAX
            + ROLE_TRANSFER_WEIGHT * role_transfer
            + PEAK_WEIGHT * peak_average;

        Ok(Some(Self {
            matches: mprs.len(),
            average,
            peak: sorted[0],
            low: sorted[sorted.len() - 1],
            peak_average,
            repeatability,
            role_transfer,
            composite,
        }))
    }
}

fn validate_role_transfer(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || !(0.0..=MPR_MAX).contains(&value) {
        return Err(ValidationError::new(
            "roleTransfer",
            format!("must be between 0 and {}, got {}", MPR_MAX, value),
        ));
    }
    Ok(())
}
