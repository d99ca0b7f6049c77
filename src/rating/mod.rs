pub mod assessment;
pub mod csr;
pub mod mpr;
pub mod types;
pub mod weights;

pub use csr::{compute_csr, SeasonProfile, DEFAULT_CSR};
pub use mpr::{compute_mpr, explain_mpr, NEUTRAL_MPR};
pub use types::{KindContribution, MprBreakdown, RatedAction, RatingValue};
pub use weights::{weight_of, weighting_table, WeightEntry};
