use std::env;

/// Tunables for the season profile and the decision-point calculator.
///
/// The MPR weighting table and the empty-input defaults are constants in `rating`.
#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub peak_window: usize,
    pub repeatability_threshold: f64,
    pub default_role_transfer: f64,
    pub high_impact_cav: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            peak_window: 5,
            repeatability_threshold: 7.0,
            default_role_transfer: 7.0,
            high_impact_cav: 7.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub database_path: String,
}

impl StoreSettings {
    pub const DEFAULT_DATABASE_PATH: &'static str = "football_performance.db";

    pub fn from_env() -> Self {
        Self {
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| Self::DEFAULT_DATABASE_PATH.to_string()),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database_path: Self::DEFAULT_DATABASE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub store: StoreSettings,
}

impl AppConfig {
    /// Defaults, with the database path taken from `DATABASE_PATH` when set
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            store: StoreSettings::from_env(),
        }
    }
}
