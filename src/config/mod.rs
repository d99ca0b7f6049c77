pub mod settings;

pub use settings::{AppConfig, RatingSettings, StoreSettings};
