pub mod rating;
pub mod server;

pub use rating::{AssessmentHistory, MatchRating, RatedMatch, RatingService, ScoredAssessment, SeasonRating};
pub use server::ServerService;
