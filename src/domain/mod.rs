pub mod assessment;
pub mod models;
pub mod result;
pub mod season;

pub use assessment::{Assessment, AssessmentId, NewAssessment};
pub use models::*;
pub use result::{MatchResult, Outcome};
pub use season::Season;
