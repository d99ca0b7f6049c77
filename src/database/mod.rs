pub mod actions;
pub mod assessments;
pub mod connection;
pub mod matches;
pub mod models;
pub mod players;
pub mod setup;

pub use connection::{create_in_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::{MatchFilter, PlayerFilter};
