// Event store boundary.
//
// Everything written through `EventStore` is validated and referentially
// checked here, so the rating engine only ever sees well-formed rows.

pub mod event_store;

use anyhow::Result;

use crate::domain::{Action, Assessment, Match, MatchId, PlayerId, Season};

pub use event_store::EventStore;

/// The reads the rating service needs from storage.
pub trait EventSource {
    /// Actions logged for one player in one match, in logging order.
    ///
    /// Fails with `StoreError::NotFound` when either id is unknown.
    fn actions_for(&self, player_id: PlayerId, match_id: MatchId) -> Result<Vec<Action>>;

    /// Matches in `season` where the player has logged actions, by date.
    fn matches_for_player(&self, player_id: PlayerId, season: Season) -> Result<Vec<Match>>;

    /// Saved assessments for the player, oldest first.
    fn assessments_for_player(&self, player_id: PlayerId) -> Result<Vec<Assessment>>;
}
