use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::result::MatchResult;
use crate::errors::ValidationError;

pub type PlayerId = i64;
pub type MatchId = i64;
pub type ActionId = i64;

/// Latest minute accepted for an action (regulation plus extra time and stoppage)
pub const MAX_MINUTE: u16 = 130;

/// Playing position of a squad member.
///
/// Serialized by storage name; either the storage name or the team sheet label is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Position {
    Striker,
    Winger,
    AttackingMid,
    CentralMid,
    DefensiveMid,
    LeftBack,
    CentreBack,
    RightBack,
    Goalkeeper,
}

impl Position {
    pub const ALL: [Position; 9] = [
        Position::Striker,
        Position::Winger,
        Position::AttackingMid,
        Position::CentralMid,
        Position::DefensiveMid,
        Position::LeftBack,
        Position::CentreBack,
        Position::RightBack,
        Position::Goalkeeper,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Striker => "striker",
            Position::Winger => "winger",
            Position::AttackingMid => "attacking_mid",
            Position::CentralMid => "central_mid",
            Position::DefensiveMid => "defensive_mid",
            Position::LeftBack => "left_back",
            Position::CentreBack => "centre_back",
            Position::RightBack => "right_back",
            Position::Goalkeeper => "goalkeeper",
        }
    }

    /// Label used on team sheets
    pub fn label(&self) -> &'static str {
        match self {
            Position::Striker => "CF / Striker",
            Position::Winger => "Winger",
            Position::AttackingMid => "AM / 10",
            Position::CentralMid => "CM / 8",
            Position::DefensiveMid => "DM / 6",
            Position::LeftBack => "LB",
            Position::CentreBack => "CB",
            Position::RightBack => "RB",
            Position::Goalkeeper => "GK",
        }
    }
}

impl FromStr for Position {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s) || p.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::new("position", format!("unknown position '{}'", s)))
    }
}

impl TryFrom<String> for Position {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Venue {
    Home,
    Away,
    Neutral,
}

impl Venue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::Home => "home",
            Venue::Away => "away",
            Venue::Neutral => "neutral",
        }
    }
}

impl FromStr for Venue {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(Venue::Home),
            "away" => Ok(Venue::Away),
            "neutral" => Ok(Venue::Neutral),
            _ => Err(ValidationError::new("venue", format!("unknown venue '{}'", s))),
        }
    }
}

impl TryFrom<String> for Venue {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.trim().parse()
    }
}

/// Discrete in-match event types. Each carries a fixed rating weight, see `rating::weights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Goal,
    Assist,
    KeyPass,
    ShotOnTarget,
    Tackle,
    Interception,
    Clearance,
    Save,
    Foul,
    Error,
    OwnGoal,
}

impl ActionKind {
    pub const ALL: [ActionKind; 11] = [
        ActionKind::Goal,
        ActionKind::Assist,
        ActionKind::KeyPass,
        ActionKind::ShotOnTarget,
        ActionKind::Tackle,
        ActionKind::Interception,
        ActionKind::Clearance,
        ActionKind::Save,
        ActionKind::Foul,
        ActionKind::Error,
        ActionKind::OwnGoal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Goal => "goal",
            ActionKind::Assist => "assist",
            ActionKind::KeyPass => "key_pass",
            ActionKind::ShotOnTarget => "shot_on_target",
            ActionKind::Tackle => "tackle",
            ActionKind::Interception => "interception",
            ActionKind::Clearance => "clearance",
            ActionKind::Save => "save",
            ActionKind::Foul => "foul",
            ActionKind::Error => "error",
            ActionKind::OwnGoal => "own_goal",
        }
    }
}

impl FromStr for ActionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ValidationError::new("kind", format!("unknown action kind '{}'", s)))
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub date_added: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub date: NaiveDate,
    pub opponent: String,
    pub venue: Venue,
    pub result: MatchResult,
}

/// One logged event. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub kind: ActionKind,
    pub outcome: f64,
    pub minute: Option<u16>,
    pub recorded_at: NaiveDateTime,
}

// --- Input records, validated before they reach the database ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    pub name: String,
    pub position: Position,
}

impl NewPlayer {
    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name("name", &self.name)?,
            position: self.position,
        })
    }
}

/// Name and position are the only editable player fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub position: Option<Position>,
}

impl PlayerUpdate {
    pub fn validated(self) -> Result<Self, ValidationError> {
        let name = self
            .name
            .map(|n| validate_name("name", &n))
            .transpose()?;
        Ok(Self {
            name,
            position: self.position,
        })
    }

    pub fn apply_to(&self, player: &mut Player) {
        if let Some(name) = &self.name {
            player.name = name.clone();
        }
        if let Some(position) = self.position {
            player.position = position;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMatch {
    pub date: NaiveDate,
    pub opponent: String,
    pub venue: Venue,
    pub result: String,
}

impl NewMatch {
    pub fn validated(self) -> Result<ValidMatch, ValidationError> {
        Ok(ValidMatch {
            date: self.date,
            opponent: validate_name("opponent", &self.opponent)?,
            venue: self.venue,
            result: self.result.parse()?,
        })
    }
}

/// A match that passed validation, ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMatch {
    pub date: NaiveDate,
    pub opponent: String,
    pub venue: Venue,
    pub result: MatchResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchUpdate {
    pub date: Option<NaiveDate>,
    pub opponent: Option<String>,
    pub venue: Option<Venue>,
    pub result: Option<String>,
}

impl MatchUpdate {
    pub fn apply_to(self, fixture: &mut Match) -> Result<(), ValidationError> {
        if let Some(opponent) = self.opponent {
            fixture.opponent = validate_name("opponent", &opponent)?;
        }
        if let Some(result) = self.result {
            fixture.result = result.parse()?;
        }
        if let Some(date) = self.date {
            fixture.date = date;
        }
        if let Some(venue) = self.venue {
            fixture.venue = venue;
        }
        Ok(())
    }
}

fn default_outcome() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAction {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub kind: ActionKind,
    #[serde(default = "default_outcome")]
    pub outcome: f64,
    #[serde(default)]
    pub minute: Option<u16>,
}

impl NewAction {
    pub fn new(match_id: MatchId, player_id: PlayerId, kind: ActionKind) -> Self {
        Self {
            match_id,
            player_id,
            kind,
            outcome: default_outcome(),
            minute: None,
        }
    }

    pub fn with_outcome(mut self, outcome: f64) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn at_minute(mut self, minute: u16) -> Self {
        self.minute = Some(minute);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.outcome.is_finite() || !(0.0..=1.0).contains(&self.outcome) {
            return Err(ValidationError::new(
                "outcome",
                format!("must be between 0.0 and 1.0, got {}", self.outcome),
            ));
        }
        if let Some(minute) = self.minute {
            if minute > MAX_MINUTE {
                return Err(ValidationError::new(
                    "minute",
                    format!("must be at most {}, got {}", MAX_MINUTE, minute),
                ));
            }
        }
        Ok(())
    }
}

fn validate_name(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
