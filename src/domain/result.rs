use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    fn letter(&self) -> char {
        match self {
            Outcome::Win => 'W',
            Outcome::Draw => 'D',
            Outcome::Loss => 'L',
        }
    }

    fn from_score(goals_for: u8, goals_against: u8) -> Self {
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }
}

/// Final score from the team's point of view, written `W 2-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub goals_for: u8,
    pub goals_against: u8,
}

impl MatchResult {
    pub fn new(goals_for: u8, goals_against: u8) -> Self {
        Self {
            goals_for,
            goals_against,
        }
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_score(self.goals_for, self.goals_against)
    }
}

impl FromStr for MatchResult {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |msg: &str| ValidationError::new("result", format!("{} in '{}'", msg, s));

        let (letter, score) = s
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| invalid("expected '<W|D|L> <for>-<against>'"))?;

        let claimed = match letter.to_ascii_uppercase().as_str() {
            "W" => Outcome::Win,
            "D" => Outcome::Draw,
            "L" => Outcome::Loss,
            _ => return Err(invalid("unknown outcome letter")),
        };

        let (goals_for, goals_against) = score
            .trim()
            .split_once('-')
            .ok_or_else(|| invalid("missing score separator"))?;
        let goals_for: u8 = goals_for.trim().parse().map_err(|_| invalid("bad goal count"))?;
        let goals_against: u8 = goals_against
            .trim()
            .parse()
            .map_err(|_| invalid("bad goal count"))?;

        let result = MatchResult::new(goals_for, goals_against);
        if result.outcome() != claimed {
            return Err(invalid("outcome letter does not match the score"));
        }
        Ok(result)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.outcome().letter(),
            self.goals_for,
            self.goals_against
        )
    }
}

impl Serialize for MatchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalises_results() {
        let result: MatchResult = "w 2-1".parse().unwrap();
        assert_eq!(result, MatchResult::new(2, 1));
        assert_eq!(result.outcome(), Outcome::Win);
        assert_eq!(result.to_string(), "W 2-1");

        assert_eq!("D 0 - 0".parse::<MatchResult>().unwrap().to_string(), "D 0-0");
        assert_eq!("L 1-3".parse::<MatchResult>().unwrap().outcome(), Outcome::Loss);
    }

    #[test]
    fn rejects_inconsistent_or_malformed_results() {
        assert!("W 1-2".parse::<MatchResult>().is_err());
        assert!("D 2-1".parse::<MatchResult>().is_err());
        assert!("2-1".parse::<MatchResult>().is_err());
        assert!("X 2-1".parse::<MatchResult>().is_err());
        assert!("W two-one".parse::<MatchResult>().is_err());
    }
}
