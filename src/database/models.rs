use chrono::NaiveDate;
use rusqlite::types::Type;
use std::str::FromStr;

use crate::domain::{Position, Season};
use crate::errors::ValidationError;

#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    pub name_contains: Option<String>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Default)]
pub struct MatchFilter {
    pub from: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl MatchFilter {
    pub fn season(season: Season) -> Self {
        Self {
            from: Some(season.start()),
            until: Some(season.end()),
        }
    }
}

/// Read a TEXT column into one of the domain's string-backed types
pub(crate) fn parsed_column<T>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = ValidationError>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
