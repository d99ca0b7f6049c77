use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{parsed_column, MatchFilter};
use crate::domain::{Match, MatchId, PlayerId, Season, ValidMatch};

const MATCH_COLUMNS: &str = "id, date, opponent, venue, result";

pub fn insert_match(conn: &Connection, fixture: &ValidMatch) -> Result<Match> {
    let sql = format!(
        "INSERT INTO matches (date, opponent, venue, result) VALUES (?1, ?2, ?3, ?4) RETURNING {}",
        MATCH_COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            fixture.date,
            fixture.opponent,
            fixture.venue.as_str(),
            fixture.result.to_string()
        ],
        parse_match_row,
    )
    .context("Failed to insert match")
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        date: row.get(1)?,
        opponent: row.get(2)?,
        venue: parsed_column(row, 3)?,
        result: parsed_column(row, 4)?,
    })
}

pub fn find_by_id(conn: &Connection, id: MatchId) -> Result<Option<Match>> {
    let sql = format!("SELECT {} FROM matches WHERE id = ?1", MATCH_COLUMNS);

    conn.query_row(&sql, params![id], parse_match_row)
        .optional()
        .context("Failed to query match by id")
}

pub fn exists(conn: &Connection, id: MatchId) -> Result<bool> {
    conn.query_row("SELECT EXISTS(SELECT 1 FROM matches WHERE id = ?1)", params![id], |row| {
        row.get(0)
    })
    .context("Failed to check match existence")
}

pub fn list(conn: &Connection, filter: &MatchFilter) -> Result<Vec<Match>> {
    let sql = format!(
        "SELECT {} FROM matches \
         WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date < ?2) \
         ORDER BY date, id",
        MATCH_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![filter.from, filter.until], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Matches in the season where the player has at least one logged action
pub fn list_for_player(conn: &Connection, player_id: PlayerId, season: Season) -> Result<Vec<Match>> {
    let sql = "
        SELECT m.id, m.date, m.opponent, m.venue, m.result
        FROM matches m
        WHERE m.date >= ?2 AND m.date < ?3
          AND EXISTS (SELECT 1 FROM actions a WHERE a.match_id = m.id AND a.player_id = ?1)
        ORDER BY m.date, m.id
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![player_id, season.start(), season.end()], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn update_match(conn: &Connection, fixture: &Match) -> Result<Match> {
    let sql = format!(
        "UPDATE matches SET date = ?1, opponent = ?2, venue = ?3, result = ?4 WHERE id = ?5 RETURNING {}",
        MATCH_COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            fixture.date,
            fixture.opponent,
            fixture.venue.as_str(),
            fixture.result.to_string(),
            fixture.id
        ],
        parse_match_row,
    )
    .context("Failed to update match")
}

pub fn delete_match(conn: &Connection, id: MatchId) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM matches WHERE id = ?1", params![id])
        .context("Failed to delete match")?;
    Ok(deleted > 0)
}
