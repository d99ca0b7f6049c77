use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use super::models::parsed_column;
use crate::domain::{Action, MatchId, NewAction, PlayerId};

const ACTION_COLUMNS: &str = "id, match_id, player_id, kind, outcome, minute, recorded_at";

pub fn insert_action(
    conn: &Connection,
    action: &NewAction,
    recorded_at: NaiveDateTime,
) -> Result<Action> {
    let sql = format!(
        "INSERT INTO actions (match_id, player_id, kind, outcome, minute, recorded_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {}",
        ACTION_COLUMNS
    );

    conn.query_row(
        &sql,
        params![
            action.match_id,
            action.player_id,
            action.kind.as_str(),
            action.outcome,
            action.minute,
            recorded_at
        ],
        parse_action_row,
    )
    .context("Failed to insert action")
}

fn parse_action_row(row: &rusqlite::Row) -> rusqlite::Result<Action> {
    Ok(Action {
        id: row.get(0)?,
        match_id: row.get(1)?,
        player_id: row.get(2)?,
        kind: parsed_column(row, 3)?,
        outcome: row.get(4)?,
        minute: row.get(5)?,
        recorded_at: row.get(6)?,
    })
}

fn query_actions(conn: &Connection, filter: &str, args: impl rusqlite::Params) -> Result<Vec<Action>> {
    let sql = format!(
        "SELECT {} FROM actions WHERE {} ORDER BY id",
        ACTION_COLUMNS, filter
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(args, parse_action_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_by_match(conn: &Connection, match_id: MatchId) -> Result<Vec<Action>> {
    query_actions(conn, "match_id = ?1", params![match_id])
        .context("Failed to list actions by match")
}

pub fn list_by_player(conn: &Connection, player_id: PlayerId) -> Result<Vec<Action>> {
    query_actions(conn, "player_id = ?1", params![player_id])
        .context("Failed to list actions by player")
}

pub fn list_for_player_in_match(
    conn: &Connection,
    player_id: PlayerId,
    match_id: MatchId,
) -> Result<Vec<Action>> {
    query_actions(conn, "player_id = ?1 AND match_id = ?2", params![player_id, match_id])
        .context("Failed to list actions for player in match")
}

pub fn count_for_player(conn: &Connection, player_id: PlayerId) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM actions WHERE player_id = ?1",
        params![player_id],
        |row| row.get(0),
    )
    .context("Failed to count actions for player")
}

pub fn count_for_match(conn: &Connection, match_id: MatchId) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM actions WHERE match_id = ?1",
        params![match_id],
        |row| row.get(0),
    )
    .context("Failed to count actions for match")
}
