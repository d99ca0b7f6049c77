use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::models::{parsed_column, PlayerFilter};
use crate::domain::{Player, PlayerId, Position};

const PLAYER_COLUMNS: &str = "id, name, position, date_added";

pub fn insert_player(
    conn: &Connection,
    name: &str,
    position: Position,
    date_added: NaiveDateTime,
) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (name, position, date_added) VALUES (?1, ?2, ?3) RETURNING {}",
        PLAYER_COLUMNS
    );

    conn.query_row(&sql, params![name, position.as_str(), date_added], parse_player_row)
        .context("Failed to insert player")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        position: parsed_column(row, 2)?,
        date_added: row.get(3)?,
    })
}

pub fn find_by_id(conn: &Connection, id: PlayerId) -> Result<Option<Player>> {
    let sql = format!("SELECT {} FROM players WHERE id = ?1", PLAYER_COLUMNS);

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn exists(conn: &Connection, id: PlayerId) -> Result<bool> {
    conn.query_row("SELECT EXISTS(SELECT 1 FROM players WHERE id = ?1)", params![id], |row| {
        row.get(0)
    })
    .context("Failed to check player existence")
}

pub fn list(conn: &Connection, filter: &PlayerFilter) -> Result<Vec<Player>> {
    let sql = format!(
        "SELECT {} FROM players \
         WHERE (?1 IS NULL OR position = ?1) \
           AND (?2 IS NULL OR name LIKE '%' || ?2 || '%' ESCAPE '\\') \
         ORDER BY name COLLATE NOCASE, id",
        PLAYER_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(
            params![
                filter.position.map(|p| p.as_str()),
                filter.name_contains.as_deref().map(escape_like)
            ],
            parse_player_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Escape LIKE wildcards so a filter matches its text literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn update_player(conn: &Connection, player: &Player) -> Result<Player> {
    let sql = format!(
        "UPDATE players SET name = ?1, position = ?2 WHERE id = ?3 RETURNING {}",
        PLAYER_COLUMNS
    );

    conn.query_row(
        &sql,
        params![player.name, player.position.as_str(), player.id],
        parse_player_row,
    )
    .context("Failed to update player")
}

pub fn delete_player(conn: &Connection, id: PlayerId) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM players WHERE id = ?1", params![id])
        .context("Failed to delete player")?;
    Ok(deleted > 0)
}
