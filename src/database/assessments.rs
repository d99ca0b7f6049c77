use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use super::models::parsed_column;
use crate::domain::{Assessment, MatchId, NewAssessment, PlayerId};
use crate::rating::assessment::PerformanceInputs;

const ASSESSMENT_COLUMNS: &str =
    "id, player_id, match_id, role, aqc, his, ec, tii, ibi, sci, om, pi, recorded_at";

pub fn insert_assessment(
    conn: &Connection,
    player_id: PlayerId,
    assessment: &NewAssessment,
    recorded_at: NaiveDateTime,
) -> Result<Assessment> {
    let sql = format!(
        "INSERT INTO assessments (player_id, match_id, role, aqc, his, ec, tii, ibi, sci, om, pi, recorded_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12) RETURNING {}",
        ASSESSMENT_COLUMNS
    );

    let inputs = &assessment.inputs;
    conn.query_row(
        &sql,
        params![
            player_id,
            assessment.match_id,
            assessment.role.as_str(),
            inputs.aqc,
            inputs.his,
            inputs.ec,
            inputs.tii,
            inputs.ibi,
            inputs.sci,
            inputs.om,
            inputs.pi,
            recorded_at
        ],
        parse_assessment_row,
    )
    .context("Failed to insert assessment")
}

fn parse_assessment_row(row: &rusqlite::Row) -> rusqlite::Result<Assessment> {
    Ok(Assessment {
        id: row.get(0)?,
        player_id: row.get(1)?,
        match_id: row.get(2)?,
        role: parsed_column(row, 3)?,
        inputs: PerformanceInputs {
            aqc: row.get(4)?,
            his: row.get(5)?,
            ec: row.get(6)?,
            tii: row.get(7)?,
            ibi: row.get(8)?,
            sci: row.get(9)?,
            om: row.get(10)?,
            pi: row.get(11)?,
        },
        recorded_at: row.get(12)?,
    })
}

/// Oldest first
pub fn list_by_player(conn: &Connection, player_id: PlayerId) -> Result<Vec<Assessment>> {
    let sql = format!(
        "SELECT {} FROM assessments WHERE player_id = ?1 ORDER BY recorded_at, id",
        ASSESSMENT_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id], parse_assessment_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list assessments by player")?;

    Ok(rows)
}

pub fn count_for_player(conn: &Connection, player_id: PlayerId) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM assessments WHERE player_id = ?1",
        params![player_id],
        |row| row.get(0),
    )
    .context("Failed to count assessments for player")
}

pub fn count_for_match(conn: &Connection, match_id: MatchId) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM assessments WHERE match_id = ?1",
        params![match_id],
        |row| row.get(0),
    )
    .context("Failed to count assessments for match")
}
