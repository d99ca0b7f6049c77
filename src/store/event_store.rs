use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use rusqlite::{Connection, Transaction, TransactionBehavior};

use super::EventSource;
use crate::config::settings::StoreSettings;
use crate::database::{self, DbConn, DbPool, MatchFilter, PlayerFilter};
use crate::domain::{
    Action, Assessment, Match, MatchId, MatchUpdate, NewAction, NewAssessment, NewMatch, NewPlayer,
    Player, PlayerId, PlayerUpdate, Season,
};
use crate::errors::{read_context, write_context, StoreError};

/// SQLite-backed store for players, matches, the action log and saved assessments
#[derive(Clone)]
pub struct EventStore {
    pool: DbPool,
}

impl EventStore {
    pub fn open(settings: &StoreSettings) -> Result<Self> {
        let pool = database::create_pool(&settings.database_path)?;
        let store = Self::from_pool(pool)?;
        info!("Opened event store at {}", settings.database_path);
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_pool(database::create_in_memory_pool()?)
    }

    /// Wraps a pool, creating the schema if it is missing
    pub fn from_pool(pool: DbPool) -> Result<Self> {
        let store = Self { pool };
        database::setup::initialize_schema(&mut store.conn()?)?;
        Ok(store)
    }

    pub fn reset(&self) -> Result<()> {
        database::setup::reset_database(&mut self.conn()?)
    }

    fn conn(&self) -> Result<DbConn> {
        database::get_connection(&self.pool)
    }

    // --- Players ---

    pub fn add_player(&self, player: NewPlayer) -> Result<Player> {
        let player = player.validated().map_err(StoreError::from)?;
        let created = database::players::insert_player(
            &*self.conn()?,
            &player.name,
            player.position,
            Utc::now().naive_utc(),
        )
        .with_context(|| write_context("add", "player"))?;

        info!("Added player {} ({})", created.name, created.id);
        Ok(created)
    }

    pub fn player(&self, id: PlayerId) -> Result<Player> {
        load_player(&*self.conn()?, id)
    }

    pub fn players(&self, filter: &PlayerFilter) -> Result<Vec<Player>> {
        database::players::list(&*self.conn()?, filter)
    }

    pub fn update_player(&self, id: PlayerId, update: PlayerUpdate) -> Result<Player> {
        let update = update.validated().map_err(StoreError::from)?;
        let mut conn = self.conn()?;
        let tx = write_transaction(&mut conn)?;

        let mut player = load_player(&tx, id)?;
        update.apply_to(&mut player);
        let updated = database::players::update_player(&tx, &player)
            .with_context(|| write_context("update", "player"))?;
        tx.commit()?;

        info!("Updated player {}", id);
        Ok(updated)
    }

    /// Fails with `StoreError::InUse` while any action or assessment references the player
    pub fn remove_player(&self, id: PlayerId) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = write_transaction(&mut conn)?;

        ensure_player(&tx, id)?;
        let references = database::actions::count_for_player(&tx, id)?
            + database::assessments::count_for_player(&tx, id)?;
        if references > 0 {
            return Err(StoreError::InUse {
                entity: "player",
                id,
                references,
            }
            .into());
        }

        database::players::delete_player(&tx, id)?;
        tx.commit()?;
        info!("Removed player {}", id);
        Ok(())
    }

    // --- Matches ---

    pub fn add_match(&self, fixture: NewMatch) -> Result<Match> {
        let fixture = fixture.validated().map_err(StoreError::from)?;
        let created = database::matches::insert_match(&*self.conn()?, &fixture)
            .with_context(|| write_context("add", "match"))?;

        info!(
            "Added match {} vs {} on {}",
            created.id, created.opponent, created.date
        );
        Ok(created)
    }

    pub fn fixture(&self, id: MatchId) -> Result<Match> {
        load_match(&*self.conn()?, id)
    }

    pub fn matches(&self, filter: &MatchFilter) -> Result<Vec<Match>> {
        database::matches::list(&*self.conn()?, filter)
    }

    pub fn update_match(&self, id: MatchId, update: MatchUpdate) -> Result<Match> {
        let mut conn = self.conn()?;
        let tx = write_transaction(&mut conn)?;

        let mut fixture = load_match(&tx, id)?;
        update.apply_to(&mut fixture).map_err(StoreError::from)?;
        let updated = database::matches::update_match(&tx, &fixture)
            .with_context(|| write_context("update", "match"))?;
        tx.commit()?;

        info!("Updated match {}", id);
        Ok(updated)
    }

    pub fn remove_match(&self, id: MatchId) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = write_transaction(&mut conn)?;

        ensure_match(&tx, id)?;
        let references = database::actions::count_for_match(&tx, id)?
            + database::assessments::count_for_match(&tx, id)?;
        if references > 0 {
            return Err(StoreError::InUse {
                entity: "match",
                id,
                references,
            }
            .into());
        }

        database::matches::delete_match(&tx, id)?;
        tx.commit()?;
        info!("Removed match {}", id);
        Ok(())
    }

    // --- Action log ---

    /// Appends one action after checking that its player and match exist
    pub fn append_action(&self, action: NewAction) -> Result<Action> {
        action.validate().map_err(StoreError::from)?;
        let mut conn = self.conn()?;
        let tx = write_transaction(&mut conn)?;

        if !database::players::exists(&tx, action.player_id)? {
            return Err(dangling("action", "player", action.player_id));
        }
        if !database::matches::exists(&tx, action.match_id)? {
            return Err(dangling("action", "match", action.match_id));
        }

        let appended = database::actions::insert_action(&tx, &action, Utc::now().naive_utc())
            .with_context(|| write_context("append", "action"))?;
        tx.commit()?;

        info!(
            "Logged {} for player {} in match {}",
            appended.kind, appended.player_id, appended.match_id
        );
        Ok(appended)
    }

    pub fn actions_by_match(&self, match_id: MatchId) -> Result<Vec<Action>> {
        let conn = self.conn()?;
        ensure_match(&conn, match_id)?;
        database::actions::list_by_match(&conn, match_id)
    }

    pub fn actions_by_player(&self, player_id: PlayerId) -> Result<Vec<Action>> {
        let conn = self.conn()?;
        ensure_player(&conn, player_id)?;
        database::actions::list_by_player(&conn, player_id)
    }

    // --- Assessments ---

    /// Saves a weighted assessment for a known player, optionally linked to a match
    pub fn record_assessment(&self, player_id: PlayerId, assessment: NewAssessment) -> Result<Assessment> {
        assessment.validate().map_err(StoreError::from)?;
        let mut conn = self.conn()?;
        let tx = write_transaction(&mut conn)?;

        ensure_player(&tx, player_id)?;
        if let Some(match_id) = assessment.match_id {
            if !database::matches::exists(&tx, match_id)? {
                return Err(dangling("assessment", "match", match_id));
            }
        }

        let saved = database::assessments::insert_assessment(
            &tx,
            player_id,
            &assessment,
            Utc::now().naive_utc(),
        )
        .with_context(|| write_context("record", "assessment"))?;
        tx.commit()?;

        info!(
            "Recorded {} assessment {} for player {}",
            saved.role.as_str(),
            saved.id,
            player_id
        );
        Ok(saved)
    }
}

impl EventSource for EventStore {
    fn actions_for(&self, player_id: PlayerId, match_id: MatchId) -> Result<Vec<Action>> {
        let conn = self.conn()?;
        ensure_player(&conn, player_id)?;
        ensure_match(&conn, match_id)?;

        let actions = database::actions::list_for_player_in_match(&conn, player_id, match_id)?;
        debug!(
            "Read {} actions for player {} in match {}",
            actions.len(),
            player_id,
            match_id
        );
        Ok(actions)
    }

    fn matches_for_player(&self, player_id: PlayerId, season: Season) -> Result<Vec<Match>> {
        let conn = self.conn()?;
        ensure_player(&conn, player_id)?;

        let matches = database::matches::list_for_player(&conn, player_id, season)?;
        debug!(
            "Player {} has {} matches in season {}",
            player_id,
            matches.len(),
            season
        );
        Ok(matches)
    }

    fn assessments_for_player(&self, player_id: PlayerId) -> Result<Vec<Assessment>> {
        let conn = self.conn()?;
        ensure_player(&conn, player_id)?;

        let assessments = database::assessments::list_by_player(&conn, player_id)?;
        debug!("Read {} assessments for player {}", assessments.len(), player_id);
        Ok(assessments)
    }
}

/// Checks and the write that depends on them run under one write lock
fn write_transaction(conn: &mut DbConn) -> Result<Transaction<'_>> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .context("Failed to begin write transaction")
}

fn load_player(conn: &Connection, id: PlayerId) -> Result<Player> {
    database::players::find_by_id(conn, id)
        .with_context(|| read_context("player", id))?
        .ok_or_else(|| StoreError::player_not_found(id).into())
}

fn load_match(conn: &Connection, id: MatchId) -> Result<Match> {
    database::matches::find_by_id(conn, id)
        .with_context(|| read_context("match", id))?
        .ok_or_else(|| StoreError::match_not_found(id).into())
}

fn ensure_player(conn: &Connection, id: PlayerId) -> Result<()> {
    if database::players::exists(conn, id)? {
        Ok(())
    } else {
        Err(StoreError::player_not_found(id).into())
    }
}

fn ensure_match(conn: &Connection, id: MatchId) -> Result<()> {
    if database::matches::exists(conn, id)? {
        Ok(())
    } else {
        Err(StoreError::match_not_found(id).into())
    }
}

fn dangling(record: &'static str, entity: &'static str, id: i64) -> anyhow::Error {
    StoreError::DanglingReference { record, entity, id }.into()
}
