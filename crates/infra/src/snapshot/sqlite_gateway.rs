//! Relational gateway
//!
//! Stores profiles in a `profiles` table and each retained match in
//! `scores`. A save replaces both tables inside one transaction, so readers
//! of the database only ever see a whole snapshot.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use copion_core::PersistenceGateway;
use copion_domain::{
    Difficulty, MatchRecord, MatchResult, Preferences, Profile, Result as DomainResult, Snapshot,
    Stats,
};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OpenFlags, Row, Transaction};
use tokio::task;
use tracing::{debug, warn};

use crate::database::DbManager;
use crate::errors::conversions::to_domain;

/// SQLite-backed implementation of `PersistenceGateway`
pub struct SqliteSnapshotGateway {
    db: Arc<DbManager>,
}

impl SqliteSnapshotGateway {
    /// Wrap an existing manager; the schema must already exist.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    /// Open the database at `path` and make sure the schema exists.
    ///
    /// A file that SQLite rejects as corrupt or not a database is renamed
    /// to `<name>.corrupt-<unix time>` and a fresh database is created in
    /// its place.
    ///
    /// # Errors
    /// `CopionError::Database` if the location cannot hold a database at all.
    pub fn open(path: impl AsRef<Path>, pool_size: u32) -> DomainResult<Self> {
        let path = path.as_ref();
        quarantine_unreadable(path)?;

        let db = DbManager::new(path, pool_size)?;
        db.run_migrations()?;
        Ok(Self::new(Arc::new(db)))
    }
}

fn quarantine_unreadable(path: &Path) -> DomainResult<()> {
    if !path.is_file() {
        return Ok(());
    }

    let probe = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE).and_then(
        |conn| conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0)),
    );

    let Err(err) = probe else { return Ok(()) };
    if !matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt)
    ) {
        return Ok(());
    }

    let mut aside = path.file_name().unwrap_or_default().to_os_string();
    aside.push(format!(".corrupt-{}", Utc::now().timestamp()));
    let aside = path.with_file_name(aside);

    warn!(
        db_path = %path.display(),
        moved_to = %aside.display(),
        error = %err,
        "unreadable database moved aside, starting empty"
    );
    fs::rename(path, &aside).map_err(to_domain)
}

#[async_trait]
impl PersistenceGateway for SqliteSnapshotGateway {
    async fn load(&self) -> Snapshot {
        let db = Arc::clone(&self.db);
        let result = task::spawn_blocking(move || read_snapshot(&db))
            .await
            .map_err(to_domain)
            .and_then(|inner| inner);

        match result {
            Ok(snapshot) => {
                debug!(profiles = snapshot.len(), "snapshot read from sqlite");
                snapshot
            }
            Err(err) => {
                warn!(db_path = %self.db.path().display(), error = %err, "unreadable database, starting empty");
                Snapshot::default()
            }
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let snapshot = snapshot.clone();

        task::spawn_blocking(move || write_snapshot(&db, &snapshot)).await.map_err(to_domain)?
    }

    async fn health_check(&self) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || db.health_check()).await.map_err(to_domain)?
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.db.path().display())
    }
}

// =============================================================================
// Reads
// =============================================================================

fn read_snapshot(db: &DbManager) -> DomainResult<Snapshot> {
    let conn = db.get_connection()?;

    let mut profiles = {
        let mut stmt = conn
            .prepare(
                "SELECT id, username, email, avatar, difficulty, grid_rows, grid_cols, time_secs,
                        sound, games_played, wins, losses, total_score, best_streak
                 FROM profiles ORDER BY position",
            )
            .map_err(to_domain)?;
        let rows = stmt.query_map([], map_profile_row).map_err(to_domain)?;
        rows.collect::<rusqlite::Result<Vec<Profile>>>().map_err(to_domain)?
    };

    let index: HashMap<String, usize> =
        profiles.iter().enumerate().map(|(i, profile)| (profile.id.clone(), i)).collect();

    let mut stmt = conn
        .prepare(
            "SELECT profile_id, match_id, score, result, difficulty, level, duration_sec,
                    grid_rows, grid_cols, created_at
             FROM scores ORDER BY profile_id, position",
        )
        .map_err(to_domain)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, map_score_row(row)?)))
        .map_err(to_domain)?;

    for row in rows {
        let (profile_id, record) = row.map_err(to_domain)?;
        match index.get(&profile_id) {
            Some(&i) => profiles[i].history.push(record),
            None => warn!(profile_id = %profile_id, "skipping score row for unknown profile"),
        }
    }

    Ok(Snapshot::new(profiles))
}

fn map_profile_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        avatar: row.get(3)?,
        preferences: Preferences {
            difficulty: Difficulty::from(row.get::<_, String>(4)?),
            rows: row.get(5)?,
            cols: row.get(6)?,
            time: row.get(7)?,
            sound: row.get(8)?,
        },
        stats: Stats {
            games_played: get_count(row, 9)?,
            wins: get_count(row, 10)?,
            losses: get_count(row, 11)?,
            total_score: row.get(12)?,
            best_streak: get_count(row, 13)?,
        },
        history: Vec::new(),
    })
}

/// Columns are offset by one: index 0 is the owning profile id.
fn map_score_row(row: &Row<'_>) -> rusqlite::Result<MatchRecord> {
    let result: String = row.get(3)?;
    let result = result
        .parse::<MatchResult>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    let created_at: String = row.get(9)?;
    let timestamp = DateTime::parse_from_rfc3339(&created_at)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?;

    Ok(MatchRecord {
        id: row.get(1)?,
        timestamp,
        score: row.get(2)?,
        result,
        difficulty: row.get::<_, Option<String>>(4)?.map(Difficulty::from),
        level: row.get(5)?,
        duration_sec: row.get(6)?,
        rows: row.get(7)?,
        cols: row.get(8)?,
    })
}

fn get_count(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(idx)?;
    u64::try_from(value).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, value))
}

// =============================================================================
// Writes
// =============================================================================

fn write_snapshot(db: &DbManager, snapshot: &Snapshot) -> DomainResult<()> {
    let mut conn = db.get_connection()?;
    let tx = conn.transaction().map_err(to_domain)?;

    tx.execute_batch("DELETE FROM scores; DELETE FROM profiles;").map_err(to_domain)?;
    insert_profiles(&tx, &snapshot.profiles).map_err(to_domain)?;

    tx.commit().map_err(to_domain)
}

fn insert_profiles(tx: &Transaction<'_>, profiles: &[Profile]) -> rusqlite::Result<()> {
    let mut profile_stmt = tx.prepare(
        "INSERT INTO profiles (id, position, username, email, avatar, difficulty, grid_rows,
                               grid_cols, time_secs, sound, games_played, wins, losses,
                               total_score, best_streak)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
    )?;
    let mut score_stmt = tx.prepare(
        "INSERT INTO scores (profile_id, position, match_id, score, result, difficulty, level,
                             duration_sec, grid_rows, grid_cols, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )?;

    for (position, profile) in profiles.iter().enumerate() {
        let prefs = &profile.preferences;
        let stats = &profile.stats;
        profile_stmt.execute(params![
            profile.id,
            to_sql_int(position)?,
            profile.username,
            profile.email,
            profile.avatar,
            prefs.difficulty.as_str(),
            prefs.rows,
            prefs.cols,
            prefs.time,
            prefs.sound,
            to_sql_int(stats.games_played)?,
            to_sql_int(stats.wins)?,
            to_sql_int(stats.losses)?,
            stats.total_score,
            to_sql_int(stats.best_streak)?,
        ])?;

        for (position, record) in profile.history.iter().enumerate() {
            score_stmt.execute(params![
                profile.id,
                to_sql_int(position)?,
                record.id,
                record.score,
                record.result.as_str(),
                record.difficulty.as_ref().map(Difficulty::as_str),
                record.level,
                record.duration_sec,
                record.rows,
                record.cols,
                record.timestamp.to_rfc3339(),
            ])?;
        }
    }

    Ok(())
}

fn to_sql_int<T>(value: T) -> rusqlite::Result<i64>
where
    T: TryInto<i64> + Copy,
    T::Error: std::error::Error + Send + Sync + 'static,
{
    value.try_into().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}
