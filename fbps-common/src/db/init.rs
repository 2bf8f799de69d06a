//! Database initialization
//!
//! Opens (or creates) the player database, creates every table idempotently,
//! seeds the reference catalogs and applies pending migrations.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Foreign keys must be enabled per connection, so they go on the
    // connect options rather than a one-off PRAGMA against the pool
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create tables, seed catalogs and run migrations (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_schema_version_table(pool).await?;

    // Reference catalogs
    create_mlb_teams_table(pool).await?;
    create_positions_table(pool).await?;

    // Player and child tables
    create_players_table(pool).await?;
    create_batting_stats_table(pool).await?;
    create_pitching_stats_table(pool).await?;
    create_league_statuses_table(pool).await?;
    create_player_positions_table(pool).await?;

    crate::db::catalog_seed::seed_reference_catalogs(pool).await?;

    crate::db::migrations::run_migrations(pool).await?;

    Ok(())
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the mlb_teams table
///
/// The free-agent sentinel is the row with an empty code.
pub async fn create_mlb_teams_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mlb_teams (
            code TEXT PRIMARY KEY CHECK (length(code) <= 3),
            alternative_code TEXT CHECK (length(alternative_code) <= 3),
            mlb_league_id TEXT,
            city TEXT,
            nickname TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the positions table
pub async fn create_positions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS positions (
            code TEXT PRIMARY KEY CHECK (length(code) <= 3),
            full_name TEXT,
            player_type TEXT NOT NULL,
            sort_order INTEGER NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the players table
///
/// (bhq_id, player_type) is the natural key used when the caller does not
/// know the stored identity.
pub async fn create_players_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS players (
            id TEXT PRIMARY KEY,
            bhq_id INTEGER NOT NULL,
            player_type TEXT NOT NULL,
            first_name TEXT NOT NULL DEFAULT '',
            last_name TEXT NOT NULL DEFAULT '',
            age INTEGER NOT NULL DEFAULT 0,
            team TEXT NOT NULL REFERENCES mlb_teams(code),
            status TEXT NOT NULL DEFAULT '',
            draft_rank INTEGER NOT NULL DEFAULT 0,
            average_draft_pick INTEGER NOT NULL DEFAULT 0,
            highest_pick INTEGER NOT NULL DEFAULT 0,
            drafted_percentage REAL NOT NULL DEFAULT 0,
            reliability REAL NOT NULL DEFAULT 0,
            mayberry_method INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CONSTRAINT player_bhq_ak UNIQUE (bhq_id, player_type)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the batting_stats table (one row per player per stats type)
pub async fn create_batting_stats_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS batting_stats (
            player_id TEXT NOT NULL REFERENCES players(id) ON DELETE CASCADE,
            stats_type TEXT NOT NULL,
            at_bats INTEGER NOT NULL DEFAULT 0,
            runs INTEGER NOT NULL DEFAULT 0,
            hits INTEGER NOT NULL DEFAULT 0,
            doubles INTEGER NOT NULL DEFAULT 0,
            triples INTEGER NOT NULL DEFAULT 0,
            home_runs INTEGER NOT NULL DEFAULT 0,
            runs_batted_in INTEGER NOT NULL DEFAULT 0,
            base_on_balls INTEGER NOT NULL DEFAULT 0,
            strike_outs INTEGER NOT NULL DEFAULT 0,
            stolen_bases INTEGER NOT NULL DEFAULT 0,
            caught_stealing INTEGER NOT NULL DEFAULT 0,
            power REAL NOT NULL DEFAULT 0,
            speed REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (player_id, stats_type)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the pitching_stats table (one row per player per stats type)
pub async fn create_pitching_stats_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pitching_stats (
            player_id TEXT NOT NULL REFERENCES players(id) ON DELETE CASCADE,
            stats_type TEXT NOT NULL,
            wins INTEGER NOT NULL DEFAULT 0,
            losses INTEGER NOT NULL DEFAULT 0,
            quality_starts INTEGER NOT NULL DEFAULT 0,
            saves INTEGER NOT NULL DEFAULT 0,
            blown_saves INTEGER NOT NULL DEFAULT 0,
            holds INTEGER NOT NULL DEFAULT 0,
            innings_pitched REAL NOT NULL DEFAULT 0,
            hits_allowed INTEGER NOT NULL DEFAULT 0,
            earned_runs INTEGER NOT NULL DEFAULT 0,
            home_runs_allowed INTEGER NOT NULL DEFAULT 0,
            base_on_balls_allowed INTEGER NOT NULL DEFAULT 0,
            strike_outs INTEGER NOT NULL DEFAULT 0,
            fly_ball_rate REAL NOT NULL DEFAULT 0,
            ground_ball_rate REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (player_id, stats_type)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the league_statuses table
///
/// Rows exist only for non-default statuses.
pub async fn create_league_statuses_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS league_statuses (
            player_id TEXT NOT NULL REFERENCES players(id) ON DELETE CASCADE,
            league_id INTEGER NOT NULL,
            league_status TEXT NOT NULL,
            PRIMARY KEY (player_id, league_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the player_positions linking table
pub async fn create_player_positions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS player_positions (
            player_id TEXT NOT NULL REFERENCES players(id) ON DELETE CASCADE,
            position_code TEXT NOT NULL REFERENCES positions(code) ON DELETE CASCADE,
            PRIMARY KEY (player_id, position_code)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_player_positions_position_code ON player_positions(position_code)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
