//! Integration tests for player upsert and update against a real database
//!
//! Covers:
//! - Inserting new players and updating them by natural key or id
//! - Child row removal when stats or league statuses become inactive
//! - Default position and team resolution with the seeded catalogs
//! - Whole-batch rollback on a natural key collision
//! - Single player update of a missing player

use fbps_common::db::init_database;
use fbps_common::models::{LeagueStatus, PlayerStatus, PlayerType};
use fbps_common::{BaseballPlayer, BattingStats, Error, PitchingStats};
use fbps_player::services::{get_players, update_player, UpsertPlayersService, UpsertSummary};
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

async fn setup_test_db() -> (TempDir, SqlitePool) {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("players.db")).await.unwrap();
    (temp_dir, pool)
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

fn batter(bhq_id: i32) -> BaseballPlayer {
    BaseballPlayer {
        bhq_id,
        first_name: "Mookie".to_string(),
        last_name: "Betts".to_string(),
        age: 31,
        player_type: PlayerType::Batter,
        positions: "ss-of".to_string(),
        team: "la".to_string(),
        status: PlayerStatus::Normal,
        league1: LeagueStatus::Rostered,
        league2: LeagueStatus::Unavailable,
        draft_rank: 5,
        average_draft_pick: 6,
        highest_pick: 2,
        drafted_percentage: 1.0,
        reliability: 0.9,
        mayberry_method: 5,
        year_to_date_batting_stats: BattingStats { at_bats: 300, runs: 75, home_runs: 20, ..Default::default() },
        projected_batting_stats: BattingStats { at_bats: 250, runs: 40, base_on_balls: 30, ..Default::default() },
        ..Default::default()
    }
}

fn pitcher(bhq_id: i32) -> BaseballPlayer {
    BaseballPlayer {
        bhq_id,
        first_name: "Clayton".to_string(),
        last_name: "Kershaw".to_string(),
        player_type: PlayerType::Pitcher,
        team: "LAD".to_string(),
        projected_pitching_stats: PitchingStats { innings_pitched: 150.0, wins: 12, ..Default::default() },
        ..Default::default()
    }
}

async fn upsert(pool: &SqlitePool, players: Vec<BaseballPlayer>) -> fbps_common::Result<UpsertSummary> {
    UpsertPlayersService::new(pool.clone()).upsert_players(Some(players)).await
}

async fn only_player(pool: &SqlitePool) -> BaseballPlayer {
    let mut players = get_players(pool).await.unwrap();
    assert_eq!(players.len(), 1);
    players.remove(0)
}

#[tokio::test]
async fn test_new_player_is_inserted_with_all_data() {
    let (_dir, pool) = setup_test_db().await;

    let summary = upsert(&pool, vec![batter(7)]).await.unwrap();
    assert_eq!(summary, UpsertSummary { inserted: 1, updated: 0 });

    let stored = only_player(&pool).await;
    assert!(!stored.id.is_nil());
    assert_eq!(stored.bhq_id, 7);
    assert_eq!(stored.player_type, PlayerType::Batter);
    assert_eq!(stored.first_name, "Mookie");
    assert_eq!(stored.age, 31);
    assert_eq!(stored.positions, "SS-OF");
    assert_eq!(stored.team, "LAD");
    assert_eq!(stored.league1, LeagueStatus::Rostered);
    assert_eq!(stored.league2, LeagueStatus::Unavailable);
    assert_eq!(stored.year_to_date_batting_stats.home_runs, 20);
    assert_eq!(stored.projected_batting_stats.base_on_balls, 30);
    assert_eq!(stored.combined_batting_stats.at_bats, 550);
    assert_eq!(stored.combined_batting_stats.runs, 115);
    assert_eq!(stored.year_to_date_pitching_stats, PitchingStats::default());

    assert_eq!(count(&pool, "batting_stats").await, 2);
    assert_eq!(count(&pool, "pitching_stats").await, 0);
    assert_eq!(count(&pool, "league_statuses").await, 2);
}

#[tokio::test]
async fn test_natural_key_match_updates_in_place() {
    let (_dir, pool) = setup_test_db().await;
    upsert(&pool, vec![batter(7)]).await.unwrap();
    let original_id = only_player(&pool).await.id;

    let mut changed = batter(7);
    changed.age = 32;
    changed.positions = "C".to_string();
    let summary = upsert(&pool, vec![changed]).await.unwrap();
    assert_eq!(summary, UpsertSummary { inserted: 0, updated: 1 });

    let stored = only_player(&pool).await;
    assert_eq!(stored.id, original_id);
    assert_eq!(stored.age, 32);
    assert_eq!(stored.positions, "C");
    assert_eq!(count(&pool, "player_positions").await, 1);
}

#[tokio::test]
async fn test_same_bhq_id_with_other_type_is_a_new_player() {
    let (_dir, pool) = setup_test_db().await;
    upsert(&pool, vec![batter(7)]).await.unwrap();

    let summary = upsert(&pool, vec![pitcher(7)]).await.unwrap();
    assert_eq!(summary.inserted, 1);
    assert_eq!(count(&pool, "players").await, 2);
}

#[tokio::test]
async fn test_update_by_id_removes_inactive_children() {
    let (_dir, pool) = setup_test_db().await;
    upsert(&pool, vec![batter(7)]).await.unwrap();
    let stored = only_player(&pool).await;

    let mut changed = batter(7);
    changed.id = stored.id;
    changed.league1 = LeagueStatus::Available;
    changed.year_to_date_batting_stats = BattingStats { runs: 12, ..Default::default() };
    upsert(&pool, vec![changed]).await.unwrap();

    let stored = only_player(&pool).await;
    assert_eq!(stored.league1, LeagueStatus::Available);
    assert_eq!(stored.league2, LeagueStatus::Unavailable);
    assert_eq!(stored.year_to_date_batting_stats, BattingStats::default());
    assert_eq!(stored.combined_batting_stats, stored.projected_batting_stats);

    assert_eq!(count(&pool, "league_statuses").await, 1);
    assert_eq!(count(&pool, "batting_stats").await, 1);
}

#[tokio::test]
async fn test_unknown_id_is_inserted_under_new_identity() {
    let (_dir, pool) = setup_test_db().await;

    let mut player = batter(11);
    player.id = Uuid::new_v4();
    let summary = upsert(&pool, vec![player.clone()]).await.unwrap();
    assert_eq!(summary.inserted, 1);

    let stored = only_player(&pool).await;
    assert_ne!(stored.id, player.id);
}

#[tokio::test]
async fn test_default_positions_and_free_agent_team() {
    let (_dir, pool) = setup_test_db().await;

    let mut hitter = batter(1);
    hitter.positions = "XYZ".to_string();
    hitter.team = "Nowhere".to_string();
    let mut arm = pitcher(2);
    arm.positions = "XX".to_string();
    arm.team = " tam ".to_string();
    upsert(&pool, vec![hitter, arm]).await.unwrap();

    let players = get_players(&pool).await.unwrap();
    assert_eq!(players.len(), 2);

    // Batters sort before pitchers
    assert_eq!(players[0].positions, "DH");
    assert_eq!(players[0].team, "");
    assert_eq!(players[1].positions, "P");
    assert_eq!(players[1].team, "TB");
}

#[tokio::test]
async fn test_blank_positions_resolve_to_unknown() {
    let (_dir, pool) = setup_test_db().await;

    let mut hitter = batter(3);
    hitter.positions = String::new();
    upsert(&pool, vec![hitter]).await.unwrap();

    let stored = only_player(&pool).await;
    assert_eq!(stored.positions, "");
    assert_eq!(count(&pool, "player_positions").await, 1);
}

#[tokio::test]
async fn test_batch_rolls_back_on_natural_key_collision() {
    let (_dir, pool) = setup_test_db().await;
    upsert(&pool, vec![batter(50)]).await.unwrap();

    // Supplied id is unknown, so the natural key is never looked up and the
    // insert collides with the stored player
    let mut colliding = batter(50);
    colliding.id = Uuid::new_v4();

    let batch = vec![batter(51), batter(52), colliding, pitcher(53), batter(54)];
    let result = upsert(&pool, batch).await;

    assert!(matches!(result, Err(Error::Database(_))), "{:?}", result);
    assert_eq!(count(&pool, "players").await, 1);
    assert_eq!(count(&pool, "batting_stats").await, 2);
    assert_eq!(count(&pool, "player_positions").await, 2);
}

#[tokio::test]
async fn test_duplicate_natural_key_within_batch_fails() {
    let (_dir, pool) = setup_test_db().await;

    let result = upsert(&pool, vec![batter(60), batter(60)]).await;

    assert!(result.is_err());
    assert_eq!(count(&pool, "players").await, 0);
}

#[tokio::test]
async fn test_missing_players_rejected() {
    let (_dir, pool) = setup_test_db().await;

    let result = UpsertPlayersService::new(pool.clone()).upsert_players(None).await;

    match result {
        Err(Error::InvalidInput(msg)) => assert_eq!(msg, "Players not set"),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_batch_is_a_no_op() {
    let (_dir, pool) = setup_test_db().await;
    let summary = upsert(&pool, Vec::new()).await.unwrap();
    assert_eq!(summary, UpsertSummary::default());
}

#[tokio::test]
async fn test_update_player_applies_changes() {
    let (_dir, pool) = setup_test_db().await;
    upsert(&pool, vec![batter(7)]).await.unwrap();
    let mut stored = only_player(&pool).await;

    stored.last_name = "Updated".to_string();
    stored.league2 = LeagueStatus::Available;
    update_player(&pool, stored.clone()).await.unwrap();

    let reloaded = only_player(&pool).await;
    assert_eq!(reloaded.id, stored.id);
    assert_eq!(reloaded.last_name, "Updated");
    assert_eq!(reloaded.league2, LeagueStatus::Available);
    assert_eq!(count(&pool, "league_statuses").await, 1);
}

#[tokio::test]
async fn test_update_missing_player_is_not_found() {
    let (_dir, pool) = setup_test_db().await;

    let mut player = batter(7);
    player.id = Uuid::new_v4();
    let result = update_player(&pool, player).await;

    match result {
        Err(Error::NotFound(msg)) => assert_eq!(msg, "This player does not exist"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
    assert_eq!(count(&pool, "players").await, 0);
}
