//! Player store operations
//!
//! Lookups load a player together with every child collection. Writes take
//! a connection so callers can run them inside one transaction; nothing in
//! this module begins or commits a transaction on its own.

use std::collections::HashMap;

use fbps_common::models::{BattingStats, PitchingStats, PlayerType, StatsType};
use fbps_common::{uuid_utils, Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::entities::{
    BattingStatsEntity, ChildRemoval, LeagueStatusEntity, MlbTeamEntity, PitchingStatsEntity,
    PlayerEntity, PlayerPositionEntity, ReconciledPlayer,
};

const PLAYER_SELECT: &str = r#"
    SELECT p.id, p.bhq_id, p.player_type, p.first_name, p.last_name, p.age, p.team,
           p.status, p.draft_rank, p.average_draft_pick, p.highest_pick,
           p.drafted_percentage, p.reliability, p.mayberry_method,
           t.code AS team_code, t.alternative_code AS team_alternative_code,
           t.mlb_league_id AS team_league, t.city AS team_city, t.nickname AS team_nickname
    FROM players p
    LEFT JOIN mlb_teams t ON t.code = p.team
"#;

// ========================================
// Reads
// ========================================

/// Every stored player with all child collections
pub async fn list_players(pool: &SqlitePool) -> Result<Vec<PlayerEntity>> {
    let mut conn = pool.acquire().await?;

    let rows = sqlx::query(PLAYER_SELECT).fetch_all(&mut *conn).await?;
    let mut players = rows
        .iter()
        .map(player_from_row)
        .collect::<Result<Vec<_>>>()?;

    attach_children(&mut conn, &mut players, None).await?;

    debug!(count = players.len(), "Loaded players");
    Ok(players)
}

/// Point lookup by stored identity
pub async fn find_player_by_id(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> Result<Option<PlayerEntity>> {
    let sql = format!("{} WHERE p.id = ?", PLAYER_SELECT);
    let row = sqlx::query(&sql)
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

    load_single(conn, row).await
}

/// Lookup by natural key (external id, kind)
pub async fn find_player_by_natural_key(
    conn: &mut SqliteConnection,
    bhq_id: i32,
    player_type: PlayerType,
) -> Result<Option<PlayerEntity>> {
    let sql = format!("{} WHERE p.bhq_id = ? AND p.player_type = ?", PLAYER_SELECT);
    let row = sqlx::query(&sql)
        .bind(bhq_id)
        .bind(player_type.code())
        .fetch_optional(&mut *conn)
        .await?;

    load_single(conn, row).await
}

async fn load_single(
    conn: &mut SqliteConnection,
    row: Option<SqliteRow>,
) -> Result<Option<PlayerEntity>> {
    let Some(row) = row else {
        return Ok(None);
    };

    let player = player_from_row(&row)?;
    let id = player.id.map(|id| id.to_string());
    let mut players = vec![player];
    attach_children(conn, &mut players, id.as_deref()).await?;

    Ok(players.pop())
}

fn player_from_row(row: &SqliteRow) -> Result<PlayerEntity> {
    let id: String = row.get("id");
    let player_type: String = row.get("player_type");
    let status: String = row.get("status");
    let team_code: Option<String> = row.get("team_code");

    let mlb_team = team_code.map(|code| MlbTeamEntity {
        code,
        alternative_code: row.get("team_alternative_code"),
        mlb_league_id: row.get::<Option<String>, _>("team_league").unwrap_or_default(),
        city: row.get::<Option<String>, _>("team_city").unwrap_or_default(),
        nickname: row.get::<Option<String>, _>("team_nickname").unwrap_or_default(),
    });

    Ok(PlayerEntity {
        id: Some(uuid_utils::parse(&id)?),
        bhq_id: row.get("bhq_id"),
        player_type: player_type.parse()?,
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        age: row.get("age"),
        team: row.get("team"),
        status: status.parse()?,
        draft_rank: row.get("draft_rank"),
        average_draft_pick: row.get("average_draft_pick"),
        highest_pick: row.get("highest_pick"),
        drafted_percentage: row.get("drafted_percentage"),
        reliability: row.get("reliability"),
        mayberry_method: row.get("mayberry_method"),
        league_statuses: Vec::new(),
        batting_stats: Vec::new(),
        pitching_stats: Vec::new(),
        mlb_team,
        positions: Vec::new(),
    })
}

/// Fill child collections, restricted to one player when `player_id` is set
async fn attach_children(
    conn: &mut SqliteConnection,
    players: &mut [PlayerEntity],
    player_id: Option<&str>,
) -> Result<()> {
    let index: HashMap<String, usize> = players
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.id.map(|id| (id.to_string(), i)))
        .collect();

    let filter = if player_id.is_some() { " WHERE player_id = ?" } else { "" };

    for row in fetch_children(conn, &format!("SELECT * FROM batting_stats{}", filter), player_id).await? {
        if let Some(&i) = index.get(&row.get::<String, _>("player_id")) {
            players[i].batting_stats.push(batting_from_row(&row)?);
        }
    }

    for row in fetch_children(conn, &format!("SELECT * FROM pitching_stats{}", filter), player_id).await? {
        if let Some(&i) = index.get(&row.get::<String, _>("player_id")) {
            players[i].pitching_stats.push(pitching_from_row(&row)?);
        }
    }

    for row in fetch_children(conn, &format!("SELECT * FROM league_statuses{}", filter), player_id).await? {
        if let Some(&i) = index.get(&row.get::<String, _>("player_id")) {
            let status: String = row.get("league_status");
            players[i].league_statuses.push(LeagueStatusEntity {
                league_id: row.get("league_id"),
                league_status: status.parse()?,
            });
        }
    }

    let positions_sql = format!(
        r#"
        SELECT pp.player_id, pp.position_code, pos.sort_order
        FROM player_positions pp
        JOIN positions pos ON pos.code = pp.position_code{}
        "#,
        if player_id.is_some() { " WHERE pp.player_id = ?" } else { "" }
    );
    for row in fetch_children(conn, &positions_sql, player_id).await? {
        if let Some(&i) = index.get(&row.get::<String, _>("player_id")) {
            players[i].positions.push(PlayerPositionEntity {
                position_code: row.get("position_code"),
                sort_order: row.get("sort_order"),
            });
        }
    }

    Ok(())
}

async fn fetch_children(
    conn: &mut SqliteConnection,
    sql: &str,
    player_id: Option<&str>,
) -> Result<Vec<SqliteRow>> {
    let mut query = sqlx::query(sql);
    if let Some(id) = player_id {
        query = query.bind(id);
    }
    Ok(query.fetch_all(&mut *conn).await?)
}

fn batting_from_row(row: &SqliteRow) -> Result<BattingStatsEntity> {
    let stats_type: String = row.get("stats_type");
    Ok(BattingStatsEntity {
        stats_type: stats_type.parse()?,
        stats: BattingStats {
            at_bats: row.get("at_bats"),
            runs: row.get("runs"),
            hits: row.get("hits"),
            doubles: row.get("doubles"),
            triples: row.get("triples"),
            home_runs: row.get("home_runs"),
            runs_batted_in: row.get("runs_batted_in"),
            base_on_balls: row.get("base_on_balls"),
            strike_outs: row.get("strike_outs"),
            stolen_bases: row.get("stolen_bases"),
            caught_stealing: row.get("caught_stealing"),
            power: row.get("power"),
            speed: row.get("speed"),
        },
    })
}

fn pitching_from_row(row: &SqliteRow) -> Result<PitchingStatsEntity> {
    let stats_type: String = row.get("stats_type");
    Ok(PitchingStatsEntity {
        stats_type: stats_type.parse()?,
        stats: PitchingStats {
            wins: row.get("wins"),
            losses: row.get("losses"),
            quality_starts: row.get("quality_starts"),
            saves: row.get("saves"),
            blown_saves: row.get("blown_saves"),
            holds: row.get("holds"),
            innings_pitched: row.get("innings_pitched"),
            hits_allowed: row.get("hits_allowed"),
            earned_runs: row.get("earned_runs"),
            home_runs_allowed: row.get("home_runs_allowed"),
            base_on_balls_allowed: row.get("base_on_balls_allowed"),
            strike_outs: row.get("strike_outs"),
            fly_ball_rate: row.get("fly_ball_rate"),
            ground_ball_rate: row.get("ground_ball_rate"),
        },
    })
}

// ========================================
// Writes
// ========================================

/// Insert new players, assigning each a fresh identity
///
/// Returns the assigned identities in input order.
pub async fn insert_players(
    conn: &mut SqliteConnection,
    players: &mut [ReconciledPlayer],
) -> Result<Vec<Uuid>> {
    let mut ids = Vec::with_capacity(players.len());

    for reconciled in players.iter_mut() {
        let id = uuid_utils::generate();
        let player = &mut reconciled.entity;
        player.id = Some(id);

        sqlx::query(
            r#"
            INSERT INTO players (
                id, bhq_id, player_type, first_name, last_name, age, team, status,
                draft_rank, average_draft_pick, highest_pick, drafted_percentage,
                reliability, mayberry_method, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(id.to_string())
        .bind(player.bhq_id)
        .bind(player.player_type.code())
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(player.age)
        .bind(&player.team)
        .bind(player.status.code())
        .bind(player.draft_rank)
        .bind(player.average_draft_pick)
        .bind(player.highest_pick)
        .bind(player.drafted_percentage)
        .bind(player.reliability)
        .bind(player.mayberry_method)
        .execute(&mut *conn)
        .await?;

        write_children(conn, &id.to_string(), player).await?;
        ids.push(id);
    }

    Ok(ids)
}

/// Update existing players, applying child removals and child writes
pub async fn update_players(
    conn: &mut SqliteConnection,
    players: &[ReconciledPlayer],
) -> Result<()> {
    for reconciled in players {
        let player = &reconciled.entity;
        let id = player
            .id
            .ok_or_else(|| Error::Internal("Cannot update a player without identity".to_string()))?
            .to_string();

        let result = sqlx::query(
            r#"
            UPDATE players SET
                bhq_id = ?, player_type = ?, first_name = ?, last_name = ?, age = ?,
                team = ?, status = ?, draft_rank = ?, average_draft_pick = ?,
                highest_pick = ?, drafted_percentage = ?, reliability = ?,
                mayberry_method = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(player.bhq_id)
        .bind(player.player_type.code())
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(player.age)
        .bind(&player.team)
        .bind(player.status.code())
        .bind(player.draft_rank)
        .bind(player.average_draft_pick)
        .bind(player.highest_pick)
        .bind(player.drafted_percentage)
        .bind(player.reliability)
        .bind(player.mayberry_method)
        .bind(&id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::Internal(format!("Player {} vanished during update", id)));
        }

        for removal in &reconciled.removals {
            apply_removal(conn, &id, *removal).await?;
        }

        write_children(conn, &id, player).await?;
    }

    Ok(())
}

async fn apply_removal(conn: &mut SqliteConnection, id: &str, removal: ChildRemoval) -> Result<()> {
    let query = match removal {
        ChildRemoval::BattingStats(stats_type) => {
            sqlx::query("DELETE FROM batting_stats WHERE player_id = ? AND stats_type = ?")
                .bind(id)
                .bind(stats_type.code())
        }
        ChildRemoval::PitchingStats(stats_type) => {
            sqlx::query("DELETE FROM pitching_stats WHERE player_id = ? AND stats_type = ?")
                .bind(id)
                .bind(stats_type.code())
        }
        ChildRemoval::LeagueStatus(league_id) => {
            sqlx::query("DELETE FROM league_statuses WHERE player_id = ? AND league_id = ?")
                .bind(id)
                .bind(league_id)
        }
    };

    query.execute(&mut *conn).await?;
    debug!(player_id = id, ?removal, "Removed child row");
    Ok(())
}

/// Upsert stats and league rows, replace position membership
async fn write_children(conn: &mut SqliteConnection, id: &str, player: &PlayerEntity) -> Result<()> {
    for batting in &player.batting_stats {
        upsert_batting(conn, id, batting.stats_type, &batting.stats).await?;
    }

    for pitching in &player.pitching_stats {
        upsert_pitching(conn, id, pitching.stats_type, &pitching.stats).await?;
    }

    for status in &player.league_statuses {
        sqlx::query(
            r#"
            INSERT INTO league_statuses (player_id, league_id, league_status)
            VALUES (?, ?, ?)
            ON CONFLICT(player_id, league_id) DO UPDATE SET
                league_status = excluded.league_status
            "#,
        )
        .bind(id)
        .bind(status.league_id)
        .bind(status.league_status.code())
        .execute(&mut *conn)
        .await?;
    }

    sqlx::query("DELETE FROM player_positions WHERE player_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    for position in &player.positions {
        sqlx::query("INSERT INTO player_positions (player_id, position_code) VALUES (?, ?)")
            .bind(id)
            .bind(&position.position_code)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

async fn upsert_batting(
    conn: &mut SqliteConnection,
    id: &str,
    stats_type: StatsType,
    stats: &BattingStats,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO batting_stats (
            player_id, stats_type, at_bats, runs, hits, doubles, triples, home_runs,
            runs_batted_in, base_on_balls, strike_outs, stolen_bases, caught_stealing,
            power, speed
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(player_id, stats_type) DO UPDATE SET
            at_bats = excluded.at_bats,
            runs = excluded.runs,
            hits = excluded.hits,
            doubles = excluded.doubles,
            triples = excluded.triples,
            home_runs = excluded.home_runs,
            runs_batted_in = excluded.runs_batted_in,
            base_on_balls = excluded.base_on_balls,
            strike_outs = excluded.strike_outs,
            stolen_bases = excluded.stolen_bases,
            caught_stealing = excluded.caught_stealing,
            power = excluded.power,
            speed = excluded.speed
        "#,
    )
    .bind(id)
    .bind(stats_type.code())
    .bind(stats.at_bats)
    .bind(stats.runs)
    .bind(stats.hits)
    .bind(stats.doubles)
    .bind(stats.triples)
    .bind(stats.home_runs)
    .bind(stats.runs_batted_in)
    .bind(stats.base_on_balls)
    .bind(stats.strike_outs)
    .bind(stats.stolen_bases)
    .bind(stats.caught_stealing)
    .bind(stats.power)
    .bind(stats.speed)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn upsert_pitching(
    conn: &mut SqliteConnection,
    id: &str,
    stats_type: StatsType,
    stats: &PitchingStats,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO pitching_stats (
            player_id, stats_type, wins, losses, quality_starts, saves, blown_saves, holds,
            innings_pitched, hits_allowed, earned_runs, home_runs_allowed,
            base_on_balls_allowed, strike_outs, fly_ball_rate, ground_ball_rate
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(player_id, stats_type) DO UPDATE SET
            wins = excluded.wins,
            losses = excluded.losses,
            quality_starts = excluded.quality_starts,
            saves = excluded.saves,
            blown_saves = excluded.blown_saves,
            holds = excluded.holds,
            innings_pitched = excluded.innings_pitched,
            hits_allowed = excluded.hits_allowed,
            earned_runs = excluded.earned_runs,
            home_runs_allowed = excluded.home_runs_allowed,
            base_on_balls_allowed = excluded.base_on_balls_allowed,
            strike_outs = excluded.strike_outs,
            fly_ball_rate = excluded.fly_ball_rate,
            ground_ball_rate = excluded.ground_ball_rate
        "#,
    )
    .bind(id)
    .bind(stats_type.code())
    .bind(stats.wins)
    .bind(stats.losses)
    .bind(stats.quality_starts)
    .bind(stats.saves)
    .bind(stats.blown_saves)
    .bind(stats.holds)
    .bind(stats.innings_pitched)
    .bind(stats.hits_allowed)
    .bind(stats.earned_runs)
    .bind(stats.home_runs_allowed)
    .bind(stats.base_on_balls_allowed)
    .bind(stats.strike_outs)
    .bind(stats.fly_ball_rate)
    .bind(stats.ground_ball_rate)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
