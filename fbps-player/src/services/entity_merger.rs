//! Entity merging
//!
//! Reconciles an incoming `BaseballPlayer` with the stored `PlayerEntity`
//! (if any) against one snapshot of the reference catalogs.
//!
//! **Merge strategy:**
//! - Scalars: incoming always wins
//! - Stat snapshots: kept iff valid, otherwise removed
//! - League statuses: kept iff not `Available`, otherwise removed
//! - Positions: replaced wholesale; never left empty
//! - Team: resolved by code, then alternate code, then the free-agent sentinel

use std::collections::HashSet;

use fbps_common::models::{
    BattingStats, LeagueStatus, PitchingStats, PlayerType, StatsType,
};
use fbps_common::BaseballPlayer;
use tracing::warn;

use crate::db::entities::{
    BattingStatsEntity, ChildRemoval, LeagueStatusEntity, MlbTeamEntity, PitchingStatsEntity,
    PlayerEntity, PlayerPositionEntity, PositionEntity, ReconciledPlayer,
};

const POSITION_DELIMITER: char = '-';

/// Merge an incoming player into its stored counterpart
///
/// Returns `None` when there is no incoming player. A fresh entity (no
/// identity) is produced when `existing` is `None`.
pub fn merge_player_entity(
    incoming: Option<&BaseballPlayer>,
    existing: Option<PlayerEntity>,
    positions: &[PositionEntity],
    teams: &[MlbTeamEntity],
) -> Option<ReconciledPlayer> {
    let incoming = incoming?;

    let mut entity = existing.unwrap_or_default();
    let mut removals = Vec::new();

    merge_scalars(incoming, &mut entity);

    merge_batting(&mut entity, StatsType::YearToDate, &incoming.year_to_date_batting_stats, &mut removals);
    merge_batting(&mut entity, StatsType::Projected, &incoming.projected_batting_stats, &mut removals);
    merge_pitching(&mut entity, StatsType::YearToDate, &incoming.year_to_date_pitching_stats, &mut removals);
    merge_pitching(&mut entity, StatsType::Projected, &incoming.projected_pitching_stats, &mut removals);

    merge_league_status(&mut entity, 1, incoming.league1, &mut removals);
    merge_league_status(&mut entity, 2, incoming.league2, &mut removals);

    entity.positions = resolve_positions(&incoming.positions, entity.player_type, positions);

    let team = resolve_team(&incoming.team, teams);
    entity.team = team.code.clone();
    entity.mlb_team = Some(team);

    Some(ReconciledPlayer { entity, removals })
}

/// Batting snapshot is worth keeping
pub fn is_valid_batting(stats: &BattingStats) -> bool {
    stats.at_bats.wrapping_add(stats.base_on_balls) > 0
}

/// Pitching snapshot is worth keeping
pub fn is_valid_pitching(stats: &PitchingStats) -> bool {
    stats.innings_pitched
        + stats.fly_ball_rate
        + stats.ground_ball_rate
        + f64::from(stats.base_on_balls_allowed)
        > 0.0
}

fn merge_scalars(incoming: &BaseballPlayer, entity: &mut PlayerEntity) {
    entity.bhq_id = incoming.bhq_id;
    entity.player_type = incoming.player_type;
    entity.first_name = incoming.first_name.clone();
    entity.last_name = incoming.last_name.clone();
    entity.age = incoming.age;
    entity.status = incoming.status;
    entity.draft_rank = incoming.draft_rank;
    entity.average_draft_pick = incoming.average_draft_pick;
    entity.highest_pick = incoming.highest_pick;
    entity.drafted_percentage = incoming.drafted_percentage;
    entity.reliability = incoming.reliability;
    entity.mayberry_method = incoming.mayberry_method;
}

fn merge_batting(
    entity: &mut PlayerEntity,
    stats_type: StatsType,
    stats: &BattingStats,
    removals: &mut Vec<ChildRemoval>,
) {
    let existing = entity.batting_stats.iter().position(|s| s.stats_type == stats_type);

    match (is_valid_batting(stats), existing) {
        (true, Some(i)) => entity.batting_stats[i].stats = *stats,
        (true, None) => entity.batting_stats.push(BattingStatsEntity { stats_type, stats: *stats }),
        (false, Some(i)) => {
            entity.batting_stats.remove(i);
            removals.push(ChildRemoval::BattingStats(stats_type));
        }
        (false, None) => {}
    }
}

fn merge_pitching(
    entity: &mut PlayerEntity,
    stats_type: StatsType,
    stats: &PitchingStats,
    removals: &mut Vec<ChildRemoval>,
) {
    let existing = entity.pitching_stats.iter().position(|s| s.stats_type == stats_type);

    match (is_valid_pitching(stats), existing) {
        (true, Some(i)) => entity.pitching_stats[i].stats = *stats,
        (true, None) => entity.pitching_stats.push(PitchingStatsEntity { stats_type, stats: *stats }),
        (false, Some(i)) => {
            entity.pitching_stats.remove(i);
            removals.push(ChildRemoval::PitchingStats(stats_type));
        }
        (false, None) => {}
    }
}

fn merge_league_status(
    entity: &mut PlayerEntity,
    league_id: i32,
    status: LeagueStatus,
    removals: &mut Vec<ChildRemoval>,
) {
    let existing = entity.league_statuses.iter().position(|s| s.league_id == league_id);

    match (status, existing) {
        (LeagueStatus::Available, Some(i)) => {
            entity.league_statuses.remove(i);
            removals.push(ChildRemoval::LeagueStatus(league_id));
        }
        (LeagueStatus::Available, None) => {}
        (status, Some(i)) => entity.league_statuses[i].league_status = status,
        (status, None) => entity.league_statuses.push(LeagueStatusEntity { league_id, league_status: status }),
    }
}

/// Parse a `-` delimited position list into catalog memberships
///
/// Tokens absent from the catalog are dropped; a blank token matches the
/// `""` Unknown position when the catalog has one. When nothing survives,
/// the last-ranked position for the player's kind is used.
pub fn resolve_positions(
    raw: &str,
    player_type: PlayerType,
    catalog: &[PositionEntity],
) -> Vec<PlayerPositionEntity> {
    let mut seen = HashSet::new();
    let mut resolved: Vec<PlayerPositionEntity> = raw
        .split(POSITION_DELIMITER)
        .map(|token| token.trim().to_uppercase())
        .filter_map(|token| catalog.iter().find(|p| p.code == token))
        .filter(|p| seen.insert(p.code.clone()))
        .map(membership)
        .collect();

    if resolved.is_empty() {
        match default_position(player_type, catalog) {
            Some(position) => resolved.push(membership(position)),
            None => warn!(
                player_type = player_type.code(),
                "Position catalog has no default for player type"
            ),
        }
    }

    resolved
}

/// Highest-ranked position applicable to `player_type`, else the sentinel
fn default_position(player_type: PlayerType, catalog: &[PositionEntity]) -> Option<&PositionEntity> {
    catalog
        .iter()
        .filter(|p| p.player_type == player_type)
        .max_by_key(|p| p.sort_order)
        .or_else(|| catalog.iter().find(|p| p.code.is_empty()))
}

fn membership(position: &PositionEntity) -> PlayerPositionEntity {
    PlayerPositionEntity {
        position_code: position.code.clone(),
        sort_order: position.sort_order,
    }
}

/// Resolve a team code against the catalog
///
/// Matches the primary code first, then a non-blank alternate code, then
/// falls back to the free-agent sentinel (empty code).
pub fn resolve_team(raw: &str, catalog: &[MlbTeamEntity]) -> MlbTeamEntity {
    let code = raw.trim().to_uppercase();

    catalog
        .iter()
        .find(|t| t.code == code)
        .or_else(|| {
            catalog.iter().find(|t| {
                t.alternative_code
                    .as_deref()
                    .is_some_and(|alt| !alt.trim().is_empty() && alt == code)
            })
        })
        .or_else(|| catalog.iter().find(|t| t.code.is_empty()))
        .cloned()
        .unwrap_or_default()
}
