//! Persisted player records
//!
//! A `PlayerEntity` is the canonical stored player together with its child
//! collections. Child rows are keyed by (player, discriminator): stats by
//! `StatsType`, league statuses by league slot, positions by code.

use fbps_common::models::{
    BattingStats, LeagueStatus, PitchingStats, PlayerStatus, PlayerType, StatsType,
};
use uuid::Uuid;

/// Stored player with its child collections
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerEntity {
    /// Assigned by the store on insert; `None` until then
    pub id: Option<Uuid>,
    pub bhq_id: i32,
    pub player_type: PlayerType,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    /// Denormalized code of `mlb_team`
    pub team: String,
    pub status: PlayerStatus,
    pub draft_rank: i32,
    pub average_draft_pick: i32,
    pub highest_pick: i32,
    pub drafted_percentage: f64,
    pub reliability: f64,
    pub mayberry_method: i32,
    pub league_statuses: Vec<LeagueStatusEntity>,
    pub batting_stats: Vec<BattingStatsEntity>,
    pub pitching_stats: Vec<PitchingStatsEntity>,
    pub mlb_team: Option<MlbTeamEntity>,
    pub positions: Vec<PlayerPositionEntity>,
}

/// One batting snapshot row
#[derive(Debug, Clone, PartialEq)]
pub struct BattingStatsEntity {
    pub stats_type: StatsType,
    pub stats: BattingStats,
}

/// One pitching snapshot row
#[derive(Debug, Clone, PartialEq)]
pub struct PitchingStatsEntity {
    pub stats_type: StatsType,
    pub stats: PitchingStats,
}

/// Non-default status in one league slot
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueStatusEntity {
    pub league_id: i32,
    pub league_status: LeagueStatus,
}

/// Position membership, carrying the catalog sort order for display
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPositionEntity {
    pub position_code: String,
    pub sort_order: i32,
}

/// Position catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct PositionEntity {
    pub code: String,
    pub full_name: String,
    pub player_type: PlayerType,
    pub sort_order: i32,
}

/// Team catalog entry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MlbTeamEntity {
    pub code: String,
    pub alternative_code: Option<String>,
    pub mlb_league_id: String,
    pub city: String,
    pub nickname: String,
}

/// Child row the store must delete when persisting a reconciled player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRemoval {
    BattingStats(StatsType),
    PitchingStats(StatsType),
    LeagueStatus(i32),
}

impl PlayerEntity {
    pub fn batting(&self, stats_type: StatsType) -> Option<&BattingStatsEntity> {
        self.batting_stats.iter().find(|s| s.stats_type == stats_type)
    }

    pub fn pitching(&self, stats_type: StatsType) -> Option<&PitchingStatsEntity> {
        self.pitching_stats.iter().find(|s| s.stats_type == stats_type)
    }

    /// Status in a league slot; absence reads as `Available`
    pub fn league_status(&self, league_id: i32) -> LeagueStatus {
        self.league_statuses
            .iter()
            .find(|s| s.league_id == league_id)
            .map(|s| s.league_status)
            .unwrap_or_default()
    }
}

/// Merge result ready to persist
///
/// `removals` lists child rows present before the merge that no longer
/// qualify to exist; the store issues explicit deletes for them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledPlayer {
    pub entity: PlayerEntity,
    pub removals: Vec<ChildRemoval>,
}
