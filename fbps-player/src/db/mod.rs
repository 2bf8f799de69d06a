//! Database access layer for fbps-player
//!
//! Schema creation, catalog seeding and migrations live in `fbps_common::db`;
//! this module holds the player record types and the store operations the
//! services run inside their transactions.

pub mod catalog;
pub mod entities;
pub mod players;

pub use catalog::ReferenceCatalogs;
pub use entities::{
    BattingStatsEntity, ChildRemoval, LeagueStatusEntity, MlbTeamEntity, PitchingStatsEntity,
    PlayerEntity, PlayerPositionEntity, PositionEntity, ReconciledPlayer,
};
pub use players::{
    find_player_by_id, find_player_by_natural_key, insert_players, list_players, update_players,
};
