//! Player service operations
//!
//! `entity_merger`, `player_builder` and `sort` are pure; the remaining
//! modules drive them against the store.

pub mod entity_merger;
pub mod get_players;
pub mod player_builder;
pub mod player_update;
pub mod sort;
pub mod upsert_players;

pub use entity_merger::merge_player_entity;
pub use get_players::get_players;
pub use player_builder::build_baseball_player;
pub use player_update::{update_player, PLAYER_NOT_FOUND};
pub use sort::sort_players;
pub use upsert_players::{UpsertPlayersService, UpsertSummary, PLAYERS_NOT_SET};
