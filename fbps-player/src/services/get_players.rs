//! Player listing

use fbps_common::{BaseballPlayer, Result};
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::players;
use crate::services::player_builder::build_baseball_player;
use crate::services::sort::sort_players;

/// All stored players as consumer aggregates, sorted for display
pub async fn get_players(db: &SqlitePool) -> Result<Vec<BaseballPlayer>> {
    let entities = players::list_players(db).await?;

    let built = entities
        .iter()
        .map(|entity| build_baseball_player(Some(entity)))
        .collect();

    let sorted = sort_players(built);
    debug!(count = sorted.len(), "Built player list");
    Ok(sorted)
}
