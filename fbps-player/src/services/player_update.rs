//! Single player update

use fbps_common::{BaseballPlayer, Error, Result};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::catalog::ReferenceCatalogs;
use crate::db::players;
use crate::services::entity_merger::merge_player_entity;
use crate::services::upsert_players::persist_reconciled;

pub const PLAYER_NOT_FOUND: &str = "This player does not exist";

/// Update one stored player identified by `player.id`
///
/// Fails with `NotFound` before any transaction is opened when no player
/// has that id.
pub async fn update_player(db: &SqlitePool, player: BaseballPlayer) -> Result<()> {
    let existing = {
        let mut conn = db.acquire().await?;
        players::find_player_by_id(&mut conn, player.id).await?
    };

    let Some(existing) = existing else {
        return Err(Error::NotFound(PLAYER_NOT_FOUND.to_string()));
    };

    let mut tx = db.begin().await?;

    let result = async {
        let catalogs = ReferenceCatalogs::load(&mut tx).await?;
        let merged = merge_player_entity(
            Some(&player),
            Some(existing),
            &catalogs.positions,
            &catalogs.teams,
        );
        persist_reconciled(&mut tx, merged.into_iter().collect()).await
    }
    .await;

    match result {
        Ok(_) => {
            tx.commit().await?;
            info!(player_id = %player.id, "Player updated");
            Ok(())
        }
        Err(e) => {
            warn!(player_id = %player.id, error = %e, "Player update failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(e)
        }
    }
}
