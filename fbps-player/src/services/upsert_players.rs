//! Batch player upsert
//!
//! **Algorithm:**
//! 1. Begin transaction
//! 2. Load position and team catalogs once for the whole batch
//! 3. For each incoming player, find its stored counterpart (by id when one
//!    is supplied, else by natural key) and merge
//! 4. Insert players without identity, update the rest
//! 5. Commit; any failure rolls the whole batch back

use fbps_common::{BaseballPlayer, Error, Result};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::db::catalog::ReferenceCatalogs;
use crate::db::entities::{PlayerEntity, ReconciledPlayer};
use crate::db::players;
use crate::services::entity_merger::merge_player_entity;

pub const PLAYERS_NOT_SET: &str = "Players not set";

/// Counts of rows written by one upsert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub updated: usize,
}

/// Applies incoming player batches to the store
pub struct UpsertPlayersService {
    db: SqlitePool,
}

impl UpsertPlayersService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Upsert a batch of players atomically
    ///
    /// `None` is rejected with `InvalidInput`; an empty batch commits nothing.
    pub async fn upsert_players(&self, players: Option<Vec<BaseballPlayer>>) -> Result<UpsertSummary> {
        let players = players.ok_or_else(|| Error::InvalidInput(PLAYERS_NOT_SET.to_string()))?;

        info!(batch_size = players.len(), "Upserting players");

        let mut tx = self.db.begin().await?;

        match upsert_batch(&mut tx, &players).await {
            Ok(summary) => {
                tx.commit().await?;
                info!(
                    inserted = summary.inserted,
                    updated = summary.updated,
                    "Player batch committed"
                );
                Ok(summary)
            }
            Err(e) => {
                warn!(error = %e, batch_size = players.len(), "Player batch failed, rolling back");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }
}

async fn upsert_batch(conn: &mut SqliteConnection, players: &[BaseballPlayer]) -> Result<UpsertSummary> {
    let catalogs = ReferenceCatalogs::load(conn).await?;

    let mut reconciled = Vec::with_capacity(players.len());
    for player in players {
        let existing = find_existing(conn, player).await?;
        debug!(
            bhq_id = player.bhq_id,
            player_type = player.player_type.code(),
            existing = existing.is_some(),
            "Resolved incoming player"
        );

        if let Some(merged) = merge_player_entity(
            Some(player),
            existing,
            &catalogs.positions,
            &catalogs.teams,
        ) {
            reconciled.push(merged);
        }
    }

    persist_reconciled(conn, reconciled).await
}

/// Stored counterpart of an incoming player
///
/// A supplied id that is not stored yields `None`, so the player is
/// inserted under a fresh identity.
async fn find_existing(conn: &mut SqliteConnection, player: &BaseballPlayer) -> Result<Option<PlayerEntity>> {
    if player.id.is_nil() {
        players::find_player_by_natural_key(conn, player.bhq_id, player.player_type).await
    } else {
        players::find_player_by_id(conn, player.id).await
    }
}

/// Split merged players into inserts and updates and write both
pub(crate) async fn persist_reconciled(
    conn: &mut SqliteConnection,
    reconciled: Vec<ReconciledPlayer>,
) -> Result<UpsertSummary> {
    let (mut inserts, updates): (Vec<_>, Vec<_>) =
        reconciled.into_iter().partition(|r| r.entity.id.is_none());

    let inserted = players::insert_players(conn, &mut inserts).await?;
    players::update_players(conn, &updates).await?;

    Ok(UpsertSummary {
        inserted: inserted.len(),
        updated: updates.len(),
    })
}
