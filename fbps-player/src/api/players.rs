//! Player endpoints
//!
//! - `GET  /api/player`     list all players, sorted
//! - `POST /api/player`     upsert a batch of players
//! - `PUT  /api/player/:id` update one stored player

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use fbps_common::{BaseballPlayer, PlayerCollection};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::services::{self, UpsertPlayersService, PLAYERS_NOT_SET};
use crate::AppState;

/// GET /api/player
pub async fn list_players(State(state): State<AppState>) -> ApiResult<Json<PlayerCollection>> {
    let players = services::get_players(&state.db).await?;
    Ok(Json(PlayerCollection {
        players: Some(players),
    }))
}

/// POST /api/player
pub async fn upsert_players(
    State(state): State<AppState>,
    Json(collection): Json<PlayerCollection>,
) -> ApiResult<()> {
    if collection.players.is_none() {
        return Err(ApiError::BadRequest(PLAYERS_NOT_SET.to_string()));
    }

    let summary = UpsertPlayersService::new(state.db.clone())
        .upsert_players(collection.players)
        .await?;

    info!(
        inserted = summary.inserted,
        updated = summary.updated,
        "Upsert request completed"
    );
    Ok(())
}

/// PUT /api/player/:id
///
/// The id must be non-nil and match the body's id.
pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(player): Json<BaseballPlayer>,
) -> ApiResult<()> {
    if id.is_nil() {
        return Err(ApiError::BadRequest("Invalid player id".to_string()));
    }
    if player.id != id {
        return Err(ApiError::BadRequest(
            "Player id does not match the request path".to_string(),
        ));
    }

    services::update_player(&state.db, player).await?;
    Ok(())
}

/// Build player routes
pub fn player_routes() -> Router<AppState> {
    Router::new()
        .route("/api/player", get(list_players).post(upsert_players))
        .route("/api/player/:id", put(update_player))
}
