//! Reference catalog loading
//!
//! Positions and teams are read once per operation and passed explicitly to
//! every merge, so a whole batch resolves against one snapshot.

use fbps_common::Result;
use sqlx::{Row, SqliteConnection};

use super::entities::{MlbTeamEntity, PositionEntity};

/// Position and team catalogs for one operation
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalogs {
    pub positions: Vec<PositionEntity>,
    pub teams: Vec<MlbTeamEntity>,
}

impl ReferenceCatalogs {
    /// Load both catalogs using the given connection (or transaction)
    pub async fn load(conn: &mut SqliteConnection) -> Result<Self> {
        let positions = load_positions(conn).await?;
        let teams = load_teams(conn).await?;
        Ok(Self { positions, teams })
    }
}

/// All positions ordered by sort order
pub async fn load_positions(conn: &mut SqliteConnection) -> Result<Vec<PositionEntity>> {
    let rows = sqlx::query(
        "SELECT code, full_name, player_type, sort_order FROM positions ORDER BY sort_order",
    )
    .fetch_all(&mut *conn)
    .await?;

    rows.iter()
        .map(|row| -> Result<PositionEntity> {
            let player_type: String = row.get("player_type");
            Ok(PositionEntity {
                code: row.get("code"),
                full_name: row.get::<Option<String>, _>("full_name").unwrap_or_default(),
                player_type: player_type.parse()?,
                sort_order: row.get("sort_order"),
            })
        })
        .collect()
}

/// All teams, sentinel included
pub async fn load_teams(conn: &mut SqliteConnection) -> Result<Vec<MlbTeamEntity>> {
    let rows = sqlx::query(
        "SELECT code, alternative_code, mlb_league_id, city, nickname FROM mlb_teams ORDER BY code",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.iter().map(team_from_row).collect())
}

fn team_from_row(row: &sqlx::sqlite::SqliteRow) -> MlbTeamEntity {
    MlbTeamEntity {
        code: row.get("code"),
        alternative_code: row.get("alternative_code"),
        mlb_league_id: row.get::<Option<String>, _>("mlb_league_id").unwrap_or_default(),
        city: row.get::<Option<String>, _>("city").unwrap_or_default(),
        nickname: row.get::<Option<String>, _>("nickname").unwrap_or_default(),
    }
}
