//! Reference catalog seed data
//!
//! Seeds the MLB team list and the position list. Both catalogs include a
//! sentinel row with an empty code: the free-agent team and the unknown
//! position. Seeding is idempotent (`INSERT OR IGNORE`).

use crate::models::PlayerType;
use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

/// (code, alternative code, league, city, nickname)
pub const MLB_TEAMS: &[(&str, Option<&str>, &str, &str, &str)] = &[
    ("", None, "", "Free Agent", "Free Agent"),
    ("BAL", None, "AL", "Baltimore", "Orioles"),
    ("BOS", None, "AL", "Boston", "Red Sox"),
    ("NYY", None, "AL", "New York", "Yankees"),
    ("TB", Some("TAM"), "AL", "Tampa Bay", "Rays"),
    ("TOR", None, "AL", "Toronto", "Blue Jays"),
    ("CWS", Some("CHW"), "AL", "Chicago", "White Sox"),
    ("CLE", None, "AL", "Cleveland", "Indians"),
    ("DET", None, "AL", "Detroit", "Tigers"),
    ("KC", None, "AL", "Kansas City", "Royals"),
    ("MIN", None, "AL", "Minnesota", "Twins"),
    ("HOU", None, "AL", "Houston", "Astros"),
    ("LAA", None, "AL", "Los Angeles", "Angels"),
    ("OAK", None, "AL", "Oakland", "Athletics"),
    ("SEA", None, "AL", "Seattle", "Mariners"),
    ("TEX", None, "AL", "Texas", "Rangers"),
    ("ATL", None, "NL", "Atlanta", "Braves"),
    ("MIA", None, "NL", "Miami", "Marlins"),
    ("NYM", None, "NL", "New York", "Mets"),
    ("PHI", None, "NL", "Philadelphia", "Phillies"),
    ("WAS", None, "NL", "Washington", "Nationals"),
    ("CHC", None, "NL", "Chicago", "Cubs"),
    ("CIN", None, "NL", "Cincinnati", "Reds"),
    ("MIL", None, "NL", "Milwaukee", "Brewers"),
    ("PIT", None, "NL", "Pittsburgh", "Pirates"),
    ("STL", None, "NL", "St. Louis", "Cardinals"),
    ("ARZ", Some("ARI"), "NL", "Arizona", "Diamondbacks"),
    ("COL", None, "NL", "Colorado", "Rockies"),
    ("LAD", Some("LA"), "NL", "Los Angeles", "Dodgers"),
    ("SD", None, "NL", "San Diego", "Padres"),
    ("SF", None, "NL", "San Francisco", "Giants"),
];

/// (code, full name, applicable player type, sort order)
pub const POSITIONS: &[(&str, &str, PlayerType, i32)] = &[
    ("", "Unknown", PlayerType::Unassigned, i32::MAX),
    ("C", "Catcher", PlayerType::Batter, 0),
    ("1B", "First Baseman", PlayerType::Batter, 1),
    ("2B", "Second Baseman", PlayerType::Batter, 2),
    ("3B", "Third Baseman", PlayerType::Batter, 3),
    ("SS", "Shortstop", PlayerType::Batter, 4),
    ("IF", "Infielder", PlayerType::Batter, 5),
    ("LF", "Left Fielder", PlayerType::Batter, 6),
    ("CF", "Center Fielder", PlayerType::Batter, 7),
    ("RF", "Right Fielder", PlayerType::Batter, 8),
    ("OF", "Outfielder", PlayerType::Batter, 9),
    ("DH", "Designated Hitter", PlayerType::Batter, 10),
    ("SP", "Starting Pitcher", PlayerType::Pitcher, 11),
    ("RP", "Relief Pitcher", PlayerType::Pitcher, 12),
    ("P", "Pitcher", PlayerType::Pitcher, 13),
];

/// Insert any missing catalog rows
pub async fn seed_reference_catalogs(pool: &SqlitePool) -> Result<()> {
    let mut tx = pool.begin().await?;

    for (code, alternative_code, league, city, nickname) in MLB_TEAMS {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO mlb_teams (code, alternative_code, mlb_league_id, city, nickname)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(code)
        .bind(alternative_code)
        .bind(league)
        .bind(city)
        .bind(nickname)
        .execute(&mut *tx)
        .await?;
    }

    for (code, full_name, player_type, sort_order) in POSITIONS {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO positions (code, full_name, player_type, sort_order)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(code)
        .bind(full_name)
        .bind(player_type.code())
        .bind(sort_order)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    debug!(
        teams = MLB_TEAMS.len(),
        positions = POSITIONS.len(),
        "Reference catalogs seeded"
    );
    Ok(())
}
