//! Consumer-facing player types
//!
//! These are the shapes exchanged with callers of the player service: the
//! incoming records submitted for reconciliation and the aggregates built
//! from persisted records. Enumerations carry short text codes which are
//! used both on the wire and in the database.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::str::FromStr;
use uuid::Uuid;

// ========================================
// Enumerations
// ========================================

/// Player kind; determines the stat family and default position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum PlayerType {
    #[default]
    #[serde(rename = "U")]
    Unassigned,
    #[serde(rename = "B")]
    Batter,
    #[serde(rename = "P")]
    Pitcher,
}

impl PlayerType {
    pub fn code(self) -> &'static str {
        match self {
            PlayerType::Unassigned => "U",
            PlayerType::Batter => "B",
            PlayerType::Pitcher => "P",
        }
    }
}

impl FromStr for PlayerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "U" => Ok(PlayerType::Unassigned),
            "B" => Ok(PlayerType::Batter),
            "P" => Ok(PlayerType::Pitcher),
            other => Err(Error::InvalidInput(format!("Unknown player type: {}", other))),
        }
    }
}

/// Roster status of a player in the real-world league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerStatus {
    #[default]
    #[serde(rename = "")]
    Normal,
    #[serde(rename = "DL")]
    DisabledList,
    #[serde(rename = "NA")]
    NotAvailable,
    #[serde(rename = "XX")]
    Removed,
    #[serde(rename = "NEW")]
    New,
}

impl PlayerStatus {
    pub fn code(self) -> &'static str {
        match self {
            PlayerStatus::Normal => "",
            PlayerStatus::DisabledList => "DL",
            PlayerStatus::NotAvailable => "NA",
            PlayerStatus::Removed => "XX",
            PlayerStatus::New => "NEW",
        }
    }
}

impl FromStr for PlayerStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(PlayerStatus::Normal),
            "DL" => Ok(PlayerStatus::DisabledList),
            "NA" => Ok(PlayerStatus::NotAvailable),
            "XX" => Ok(PlayerStatus::Removed),
            "NEW" => Ok(PlayerStatus::New),
            other => Err(Error::InvalidInput(format!("Unknown player status: {}", other))),
        }
    }
}

/// Status of a player within one fantasy league slot
///
/// `Available` is the inactive sentinel: it is never persisted, an absent
/// league row reads back as `Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeagueStatus {
    #[default]
    #[serde(rename = "A")]
    Available,
    #[serde(rename = "R")]
    Rostered,
    #[serde(rename = "X")]
    Unavailable,
}

impl LeagueStatus {
    pub fn code(self) -> &'static str {
        match self {
            LeagueStatus::Available => "A",
            LeagueStatus::Rostered => "R",
            LeagueStatus::Unavailable => "X",
        }
    }
}

impl FromStr for LeagueStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A" => Ok(LeagueStatus::Available),
            "R" => Ok(LeagueStatus::Rostered),
            "X" => Ok(LeagueStatus::Unavailable),
            other => Err(Error::InvalidInput(format!("Unknown league status: {}", other))),
        }
    }
}

/// Stat snapshot kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatsType {
    #[default]
    #[serde(rename = "UNKN")]
    Unknown,
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "PROJ")]
    Projected,
}

impl StatsType {
    pub fn code(self) -> &'static str {
        match self {
            StatsType::Unknown => "UNKN",
            StatsType::YearToDate => "YTD",
            StatsType::Projected => "PROJ",
        }
    }
}

impl FromStr for StatsType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "UNKN" => Ok(StatsType::Unknown),
            "YTD" => Ok(StatsType::YearToDate),
            "PROJ" => Ok(StatsType::Projected),
            other => Err(Error::InvalidInput(format!("Unknown stats type: {}", other))),
        }
    }
}

// ========================================
// Statistics
// ========================================

/// Batting statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattingStats {
    pub at_bats: i32,
    pub runs: i32,
    pub hits: i32,
    pub doubles: i32,
    pub triples: i32,
    pub home_runs: i32,
    pub runs_batted_in: i32,
    pub base_on_balls: i32,
    pub strike_outs: i32,
    pub stolen_bases: i32,
    pub caught_stealing: i32,
    pub power: f64,
    pub speed: f64,
}

/// Field-wise sum, rate-like fields included
impl Add for BattingStats {
    type Output = BattingStats;

    fn add(self, other: BattingStats) -> BattingStats {
        BattingStats {
            at_bats: self.at_bats.wrapping_add(other.at_bats),
            runs: self.runs.wrapping_add(other.runs),
            hits: self.hits.wrapping_add(other.hits),
            doubles: self.doubles.wrapping_add(other.doubles),
            triples: self.triples.wrapping_add(other.triples),
            home_runs: self.home_runs.wrapping_add(other.home_runs),
            runs_batted_in: self.runs_batted_in.wrapping_add(other.runs_batted_in),
            base_on_balls: self.base_on_balls.wrapping_add(other.base_on_balls),
            strike_outs: self.strike_outs.wrapping_add(other.strike_outs),
            stolen_bases: self.stolen_bases.wrapping_add(other.stolen_bases),
            caught_stealing: self.caught_stealing.wrapping_add(other.caught_stealing),
            power: self.power + other.power,
            speed: self.speed + other.speed,
        }
    }
}

/// Pitching statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PitchingStats {
    pub wins: i32,
    pub losses: i32,
    pub quality_starts: i32,
    pub saves: i32,
    pub blown_saves: i32,
    pub holds: i32,
    pub innings_pitched: f64,
    pub hits_allowed: i32,
    pub earned_runs: i32,
    pub home_runs_allowed: i32,
    pub base_on_balls_allowed: i32,
    pub strike_outs: i32,
    pub fly_ball_rate: f64,
    pub ground_ball_rate: f64,
}

/// Field-wise sum, rate-like fields included
impl Add for PitchingStats {
    type Output = PitchingStats;

    fn add(self, other: PitchingStats) -> PitchingStats {
        PitchingStats {
            wins: self.wins.wrapping_add(other.wins),
            losses: self.losses.wrapping_add(other.losses),
            quality_starts: self.quality_starts.wrapping_add(other.quality_starts),
            saves: self.saves.wrapping_add(other.saves),
            blown_saves: self.blown_saves.wrapping_add(other.blown_saves),
            holds: self.holds.wrapping_add(other.holds),
            innings_pitched: self.innings_pitched + other.innings_pitched,
            hits_allowed: self.hits_allowed.wrapping_add(other.hits_allowed),
            earned_runs: self.earned_runs.wrapping_add(other.earned_runs),
            home_runs_allowed: self.home_runs_allowed.wrapping_add(other.home_runs_allowed),
            base_on_balls_allowed: self.base_on_balls_allowed.wrapping_add(other.base_on_balls_allowed),
            strike_outs: self.strike_outs.wrapping_add(other.strike_outs),
            fly_ball_rate: self.fly_ball_rate + other.fly_ball_rate,
            ground_ball_rate: self.ground_ball_rate + other.ground_ball_rate,
        }
    }
}

// ========================================
// Player aggregate
// ========================================

/// A baseball player as submitted by callers and as returned to them
///
/// On input the `combined_*` snapshots are ignored; on output they are the
/// field-wise sum of the year-to-date and projected snapshots.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseballPlayer {
    /// Nil when the caller does not know the stored identity
    pub id: Uuid,
    pub bhq_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    #[serde(rename = "type")]
    pub player_type: PlayerType,
    /// Position codes joined with `-`, e.g. `C-1B-SS`
    pub positions: String,
    pub team: String,
    pub status: PlayerStatus,
    pub league1: LeagueStatus,
    pub league2: LeagueStatus,
    pub draft_rank: i32,
    pub average_draft_pick: i32,
    pub highest_pick: i32,
    pub drafted_percentage: f64,
    pub reliability: f64,
    pub mayberry_method: i32,
    pub year_to_date_batting_stats: BattingStats,
    pub projected_batting_stats: BattingStats,
    pub combined_batting_stats: BattingStats,
    pub year_to_date_pitching_stats: PitchingStats,
    pub projected_pitching_stats: PitchingStats,
    pub combined_pitching_stats: PitchingStats,
}

/// Request/response envelope for player lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerCollection {
    #[serde(default)]
    pub players: Option<Vec<BaseballPlayer>>,
}
