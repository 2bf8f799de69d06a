//! # Fantasy Baseball Player Service Common Library
//!
//! Shared code for the player service including:
//! - Consumer-facing player and statistics types
//! - Database bootstrap, reference catalogs and migrations
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod uuid_utils;

pub use error::{Error, Result};
pub use models::{BaseballPlayer, BattingStats, PitchingStats, PlayerCollection};
