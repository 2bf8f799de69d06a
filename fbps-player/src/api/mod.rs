//! HTTP API handlers for fbps-player

pub mod health;
pub mod players;

pub use health::health_routes;
pub use players::player_routes;
