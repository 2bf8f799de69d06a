//! Player list ordering

use fbps_common::BaseballPlayer;

/// Order by player type, last name, first name (case-insensitive), then BHQ id
pub fn sort_players(mut players: Vec<BaseballPlayer>) -> Vec<BaseballPlayer> {
    players.sort_by_cached_key(|p| {
        (
            p.player_type,
            p.last_name.to_uppercase(),
            p.first_name.to_uppercase(),
            p.bhq_id,
        )
    });
    players
}
