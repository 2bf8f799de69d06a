//! Consumer view of a stored player

use fbps_common::models::StatsType;
use fbps_common::BaseballPlayer;

use crate::db::entities::PlayerEntity;

/// Build the consumer aggregate for a stored player
///
/// `None` yields an all-default player. Combined snapshots are the literal
/// field-wise sum of year-to-date and projected, rates included.
pub fn build_baseball_player(entity: Option<&PlayerEntity>) -> BaseballPlayer {
    let Some(entity) = entity else {
        return BaseballPlayer::default();
    };

    let ytd_batting = entity
        .batting(StatsType::YearToDate)
        .map(|s| s.stats)
        .unwrap_or_default();
    let proj_batting = entity
        .batting(StatsType::Projected)
        .map(|s| s.stats)
        .unwrap_or_default();
    let ytd_pitching = entity
        .pitching(StatsType::YearToDate)
        .map(|s| s.stats)
        .unwrap_or_default();
    let proj_pitching = entity
        .pitching(StatsType::Projected)
        .map(|s| s.stats)
        .unwrap_or_default();

    BaseballPlayer {
        id: entity.id.unwrap_or_default(),
        bhq_id: entity.bhq_id,
        first_name: entity.first_name.clone(),
        last_name: entity.last_name.clone(),
        age: entity.age,
        player_type: entity.player_type,
        positions: position_display(entity),
        team: entity.team.clone(),
        status: entity.status,
        league1: entity.league_status(1),
        league2: entity.league_status(2),
        draft_rank: entity.draft_rank,
        average_draft_pick: entity.average_draft_pick,
        highest_pick: entity.highest_pick,
        drafted_percentage: entity.drafted_percentage,
        reliability: entity.reliability,
        mayberry_method: entity.mayberry_method,
        year_to_date_batting_stats: ytd_batting,
        projected_batting_stats: proj_batting,
        combined_batting_stats: ytd_batting + proj_batting,
        year_to_date_pitching_stats: ytd_pitching,
        projected_pitching_stats: proj_pitching,
        combined_pitching_stats: ytd_pitching + proj_pitching,
    }
}

/// Position codes ordered by catalog rank, joined with `-`
fn position_display(entity: &PlayerEntity) -> String {
    let mut positions: Vec<_> = entity.positions.iter().collect();
    positions.sort_by_key(|p| p.sort_order);
    positions
        .iter()
        .map(|p| p.position_code.as_str())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::{
        BattingStatsEntity, LeagueStatusEntity, PitchingStatsEntity, PlayerPositionEntity,
        PositionEntity,
    };
    use crate::services::entity_merger::resolve_positions;
    use fbps_common::models::{BattingStats, LeagueStatus, PitchingStats, PlayerStatus, PlayerType};
    use uuid::Uuid;

    fn membership(code: &str, sort_order: i32) -> PlayerPositionEntity {
        PlayerPositionEntity { position_code: code.to_string(), sort_order }
    }

    fn stored_player() -> PlayerEntity {
        PlayerEntity {
            id: Some(Uuid::new_v4()),
            bhq_id: 7,
            player_type: PlayerType::Batter,
            first_name: "Ty".to_string(),
            last_name: "Cobb".to_string(),
            age: 33,
            team: "DET".to_string(),
            status: PlayerStatus::New,
            draft_rank: 3,
            average_draft_pick: 4,
            highest_pick: 1,
            drafted_percentage: 0.99,
            reliability: 0.8,
            mayberry_method: 5,
            positions: vec![membership("SS", 4), membership("C", 0), membership("1B", 1)],
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_entity_builds_default() {
        assert_eq!(build_baseball_player(None), BaseballPlayer::default());
    }

    #[test]
    fn test_scalars_are_mapped() {
        let entity = stored_player();
        let player = build_baseball_player(Some(&entity));

        assert_eq!(Some(player.id), entity.id);
        assert_eq!(player.bhq_id, 7);
        assert_eq!(player.player_type, PlayerType::Batter);
        assert_eq!(player.first_name, "Ty");
        assert_eq!(player.last_name, "Cobb");
        assert_eq!(player.age, 33);
        assert_eq!(player.team, "DET");
        assert_eq!(player.status, PlayerStatus::New);
        assert_eq!(player.draft_rank, 3);
        assert_eq!(player.average_draft_pick, 4);
        assert_eq!(player.highest_pick, 1);
        assert_eq!(player.drafted_percentage, 0.99);
        assert_eq!(player.reliability, 0.8);
        assert_eq!(player.mayberry_method, 5);
    }

    #[test]
    fn test_positions_sorted_by_rank() {
        let player = build_baseball_player(Some(&stored_player()));
        assert_eq!(player.positions, "C-1B-SS");
    }

    #[test]
    fn test_position_display_merges_back_to_same_set() {
        let catalog = vec![
            PositionEntity { code: "C".to_string(), full_name: "Catcher".to_string(), player_type: PlayerType::Batter, sort_order: 0 },
            PositionEntity { code: "1B".to_string(), full_name: "First Base".to_string(), player_type: PlayerType::Batter, sort_order: 1 },
            PositionEntity { code: "SS".to_string(), full_name: "Shortstop".to_string(), player_type: PlayerType::Batter, sort_order: 4 },
        ];
        let display = build_baseball_player(Some(&stored_player())).positions;
        let mut reparsed = resolve_positions(&display.to_lowercase(), PlayerType::Batter, &catalog);
        reparsed.sort_by_key(|p| p.sort_order);

        let mut original = stored_player().positions;
        original.sort_by_key(|p| p.sort_order);
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_missing_league_rows_read_as_available() {
        let mut entity = stored_player();
        entity.league_statuses = vec![LeagueStatusEntity { league_id: 2, league_status: LeagueStatus::Rostered }];
        let player = build_baseball_player(Some(&entity));
        assert_eq!(player.league1, LeagueStatus::Available);
        assert_eq!(player.league2, LeagueStatus::Rostered);
    }

    #[test]
    fn test_combined_batting_is_field_wise_sum() {
        let mut entity = stored_player();
        entity.batting_stats = vec![BattingStatsEntity {
            stats_type: StatsType::YearToDate,
            stats: BattingStats { at_bats: 300, runs: 75, ..Default::default() },
        }];
        let player = build_baseball_player(Some(&entity));

        assert_eq!(player.projected_batting_stats, BattingStats::default());
        assert_eq!(player.combined_batting_stats.at_bats, 300);
        assert_eq!(player.combined_batting_stats.runs, 75);

        entity.batting_stats = vec![BattingStatsEntity {
            stats_type: StatsType::Projected,
            stats: BattingStats { at_bats: 300, ..Default::default() },
        }];
        let player = build_baseball_player(Some(&entity));
        assert_eq!(player.year_to_date_batting_stats, BattingStats::default());
        assert_eq!(player.combined_batting_stats.at_bats, 300);
    }

    #[test]
    fn test_combined_batting_wraps_large_counts() {
        let mut entity = stored_player();
        entity.batting_stats = [StatsType::YearToDate, StatsType::Projected]
            .into_iter()
            .map(|stats_type| BattingStatsEntity {
                stats_type,
                stats: BattingStats { at_bats: 2_000_000_000, ..Default::default() },
            })
            .collect();
        let player = build_baseball_player(Some(&entity));
        assert_eq!(
            player.combined_batting_stats.at_bats,
            2_000_000_000i32.wrapping_add(2_000_000_000)
        );
    }

    #[test]
    fn test_combined_pitching_adds_rates() {
        let mut entity = stored_player();
        entity.pitching_stats = vec![
            PitchingStatsEntity {
                stats_type: StatsType::YearToDate,
                stats: PitchingStats { wins: 5, ground_ball_rate: 0.25, ..Default::default() },
            },
            PitchingStatsEntity {
                stats_type: StatsType::Projected,
                stats: PitchingStats { wins: 10, ground_ball_rate: 0.5, ..Default::default() },
            },
        ];
        let player = build_baseball_player(Some(&entity));
        assert_eq!(player.combined_pitching_stats.wins, 15);
        assert_eq!(player.combined_pitching_stats.ground_ball_rate, 0.75);
    }
}
