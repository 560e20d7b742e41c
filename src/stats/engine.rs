use tracing::debug;

use super::config::StatsConfig;
use super::feedback::derive_feedback;
use super::models::{GameStats, Trend};
use super::replay::replay_player;
use super::tally::MatchTally;
use crate::games::GameRecord;
use crate::user::UserIdentity;

/// Number of checkout values reported in `common_checkout_misses`
pub const CHECKOUT_MISS_LIMIT: usize = 5;

/// Computes dashboard statistics from completed game logs.
///
/// The engine holds only configuration: every call builds its own
/// accumulators, so it can be shared freely between tasks.
#[derive(Debug, Clone, Default)]
pub struct StatsEngine {
    config: StatsConfig,
}

impl StatsEngine {
    pub fn new(config: StatsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Games the user played in, newest first, capped at the configured limit.
    pub fn select_recent_games<'a>(
        &self,
        identity: &UserIdentity,
        records: &'a [GameRecord],
    ) -> Vec<&'a GameRecord> {
        let mut games: Vec<&GameRecord> =
            records.iter().filter(|g| g.has_player(identity)).collect();
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        games.truncate(self.config.recent_game_limit);
        games
    }

    /// Returns `None` when the user has no recorded games.
    pub fn compute_stats(
        &self,
        identity: &UserIdentity,
        records: &[GameRecord],
    ) -> Option<GameStats> {
        let recent = self.select_recent_games(identity, records);
        if recent.is_empty() {
            debug!(user_id = %identity.user_id, "No games to aggregate");
            return None;
        }

        let tally = recent
            .iter()
            .filter_map(|game| self.tally_game(identity, game))
            .fold(MatchTally::default(), MatchTally::merge);

        debug!(
            user_id = %identity.user_id,
            games = recent.len(),
            darts = tally.total_darts,
            "Aggregated game stats"
        );

        let mut stats = GameStats {
            total_average: tally.total_average(),
            checkout_rate: tally.checkout_rate(),
            total_games: recent.len() as u32,
            games_won: tally.games_won,
            best_leg_average: tally.best_leg.map_or(0.0, |leg| leg.average),
            best_leg_darts: tally.best_leg.map(|leg| leg.darts),
            scores_180: tally.scores_180,
            scores_140_plus: tally.scores_140_plus,
            scores_100_plus: tally.scores_100_plus,
            average_first_9: tally.average_first_9(),
            common_checkout_misses: tally.checkouts.most_attempted(CHECKOUT_MISS_LIMIT),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            training_tips: Vec::new(),
            recent_trend: Trend::Steady,
            user_name: identity
                .email
                .clone()
                .unwrap_or_else(|| identity.user_id.clone()),
        };

        let feedback = derive_feedback(&stats);
        stats.strengths = feedback.strengths;
        stats.weaknesses = feedback.weaknesses;
        stats.training_tips = feedback.training_tips;

        Some(stats)
    }

    /// Tally for a single game, or `None` if the user is not among its players.
    pub fn tally_game(&self, identity: &UserIdentity, game: &GameRecord) -> Option<MatchTally> {
        let Some(player_index) = game.player_index(identity) else {
            debug!(game_id = %game.id, "Player not found in game, skipping");
            return None;
        };

        let mut tally = replay_player(&game.history, player_index, self.config.score_convention);
        if game.players[player_index].is_winner(game.winner.as_deref()) {
            tally.games_won += 1;
        }
        Some(tally)
    }
}
