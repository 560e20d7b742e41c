use std::str::FromStr;

use strum_macros::{Display, EnumString};
use tracing::warn;

use crate::games::Throw;

/// Number of most recent games aggregated into dashboard stats
pub const DEFAULT_RECENT_GAME_LIMIT: usize = 30;

/// What the `score` field of a recorded throw means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
pub enum ScoreConvention {
    /// Remaining score before the dart was thrown
    #[default]
    #[strum(serialize = "before")]
    RemainingBefore,
    /// Remaining score after the dart was thrown
    #[strum(serialize = "after")]
    RemainingAfter,
}

impl ScoreConvention {
    /// Remaining score at the start of the turn opened by `first`.
    pub fn turn_start(self, first: &Throw) -> Option<i32> {
        let score = first.score?;
        Some(match self {
            ScoreConvention::RemainingBefore => score,
            ScoreConvention::RemainingAfter => score.saturating_add(signed(first.counted_points())),
        })
    }

    /// Remaining score once `throw` has landed.
    pub fn remaining_after(self, throw: &Throw) -> Option<i32> {
        let score = throw.score?;
        Some(match self {
            ScoreConvention::RemainingBefore => score.saturating_sub(signed(throw.counted_points())),
            ScoreConvention::RemainingAfter => score,
        })
    }
}

fn signed(points: u32) -> i32 {
    i32::try_from(points).unwrap_or(i32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsConfig {
    pub recent_game_limit: usize,
    pub score_convention: ScoreConvention,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            recent_game_limit: DEFAULT_RECENT_GAME_LIMIT,
            score_convention: ScoreConvention::default(),
        }
    }
}

impl StatsConfig {
    /// Reads `STATS_RECENT_GAME_LIMIT` and `STATS_SCORE_CONVENTION`, falling
    /// back to the defaults for unset or invalid values.
    pub fn from_env() -> Self {
        let recent_game_limit = std::env::var("STATS_RECENT_GAME_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|limit: &usize| *limit > 0)
            .unwrap_or(DEFAULT_RECENT_GAME_LIMIT);

        let score_convention = match std::env::var("STATS_SCORE_CONVENTION") {
            Ok(value) => ScoreConvention::from_str(value.trim()).unwrap_or_else(|_| {
                warn!(value = %value, "Unknown STATS_SCORE_CONVENTION, using default");
                ScoreConvention::default()
            }),
            Err(_) => ScoreConvention::default(),
        };

        Self {
            recent_game_limit,
            score_convention,
        }
    }

    pub fn with_recent_game_limit(mut self, limit: usize) -> Self {
        self.recent_game_limit = limit;
        self
    }

    pub fn with_score_convention(mut self, convention: ScoreConvention) -> Self {
        self.score_convention = convention;
        self
    }
}
