use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Improving,
    #[default]
    Steady,
    Declining,
}

/// Attempts and successes at one checkout value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRecord {
    pub score: i32,
    pub attempts: u32,
    pub successes: u32,
}

impl CheckoutRecord {
    pub fn new(score: i32) -> Self {
        Self {
            score,
            attempts: 0,
            successes: 0,
        }
    }
}

/// Dashboard statistics for one player over their recent games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub total_average: f64,
    pub checkout_rate: f64,
    pub total_games: u32,
    pub games_won: u32,
    pub best_leg_average: f64,
    pub best_leg_darts: Option<u32>,
    pub scores_180: u32,
    pub scores_140_plus: u32,
    pub scores_100_plus: u32,
    pub average_first_9: f64,
    pub common_checkout_misses: Vec<CheckoutRecord>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub training_tips: Vec<String>,
    pub recent_trend: Trend,
    pub user_name: String,
}
