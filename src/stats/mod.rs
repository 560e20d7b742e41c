pub mod config;
pub mod engine;
pub mod feedback;
pub mod handlers;
pub mod models;
pub mod replay;
pub mod service;
pub mod tally;
pub mod turns;

mod errors;

pub use config::{ScoreConvention, StatsConfig};
pub use engine::StatsEngine;
pub use errors::StatsError;
pub use feedback::{derive_feedback, Feedback};
pub use handlers::get_dashboard_stats;
pub use models::*;
pub use service::{DashboardStatsService, DashboardStatsServiceBuilder};
pub use tally::{CheckoutBook, LegSummary, MatchTally};
pub use turns::{HighScore, Turn, TurnKey};
