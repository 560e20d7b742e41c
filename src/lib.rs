// Library crate for the darts stats dashboard
// This file exposes the public API for integration tests

pub mod games;
pub mod shared;
pub mod stats;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use games::{GameLogStore, GameRecord, InMemoryGameLogStore, Multiplier, StoredGame, Throw};
pub use shared::{AppError, AppState};
pub use stats::{DashboardStatsService, GameStats, StatsConfig, StatsEngine, StatsError};
pub use user::{InMemoryUserDirectory, UserDirectory, UserIdentity, UserProfile};
