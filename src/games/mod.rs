// Public API
pub use errors::GameLogError;
pub use models::{GamePlayer, GameRecord, Multiplier, StoredGame, Throw, MAX_DART_VALUE};
pub use repository::{GameLogStore, InMemoryGameLogStore, PostgresGameLogStore};

// Internal modules
mod errors;
pub mod models;
pub mod repository;
