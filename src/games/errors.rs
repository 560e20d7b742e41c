use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GameLogError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Malformed game record {game_id}: {reason}")]
    Malformed { game_id: String, reason: String },
}
