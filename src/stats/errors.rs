use thiserror::Error;

use crate::games::GameLogError;
use crate::user::UserError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Game store error: {0}")]
    Store(#[from] GameLogError),

    #[error("User directory error: {0}")]
    Directory(#[from] UserError),

    #[error("Validation error: {0}")]
    Validation(String),
}
