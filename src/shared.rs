use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::games::GameLogStore;
use crate::stats::{DashboardStatsService, StatsConfig, StatsError};
use crate::user::UserDirectory;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub stats_service: Arc<DashboardStatsService>,
}

impl AppState {
    pub fn new(
        game_store: Arc<dyn GameLogStore>,
        user_directory: Arc<dyn UserDirectory>,
        config: StatsConfig,
    ) -> Self {
        let stats_service = DashboardStatsService::builder(game_store, user_directory)
            .with_config(config)
            .build();

        Self {
            stats_service: Arc::new(stats_service),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Validation(msg) => AppError::BadRequest(msg),
            StatsError::Store(e) => AppError::DatabaseError(e.to_string()),
            StatsError::Directory(e) => AppError::DatabaseError(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::games::InMemoryGameLogStore;
    use crate::user::InMemoryUserDirectory;

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        game_store: Option<Arc<dyn GameLogStore>>,
        user_directory: Option<Arc<dyn UserDirectory>>,
        config: StatsConfig,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                game_store: None,
                user_directory: None,
                config: StatsConfig::default(),
            }
        }

        pub fn with_game_store(mut self, store: Arc<dyn GameLogStore>) -> Self {
            self.game_store = Some(store);
            self
        }

        pub fn with_user_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
            self.user_directory = Some(directory);
            self
        }

        #[allow(dead_code)] // Not every test overrides the config
        pub fn with_config(mut self, config: StatsConfig) -> Self {
            self.config = config;
            self
        }

        pub fn build(self) -> AppState {
            AppState::new(
                self.game_store
                    .unwrap_or_else(|| Arc::new(InMemoryGameLogStore::new())),
                self.user_directory
                    .unwrap_or_else(|| Arc::new(InMemoryUserDirectory::new())),
                self.config,
            )
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
