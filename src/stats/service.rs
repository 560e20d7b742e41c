use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::{config::StatsConfig, engine::StatsEngine, models::GameStats, StatsError};
use crate::{
    games::{GameLogStore, GameRecord, StoredGame},
    user::{UserDirectory, UserIdentity},
};

/// Loads a user's games and turns them into dashboard statistics
pub struct DashboardStatsService {
    games: Arc<dyn GameLogStore>,
    users: Arc<dyn UserDirectory>,
    engine: StatsEngine,
}

impl DashboardStatsService {
    pub fn builder(
        games: Arc<dyn GameLogStore>,
        users: Arc<dyn UserDirectory>,
    ) -> DashboardStatsServiceBuilder {
        DashboardStatsServiceBuilder::new(games, users)
    }

    pub fn engine(&self) -> &StatsEngine {
        &self.engine
    }

    /// Stats over the user's recent games, or `None` when the user has no
    /// readable games. Users without a profile are matched by id alone.
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self, user_id: &str) -> Result<Option<GameStats>, StatsError> {
        if user_id.trim().is_empty() {
            return Err(StatsError::Validation("user id must not be empty".to_string()));
        }

        let (identity, user_name) = match self.users.get_profile(user_id).await? {
            Some(profile) => (profile.identity(), profile.display_name()),
            None => {
                info!(user_id = %user_id, "No profile for user, using the raw id");
                (UserIdentity::new(user_id, None), user_id.to_string())
            }
        };

        let stored = self.games.fetch_recent_games(user_id).await?;
        let records = normalize_games(&stored);
        debug!(
            user_id = %user_id,
            stored = stored.len(),
            readable = records.len(),
            "Loaded game logs"
        );

        let stats = self
            .engine
            .compute_stats(&identity, &records)
            .map(|stats| GameStats { user_name, ..stats });

        if let Some(stats) = &stats {
            info!(
                user_id = %user_id,
                total_games = stats.total_games,
                total_average = stats.total_average,
                "Dashboard stats computed"
            );
        }

        Ok(stats)
    }
}

/// Parses stored games, dropping (and logging) the ones that are not readable.
pub fn normalize_games(stored: &[StoredGame]) -> Vec<GameRecord> {
    stored
        .iter()
        .filter_map(|game| match game.to_record() {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(%err, game_id = %game.id, "Skipping malformed game record");
                None
            }
        })
        .collect()
}

pub struct DashboardStatsServiceBuilder {
    games: Arc<dyn GameLogStore>,
    users: Arc<dyn UserDirectory>,
    config: StatsConfig,
}

impl DashboardStatsServiceBuilder {
    fn new(games: Arc<dyn GameLogStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self {
            games,
            users,
            config: StatsConfig::default(),
        }
    }

    pub fn with_config(mut self, config: StatsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> DashboardStatsService {
        DashboardStatsService {
            games: self.games,
            users: self.users,
            engine: StatsEngine::new(self.config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{GameLogError, InMemoryGameLogStore};
    use crate::user::{InMemoryUserDirectory, UserProfile};
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::{json, Value};

    struct FailingGameLogStore;

    #[async_trait]
    impl GameLogStore for FailingGameLogStore {
        async fn fetch_recent_games(&self, _user_id: &str) -> Result<Vec<StoredGame>, GameLogError> {
            Err(GameLogError::Database("connection refused".to_string()))
        }

        async fn get_game(&self, _game_id: &str) -> Result<Option<StoredGame>, GameLogError> {
            Ok(None)
        }

        async fn save_game(
            &self,
            _user_id: &str,
            _other_users: &[String],
            _game_data: Value,
        ) -> Result<StoredGame, GameLogError> {
            Err(GameLogError::Database("read only".to_string()))
        }
    }

    fn stored(id: &str, minutes: i64, game_data: Value) -> StoredGame {
        StoredGame {
            id: id.to_string(),
            user_id: "alice".to_string(),
            game_data,
            other_users: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    fn ton_visit() -> Value {
        json!({
            "players": [{ "name": "alice@example.com", "user_id": "alice" }],
            "history": [
                { "value": 20, "multiplier": "triple", "playerIndex": 0, "score": 501, "leg": 1, "turnIndex": 0 },
                { "value": 20, "multiplier": "single", "playerIndex": 0, "score": 441, "leg": 1, "turnIndex": 0 },
                { "value": 20, "multiplier": "single", "playerIndex": 0, "score": 421, "leg": 1, "turnIndex": 0 }
            ],
            "winner": "alice@example.com"
        })
    }

    async fn directory_with_alice() -> Arc<InMemoryUserDirectory> {
        let directory = Arc::new(InMemoryUserDirectory::new());
        directory
            .register_profile(UserProfile::new("alice", "alice@example.com").with_nick_name("Ace"))
            .await;
        directory
    }

    #[tokio::test]
    async fn computes_stats_with_display_name() {
        let store = Arc::new(InMemoryGameLogStore::with_games(vec![stored(
            "g1",
            0,
            Value::String(ton_visit().to_string()),
        )]));
        let service = DashboardStatsService::builder(store, directory_with_alice().await).build();

        let stats = service.dashboard_stats("alice").await.unwrap().unwrap();
        assert_eq!(stats.user_name, "Ace");
        assert_eq!(stats.total_games, 1);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.scores_100_plus, 1);
        assert!((stats.total_average - 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn skips_malformed_games() {
        let store = Arc::new(InMemoryGameLogStore::with_games(vec![
            stored("broken", 5, Value::String("{\"players\": [".to_string())),
            stored("good", 0, ton_visit()),
        ]));
        let service = DashboardStatsService::builder(store, directory_with_alice().await).build();

        let stats = service.dashboard_stats("alice").await.unwrap().unwrap();
        assert_eq!(stats.total_games, 1);
    }

    #[tokio::test]
    async fn unknown_user_has_no_stats() {
        let service = DashboardStatsService::builder(
            Arc::new(InMemoryGameLogStore::new()),
            Arc::new(InMemoryUserDirectory::new()),
        )
        .build();

        assert!(service.dashboard_stats("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn user_without_profile_still_gets_stats() {
        let store = Arc::new(InMemoryGameLogStore::with_games(vec![stored("g1", 0, ton_visit())]));
        let service =
            DashboardStatsService::builder(store, Arc::new(InMemoryUserDirectory::new())).build();

        let stats = service.dashboard_stats("alice").await.unwrap().unwrap();
        assert_eq!(stats.user_name, "alice");
        assert_eq!(stats.total_games, 1);
        assert_eq!(stats.scores_100_plus, 1);
    }

    #[tokio::test]
    async fn user_without_games_has_no_stats() {
        let service = DashboardStatsService::builder(
            Arc::new(InMemoryGameLogStore::new()),
            directory_with_alice().await,
        )
        .build();

        assert!(service.dashboard_stats("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let service =
            DashboardStatsService::builder(Arc::new(FailingGameLogStore), directory_with_alice().await)
                .build();

        let result = service.dashboard_stats("alice").await;
        assert!(matches!(result, Err(StatsError::Store(_))));
    }

    #[tokio::test]
    async fn rejects_blank_user_id() {
        let service = DashboardStatsService::builder(
            Arc::new(InMemoryGameLogStore::new()),
            Arc::new(InMemoryUserDirectory::new()),
        )
        .build();

        let result = service.dashboard_stats("  ").await;
        assert!(matches!(result, Err(StatsError::Validation(_))));
    }

    #[test]
    fn builder_applies_config() {
        let service = DashboardStatsService::builder(
            Arc::new(InMemoryGameLogStore::new()),
            Arc::new(InMemoryUserDirectory::new()),
        )
        .with_config(StatsConfig::default().with_recent_game_limit(10))
        .build();

        assert_eq!(service.engine().config().recent_game_limit, 10);
    }
}
