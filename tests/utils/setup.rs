use std::sync::Arc;

use dartstats::{
    DashboardStatsService, InMemoryGameLogStore, InMemoryUserDirectory, StatsConfig, StoredGame,
    UserProfile,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

#[allow(dead_code)] // Not every test inspects the stores
pub struct TestSetup {
    pub game_store: Arc<InMemoryGameLogStore>,
    pub user_directory: Arc<InMemoryUserDirectory>,
    pub stats_service: DashboardStatsService,
}

pub struct TestSetupBuilder {
    profiles: Vec<UserProfile>,
    games: Vec<StoredGame>,
    config: StatsConfig,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            profiles: vec![],
            games: vec![],
            config: StatsConfig::default(),
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    pub fn with_alice(self) -> Self {
        self.with_profile(UserProfile::new("alice", "alice@example.com").with_nick_name("Ace"))
    }

    pub fn with_games(mut self, games: Vec<StoredGame>) -> Self {
        self.games.extend(games);
        self
    }

    #[allow(dead_code)]
    pub fn with_config(mut self, config: StatsConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn build(self) -> TestSetup {
        let game_store = Arc::new(InMemoryGameLogStore::with_games(self.games));
        let user_directory = Arc::new(InMemoryUserDirectory::new());
        for profile in self.profiles {
            user_directory.register_profile(profile).await;
        }

        let stats_service =
            DashboardStatsService::builder(game_store.clone(), user_directory.clone())
                .with_config(self.config)
                .build();

        TestSetup {
            game_store,
            user_directory,
            stats_service,
        }
    }
}
