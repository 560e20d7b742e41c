use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{models::StoredGame, GameLogError};

/// Read/write access to persisted X01 game logs
#[async_trait]
pub trait GameLogStore: Send + Sync {
    /// Games the user created plus games listing the user among the other
    /// participants, each once, newest first.
    async fn fetch_recent_games(&self, user_id: &str) -> Result<Vec<StoredGame>, GameLogError>;

    async fn get_game(&self, game_id: &str) -> Result<Option<StoredGame>, GameLogError>;

    async fn save_game(
        &self,
        user_id: &str,
        other_users: &[String],
        game_data: Value,
    ) -> Result<StoredGame, GameLogError>;
}

/// Merges the owned and participated result sets: first occurrence of an id
/// wins, then newest first. Equal timestamps keep merge order.
pub fn merge_recent(owned: Vec<StoredGame>, participated: Vec<StoredGame>) -> Vec<StoredGame> {
    let mut seen = HashSet::new();
    let mut games: Vec<StoredGame> = owned
        .into_iter()
        .chain(participated)
        .filter(|game| seen.insert(game.id.clone()))
        .collect();

    games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    games
}

fn game_data_text(game_data: &Value) -> String {
    match game_data {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// In-memory implementation of GameLogStore for development and testing
#[derive(Debug, Default)]
pub struct InMemoryGameLogStore {
    games: Arc<RwLock<Vec<StoredGame>>>,
}

impl InMemoryGameLogStore {
    pub fn new() -> Self {
        Self {
            games: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a store pre-populated with stored games
    pub fn with_games(games: Vec<StoredGame>) -> Self {
        Self {
            games: Arc::new(RwLock::new(games)),
        }
    }

    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }
}

#[async_trait]
impl GameLogStore for InMemoryGameLogStore {
    #[instrument(skip(self))]
    async fn fetch_recent_games(&self, user_id: &str) -> Result<Vec<StoredGame>, GameLogError> {
        let games = self.games.read().await;

        let owned: Vec<StoredGame> = games
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        let participated: Vec<StoredGame> = games
            .iter()
            .filter(|g| g.user_id != user_id && g.involves(user_id))
            .cloned()
            .collect();

        debug!(
            user_id = %user_id,
            owned = owned.len(),
            participated = participated.len(),
            "Fetched games from memory"
        );

        Ok(merge_recent(owned, participated))
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: &str) -> Result<Option<StoredGame>, GameLogError> {
        let games = self.games.read().await;
        Ok(games.iter().find(|g| g.id == game_id).cloned())
    }

    #[instrument(skip(self, game_data))]
    async fn save_game(
        &self,
        user_id: &str,
        other_users: &[String],
        game_data: Value,
    ) -> Result<StoredGame, GameLogError> {
        let game = StoredGame {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            game_data: Value::String(game_data_text(&game_data)),
            other_users: other_users.join(","),
            created_at: Utc::now(),
        };

        self.games.write().await.push(game.clone());
        debug!(game_id = %game.id, user_id = %user_id, "Game saved in memory");

        Ok(game)
    }
}

const SELECT_GAMES: &str = "SELECT id::text AS id, user_id::text AS user_id, game_data::text AS game_data, \
     COALESCE(other_users, '') AS other_users, created_at FROM games_x01";

/// PostgreSQL implementation of the game log store
pub struct PostgresGameLogStore {
    pool: PgPool,
}

impl PostgresGameLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &PgRow) -> Result<StoredGame, GameLogError> {
        let text: String = row.try_get("game_data").map_err(database_error)?;

        Ok(StoredGame {
            id: row.try_get("id").map_err(database_error)?,
            user_id: row.try_get("user_id").map_err(database_error)?,
            game_data: Value::String(text),
            other_users: row.try_get("other_users").map_err(database_error)?,
            created_at: row.try_get("created_at").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> GameLogError {
    warn!(error = %e, "Game log query failed");
    GameLogError::Database(e.to_string())
}

#[async_trait]
impl GameLogStore for PostgresGameLogStore {
    #[instrument(skip(self))]
    async fn fetch_recent_games(&self, user_id: &str) -> Result<Vec<StoredGame>, GameLogError> {
        debug!(user_id = %user_id, "Fetching games from database");

        let owned_rows = sqlx::query(&format!("{SELECT_GAMES} WHERE user_id::text = $1"))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        let participated_rows =
            sqlx::query(&format!("{SELECT_GAMES} WHERE other_users ILIKE $1"))
                .bind(format!("%{}%", user_id))
                .fetch_all(&self.pool)
                .await
                .map_err(database_error)?;

        let owned = owned_rows
            .iter()
            .map(Self::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let participated = participated_rows
            .iter()
            .map(Self::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            user_id = %user_id,
            owned = owned.len(),
            participated = participated.len(),
            "Fetched games from database"
        );

        Ok(merge_recent(owned, participated))
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: &str) -> Result<Option<StoredGame>, GameLogError> {
        let row = sqlx::query(&format!("{SELECT_GAMES} WHERE id::text = $1"))
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(Self::from_row).transpose()
    }

    #[instrument(skip(self, game_data))]
    async fn save_game(
        &self,
        user_id: &str,
        other_users: &[String],
        game_data: Value,
    ) -> Result<StoredGame, GameLogError> {
        let row = sqlx::query(
            "INSERT INTO games_x01 (user_id, game_data, other_users) VALUES ($1, $2, $3) \
             RETURNING id::text AS id, user_id::text AS user_id, game_data::text AS game_data, \
             COALESCE(other_users, '') AS other_users, created_at",
        )
        .bind(user_id)
        .bind(game_data_text(&game_data))
        .bind(other_users.join(","))
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        let game = Self::from_row(&row)?;
        debug!(game_id = %game.id, user_id = %user_id, "Game saved in database");
        Ok(game)
    }
}
