use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// The keys a player can appear under in a game log: the stable user id and,
/// for older logs, the email written as the player name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn new(user_id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email,
        }
    }
}

/// Row of the `user_meta_data` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub email: Option<String>,
    pub nick_name: Option<String>,
    pub full_name: Option<String>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: Some(email.into()),
            nick_name: None,
            full_name: None,
        }
    }

    pub fn with_nick_name(mut self, nick_name: impl Into<String>) -> Self {
        self.nick_name = Some(nick_name.into());
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Nickname, else full name, else email, else the raw id. Blank values are skipped.
    pub fn display_name(&self) -> String {
        [&self.nick_name, &self.full_name, &self.email]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| self.user_id.clone())
    }

    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(self.user_id.clone(), self.email.clone())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Lookup of user metadata by id
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, UserError>;
}

/// In-memory implementation of UserDirectory
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    profiles: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register or replace a profile
    pub async fn register_profile(&self, profile: UserProfile) {
        info!(
            user_id = %profile.user_id,
            display_name = %profile.display_name(),
            "Registered user profile"
        );

        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, UserError> {
        let profiles = self.profiles.read().await;
        let result = profiles.get(user_id).cloned();

        debug!(
            user_id = %user_id,
            found = result.is_some(),
            "User profile lookup"
        );

        Ok(result)
    }
}

/// PostgreSQL implementation of UserDirectory
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, UserError> {
        let row = sqlx::query(
            "SELECT user_id::text AS user_id, email, nick_name, full_name FROM user_meta_data WHERE user_id::text = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %user_id, "Failed to fetch user profile");
            UserError::Database(e.to_string())
        })?;

        let Some(row) = row else {
            debug!(user_id = %user_id, "User profile not found in database");
            return Ok(None);
        };

        let read = |column: &str| -> Result<Option<String>, UserError> {
            row.try_get(column)
                .map_err(|e| UserError::Database(e.to_string()))
        };

        Ok(Some(UserProfile {
            user_id: row
                .try_get("user_id")
                .map_err(|e| UserError::Database(e.to_string()))?,
            email: read("email")?,
            nick_name: read("nick_name")?,
            full_name: read("full_name")?,
        }))
    }
}
