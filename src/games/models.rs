use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString};

use super::GameLogError;
use crate::user::UserIdentity;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Multiplier {
    #[default]
    Single,
    Double,
    Triple,
}

/// Highest face value on a board (the bull)
pub const MAX_DART_VALUE: u32 = 25;

impl Multiplier {
    pub fn factor(self) -> u32 {
        match self {
            Multiplier::Single => 1,
            Multiplier::Double => 2,
            Multiplier::Triple => 3,
        }
    }
}

/// One dart as recorded in a game log.
///
/// `score` is the player's remaining score as written by the scoreboard. Whether
/// that is the value before or after the dart depends on the client that wrote
/// the log, see `ScoreConvention`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Throw {
    pub value: u32,
    #[serde(default)]
    pub multiplier: Multiplier,
    pub player_index: usize,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default = "first_leg")]
    pub leg: u32,
    #[serde(default)]
    pub turn_index: u32,
    #[serde(default)]
    pub was_bust: bool,
}

fn first_leg() -> u32 {
    1
}

impl Throw {
    /// Points scored by the dart, ignoring whether it busted.
    pub fn points(&self) -> u32 {
        self.value.saturating_mul(self.multiplier.factor())
    }

    /// Points that actually count towards the leg.
    pub fn counted_points(&self) -> u32 {
        if self.was_bust {
            0
        } else {
            self.points()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlayer {
    pub name: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl GamePlayer {
    /// True if this player is the game's recorded winner.
    pub fn is_winner(&self, winner: Option<&str>) -> bool {
        match winner {
            Some(winner) => winner == self.name || self.user_id.as_deref() == Some(winner),
            None => false,
        }
    }
}

/// A completed game, normalized from its stored form.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub id: String,
    pub players: Vec<GamePlayer>,
    pub history: Vec<Throw>,
    pub winner: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl GameRecord {
    /// Index of the identity among the players. A user id match wins over an
    /// email match on the player name.
    pub fn player_index(&self, identity: &UserIdentity) -> Option<usize> {
        self.players
            .iter()
            .position(|p| p.user_id.as_deref() == Some(identity.user_id.as_str()))
            .or_else(|| {
                let email = identity.email.as_deref()?;
                self.players.iter().position(|p| p.name == email)
            })
    }

    pub fn has_player(&self, identity: &UserIdentity) -> bool {
        self.player_index(identity).is_some()
    }
}

/// Row of the `games_x01` table. `game_data` is whatever the client stored:
/// usually a JSON document serialized to text, sometimes a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredGame {
    pub id: String,
    pub user_id: String,
    pub game_data: Value,
    pub other_users: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct GameData {
    #[serde(default)]
    players: Vec<GamePlayer>,
    #[serde(default)]
    history: Option<HistoryData>,
    #[serde(default)]
    winner: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HistoryData {
    Structured(Vec<Throw>),
    Serialized(String),
}

impl StoredGame {
    /// Returns true if the user owns the game or is listed among its other users.
    pub fn involves(&self, user_id: &str) -> bool {
        self.user_id == user_id
            || self
                .other_users
                .to_lowercase()
                .contains(&user_id.to_lowercase())
    }

    /// Parses `game_data` into a typed record, accepting both the serialized
    /// and the structured form for the document and for its `history`.
    pub fn to_record(&self) -> Result<GameRecord, GameLogError> {
        let data: GameData = match &self.game_data {
            Value::String(text) => serde_json::from_str(text),
            other => serde_json::from_value(other.clone()),
        }
        .map_err(|e| self.malformed(e))?;

        let history: Vec<Throw> = match data.history {
            None => Vec::new(),
            Some(HistoryData::Structured(throws)) => throws,
            Some(HistoryData::Serialized(text)) => {
                serde_json::from_str(&text).map_err(|e| self.malformed(e))?
            }
        };

        if let Some(throw) = history.iter().find(|t| t.value > MAX_DART_VALUE) {
            return Err(GameLogError::Malformed {
                game_id: self.id.clone(),
                reason: format!("dart value {} is off the board", throw.value),
            });
        }

        Ok(GameRecord {
            id: self.id.clone(),
            players: data.players,
            history,
            winner: data.winner,
            created_at: self.created_at,
        })
    }

    fn malformed(&self, error: serde_json::Error) -> GameLogError {
        GameLogError::Malformed {
            game_id: self.id.clone(),
            reason: error.to_string(),
        }
    }
}
