use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

use dartstats::{
    games::{GamePlayer, Multiplier},
    GameRecord, StoredGame, Throw,
};

// ============================================================================
// Dart shorthands
// ============================================================================

pub fn s(value: u32) -> (u32, Multiplier) {
    (value, Multiplier::Single)
}

pub fn d(value: u32) -> (u32, Multiplier) {
    (value, Multiplier::Double)
}

pub fn t(value: u32) -> (u32, Multiplier) {
    (value, Multiplier::Triple)
}

// ============================================================================
// Game Log Builder
// ============================================================================

pub struct GameLogBuilder {
    id: String,
    players: Vec<GamePlayer>,
    history: Vec<Throw>,
    winner: Option<String>,
    created_at: DateTime<Utc>,
}

impl GameLogBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            players: vec![],
            history: vec![],
            winner: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 19, 0, 0).unwrap(),
        }
    }

    /// Alice (by user id) against Bob
    pub fn with_alice_and_bob(self) -> Self {
        self.with_player("alice@example.com", Some("alice"))
            .with_player("bob@example.com", Some("bob"))
    }

    pub fn with_player(mut self, name: &str, user_id: Option<&str>) -> Self {
        self.players.push(GamePlayer {
            name: name.to_string(),
            user_id: user_id.map(str::to_string),
        });
        self
    }

    pub fn created_minutes_later(mut self, minutes: i64) -> Self {
        self.created_at = self.created_at + Duration::minutes(minutes);
        self
    }

    pub fn won_by(mut self, winner: &str) -> Self {
        self.winner = Some(winner.to_string());
        self
    }

    /// Appends a visit. `score` on each dart is the remaining score before it.
    pub fn visit(
        mut self,
        player_index: usize,
        leg: u32,
        turn_index: u32,
        start: i32,
        darts: &[(u32, Multiplier)],
    ) -> Self {
        let mut remaining = start;
        for &(value, multiplier) in darts {
            let throw = Throw {
                value,
                multiplier,
                player_index,
                score: Some(remaining),
                leg,
                turn_index,
                was_bust: false,
            };
            remaining = remaining.saturating_sub(i32::try_from(throw.points()).unwrap_or(i32::MAX));
            self.history.push(throw);
        }
        self
    }

    /// Marks the most recent dart as a bust
    pub fn bust_last(mut self) -> Self {
        if let Some(last) = self.history.last_mut() {
            last.was_bust = true;
        }
        self
    }

    pub fn reversed_history(mut self) -> Self {
        self.history.reverse();
        self
    }

    fn document(&self) -> Value {
        json!({
            "players": self.players,
            "history": self.history,
            "winner": self.winner,
        })
    }

    pub fn build_record(self) -> GameRecord {
        GameRecord {
            id: self.id,
            players: self.players,
            history: self.history,
            winner: self.winner,
            created_at: self.created_at,
        }
    }

    /// Stored row with `game_data` serialized to text, as the web client saves it
    pub fn build_stored(self, owner: &str) -> StoredGame {
        StoredGame {
            id: self.id.clone(),
            user_id: owner.to_string(),
            game_data: Value::String(self.document().to_string()),
            other_users: String::new(),
            created_at: self.created_at,
        }
    }

    /// Stored row with `game_data` kept as a JSON object
    pub fn build_stored_structured(self, owner: &str) -> StoredGame {
        StoredGame {
            id: self.id.clone(),
            user_id: owner.to_string(),
            game_data: self.document(),
            other_users: String::new(),
            created_at: self.created_at,
        }
    }
}
