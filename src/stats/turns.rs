use std::collections::BTreeMap;

use crate::games::Throw;

/// Ordering key for turns: leg first, then turn within the leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TurnKey {
    pub leg: u32,
    pub turn_index: u32,
}

impl From<&Throw> for TurnKey {
    fn from(throw: &Throw) -> Self {
        Self {
            leg: throw.leg,
            turn_index: throw.turn_index,
        }
    }
}

/// Scoring bands for a completed visit. Mutually exclusive, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighScore {
    Maximum,
    OneFortyPlus,
    TonPlus,
}

impl HighScore {
    pub fn classify(total: u32) -> Option<Self> {
        match total {
            180 => Some(HighScore::Maximum),
            140.. => Some(HighScore::OneFortyPlus),
            100.. => Some(HighScore::TonPlus),
            _ => None,
        }
    }
}

/// Throws sharing one `TurnKey`, in log order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Turn {
    pub throws: Vec<Throw>,
}

impl Turn {
    pub fn is_complete(&self) -> bool {
        self.throws.len() == 3
    }

    pub fn has_bust(&self) -> bool {
        self.throws.iter().any(|t| t.was_bust)
    }

    pub fn is_single_player(&self) -> bool {
        match self.throws.first() {
            Some(first) => self
                .throws
                .iter()
                .all(|t| t.player_index == first.player_index),
            None => true,
        }
    }

    /// Raw points of all darts in the turn.
    pub fn points(&self) -> u32 {
        self.throws
            .iter()
            .fold(0u32, |total, t| total.saturating_add(t.points()))
    }

    /// Three darts from one player with no bust. Only these visits are
    /// classified into high-score bands or evaluated as checkouts.
    pub fn is_eligible(&self) -> bool {
        self.is_complete() && self.is_single_player() && !self.has_bust()
    }

    pub fn high_score(&self) -> Option<HighScore> {
        if self.is_eligible() {
            HighScore::classify(self.points())
        } else {
            None
        }
    }
}

pub type TurnGroups = BTreeMap<TurnKey, Turn>;

/// Groups one player's throws by turn. Iteration order is `(leg, turn_index)`
/// ascending regardless of log order; throws inside a turn keep log order.
pub fn group_player_turns(history: &[Throw], player_index: usize) -> TurnGroups {
    let mut turns = TurnGroups::new();
    for throw in history.iter().filter(|t| t.player_index == player_index) {
        turns
            .entry(TurnKey::from(throw))
            .or_default()
            .throws
            .push(*throw);
    }
    turns
}
