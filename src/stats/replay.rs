use tracing::trace;

use super::config::ScoreConvention;
use super::tally::MatchTally;
use super::turns::{group_player_turns, Turn};
use crate::games::{Multiplier, Throw};

/// Highest score that can be finished in one visit
pub const MAX_CHECKOUT: i32 = 170;

/// Remaining scores at or below this count as a missed checkout when a visit
/// ends without finishing.
pub const CHECKOUT_MISS_CEILING: i32 = 50;

const FIRST_9_DARTS: u32 = 3;

/// Per-leg running state
#[derive(Debug, Default)]
struct LegState {
    number: Option<u32>,
    score: u32,
    darts: u32,
    first_9_score: u32,
    first_9_darts: u32,
}

impl LegState {
    fn starting(number: u32) -> Self {
        Self {
            number: Some(number),
            ..Self::default()
        }
    }

    fn record_dart(&mut self, throw: &Throw, tally: &mut MatchTally) {
        self.score = self.score.saturating_add(throw.counted_points());
        self.darts = self.darts.saturating_add(1);

        if !throw.was_bust && self.first_9_darts < FIRST_9_DARTS {
            self.first_9_score = self.first_9_score.saturating_add(throw.points());
            self.first_9_darts += 1;
            if self.first_9_darts == FIRST_9_DARTS {
                tally.record_first_9(self.first_9_score);
            }
        }
    }

    fn close(&self, tally: &mut MatchTally) {
        if let Some(number) = self.number {
            trace!(leg = number, score = self.score, darts = self.darts, "Closing leg");
        }
        tally.close_leg(self.score, self.darts);
    }
}

/// Replays one player's darts from a game log into a fresh tally.
///
/// The log may be in any order; darts are walked by `(leg, turn_index)`.
/// Busted darts count towards the dart total but not the score.
pub fn replay_player(
    history: &[Throw],
    player_index: usize,
    convention: ScoreConvention,
) -> MatchTally {
    let turns = group_player_turns(history, player_index);
    let mut tally = MatchTally::default();
    let mut leg = LegState::default();

    for (key, turn) in &turns {
        if leg.number != Some(key.leg) {
            leg.close(&mut tally);
            leg = LegState::starting(key.leg);
        }

        if let Some(band) = turn.high_score() {
            tally.record_high_score(band);
        }

        for (position, throw) in turn.throws.iter().enumerate() {
            leg.record_dart(throw, &mut tally);

            if position == 2 && turn.is_eligible() {
                record_checkout(turn, throw, convention, &mut tally);
            }
        }
    }

    leg.close(&mut tally);
    tally
}

/// Evaluates the third dart of a clean visit that started on a finishable score.
fn record_checkout(
    turn: &Turn,
    last: &Throw,
    convention: ScoreConvention,
    tally: &mut MatchTally,
) {
    let Some(start) = turn.throws.first().and_then(|t| convention.turn_start(t)) else {
        return;
    };
    if start > MAX_CHECKOUT {
        return;
    }

    tally.checkout_attempts += 1;

    match convention.remaining_after(last) {
        Some(0) if last.multiplier == Multiplier::Double && !last.was_bust => {
            tally.checkout_successes += 1;
            tally.checkouts.record_success(start);
        }
        Some(remaining) if remaining > 0 && remaining <= CHECKOUT_MISS_CEILING => {
            tally.checkouts.record_miss(start);
        }
        _ => {}
    }
}
