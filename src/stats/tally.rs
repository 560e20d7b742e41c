use super::models::CheckoutRecord;
use super::turns::HighScore;

/// Checkout attempts per starting score, kept in the order values were first
/// recorded so that ranking ties are resolved by first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutBook {
    entries: Vec<CheckoutRecord>,
}

impl CheckoutBook {
    fn entry(&mut self, score: i32) -> &mut CheckoutRecord {
        let index = match self.entries.iter().position(|e| e.score == score) {
            Some(index) => index,
            None => {
                self.entries.push(CheckoutRecord::new(score));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    pub fn record_success(&mut self, score: i32) {
        let entry = self.entry(score);
        entry.attempts += 1;
        entry.successes += 1;
    }

    pub fn record_miss(&mut self, score: i32) {
        self.entry(score).attempts += 1;
    }

    pub fn merge(&mut self, other: CheckoutBook) {
        for record in other.entries {
            let entry = self.entry(record.score);
            entry.attempts += record.attempts;
            entry.successes += record.successes;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Up to `limit` values with the most attempts. The sort is stable.
    pub fn most_attempted(&self, limit: usize) -> Vec<CheckoutRecord> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.attempts.cmp(&a.attempts));
        ranked.truncate(limit);
        ranked
    }
}

/// Average and dart count of a single leg
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegSummary {
    pub average: f64,
    pub darts: u32,
}

/// Running totals for one player over one or more games
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchTally {
    pub games_won: u32,
    pub total_score: u64,
    pub total_darts: u64,
    pub checkout_attempts: u32,
    pub checkout_successes: u32,
    pub first_9_score: u64,
    pub first_9_rounds: u32,
    pub scores_180: u32,
    pub scores_140_plus: u32,
    pub scores_100_plus: u32,
    pub best_leg: Option<LegSummary>,
    pub checkouts: CheckoutBook,
}

impl MatchTally {
    /// Folds a finished leg into the totals. A leg only becomes the best leg
    /// if its average is strictly higher, so ties keep the earlier leg.
    pub fn close_leg(&mut self, score: u32, darts: u32) {
        if darts == 0 {
            return;
        }

        let average = f64::from(score) / (f64::from(darts) / 3.0);
        self.offer_best_leg(LegSummary { average, darts });
        self.total_score += u64::from(score);
        self.total_darts += u64::from(darts);
    }

    fn offer_best_leg(&mut self, leg: LegSummary) {
        let best = self.best_leg.map_or(0.0, |b| b.average);
        if leg.average > best {
            self.best_leg = Some(leg);
        }
    }

    pub fn record_high_score(&mut self, band: HighScore) {
        match band {
            HighScore::Maximum => self.scores_180 += 1,
            HighScore::OneFortyPlus => self.scores_140_plus += 1,
            HighScore::TonPlus => self.scores_100_plus += 1,
        }
    }

    pub fn record_first_9(&mut self, score: u32) {
        self.first_9_score += u64::from(score);
        self.first_9_rounds += 1;
    }

    /// Combines two tallies. `self` is treated as the earlier one.
    pub fn merge(mut self, other: MatchTally) -> MatchTally {
        self.games_won += other.games_won;
        self.total_score += other.total_score;
        self.total_darts += other.total_darts;
        self.checkout_attempts += other.checkout_attempts;
        self.checkout_successes += other.checkout_successes;
        self.first_9_score += other.first_9_score;
        self.first_9_rounds += other.first_9_rounds;
        self.scores_180 += other.scores_180;
        self.scores_140_plus += other.scores_140_plus;
        self.scores_100_plus += other.scores_100_plus;
        if let Some(leg) = other.best_leg {
            self.offer_best_leg(leg);
        }
        self.checkouts.merge(other.checkouts);
        self
    }

    /// Three-dart average over every leg
    pub fn total_average(&self) -> f64 {
        if self.total_darts == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.total_darts as f64 * 3.0
    }

    pub fn checkout_rate(&self) -> f64 {
        if self.checkout_attempts == 0 {
            return 0.0;
        }
        f64::from(self.checkout_successes) / f64::from(self.checkout_attempts) * 100.0
    }

    pub fn average_first_9(&self) -> f64 {
        if self.first_9_rounds == 0 {
            return 0.0;
        }
        self.first_9_score as f64 / f64::from(self.first_9_rounds)
    }
}
