use super::models::GameStats;

/// Three-dart average at or above which scoring counts as a strength
pub const STRONG_AVERAGE: f64 = 60.0;
/// Checkout percentage at or above which finishing counts as a strength
pub const GOOD_CHECKOUT_RATE: f64 = 40.0;
/// Opening average below which a starting-score tip is given
pub const STRONG_OPENING: f64 = 50.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub training_tips: Vec<String>,
}

type Rule = fn(&GameStats, &mut Feedback);

/// Evaluated in order; each rule may add to any of the three lists.
const RULES: [Rule; 5] = [
    scoring_average,
    checkout_rate,
    maximums,
    consistent_high_scoring,
    opening_scores,
];

/// Derives strengths, weaknesses and training tips from the numeric stats.
pub fn derive_feedback(stats: &GameStats) -> Feedback {
    let mut feedback = Feedback::default();
    for rule in RULES {
        rule(stats, &mut feedback);
    }
    feedback
}

fn scoring_average(stats: &GameStats, feedback: &mut Feedback) {
    if stats.total_average >= STRONG_AVERAGE {
        feedback.strengths.push("Strong scoring average".to_string());
    } else {
        feedback
            .weaknesses
            .push("Scoring average needs improvement".to_string());
        feedback
            .training_tips
            .push("Practice grouping around treble 20".to_string());
        feedback
            .training_tips
            .push("Work on consistent throw mechanics".to_string());
    }
}

fn checkout_rate(stats: &GameStats, feedback: &mut Feedback) {
    if stats.checkout_rate >= GOOD_CHECKOUT_RATE {
        feedback
            .strengths
            .push("Good checkout percentage".to_string());
        return;
    }

    feedback
        .weaknesses
        .push("Checkout success rate needs work".to_string());
    feedback
        .training_tips
        .push("Practice double shooting with round the clock".to_string());
    if let Some(top_miss) = stats.common_checkout_misses.first() {
        feedback
            .training_tips
            .push(format!("Focus on {} checkout practice", top_miss.score));
    }
}

fn maximums(stats: &GameStats, feedback: &mut Feedback) {
    if stats.scores_180 > 0 {
        feedback
            .strengths
            .push(format!("Hit {} maximum scores", stats.scores_180));
    }
}

fn consistent_high_scoring(stats: &GameStats, feedback: &mut Feedback) {
    if stats.scores_140_plus > stats.scores_180 * 2 {
        feedback
            .strengths
            .push("Consistent high scoring".to_string());
    }
}

fn opening_scores(stats: &GameStats, feedback: &mut Feedback) {
    if stats.average_first_9 < STRONG_OPENING {
        feedback
            .training_tips
            .push("Focus on strong starting scores".to_string());
    }
}
