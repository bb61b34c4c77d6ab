//! "How exciting is this game right now" score.
//!
//! The coefficients are provisional and expected to be tuned; keep the shape
//! `clock * probability * rank` and don't read more precision into it than that.

use crate::{Competition, Competitor, Situation, Status};

/// Regulation length in seconds; the clock factor is zero at kickoff.
pub const REGULATION_SECONDS: i32 = 3600;
pub const CLOCK_WEIGHT: f64 = 0.08;
/// Used whenever there is no live win probability to go on.
pub const NEUTRAL_PROBABILITY: f64 = 0.5;

/// Watchability of one competition, truncated toward zero.
pub fn score(competition: &Competition) -> i64 {
    let raw = clock_factor(&competition.status)
        * probability_factor(competition.situation.as_ref())
        * rank_factor(competition);
    raw.trunc() as i64
}

/// Grows as the clock runs down.
pub fn clock_factor(status: &Status) -> f64 {
    CLOCK_WEIGHT * f64::from(REGULATION_SECONDS - status.clock)
}

/// 1.0 for a dead-even game, falling toward 0.0 as one side runs away with it.
pub fn probability_factor(situation: Option<&Situation>) -> f64 {
    match situation.and_then(|s| s.last_play.probability.as_ref()) {
        Some(p) => 1.0 - (p.home_win_percentage - p.away_win_percentage).abs(),
        None => NEUTRAL_PROBABILITY,
    }
}

/// Reserved for weighting ranked matchups; always 1.0 for now.
pub fn rank_factor(_competition: &Competition) -> f64 {
    1.0
}

/// Live win probability for `competitor`, or an even 0.5 when the feed has none.
/// Never 0.0 on missing data: that would read as "cannot win".
pub fn win_percentage(competition: &Competition, competitor: &Competitor) -> f64 {
    match competition.probability() {
        Some(p) if competitor.is_home() => p.home_win_percentage,
        Some(p) => p.away_win_percentage,
        None => NEUTRAL_PROBABILITY,
    }
}
