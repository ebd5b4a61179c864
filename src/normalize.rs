use crate::model::{Pick, Probs};
use crate::rules::Scores;

// Equal split used when every score floors to zero.
const EQUAL_SHARE: f64 = 0.3333;

/// Shares of the total, or the equal-split fallback when the total is not positive.
pub fn normalize3(a: f64, b: f64, c: f64) -> (f64, f64, f64) {
    let sum = a + b + c;
    if sum <= 0.0 {
        return (EQUAL_SHARE, EQUAL_SHARE, EQUAL_SHARE);
    }
    (a / sum, b / sum, c / sum)
}

/// Floors negative scores at zero and scales to percentages (unrounded).
pub fn percentages(scores: &Scores) -> (f64, f64, f64) {
    let (h, d, a) = normalize3(
        scores.home.max(0.0),
        scores.draw.max(0.0),
        scores.away.max(0.0),
    );
    (h * 100.0, d * 100.0, a * 100.0)
}

/// Ties go home first, then away, then draw.
pub fn pick_for(ph: f64, pd: f64, pa: f64) -> Pick {
    if ph >= pd && ph >= pa {
        Pick::Home
    } else if pa >= ph && pa >= pd {
        Pick::Away
    } else {
        Pick::Draw
    }
}

fn round_pct(v: f64) -> u8 {
    v.round().clamp(0.0, 100.0) as u8
}

/// Rounds each component on its own; the integer sum is left as it falls.
pub fn to_probs(scores: &Scores) -> (Probs, Pick) {
    let (ph, pd, pa) = percentages(scores);
    let probs = Probs {
        home: round_pct(ph),
        draw: round_pct(pd),
        away: round_pct(pa),
    };
    (probs, pick_for(ph, pd, pa))
}
