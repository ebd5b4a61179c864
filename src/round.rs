use log::debug;
use serde::{Deserialize, Serialize};

use crate::features::net_xg;
use crate::model::MatchInput;

/// Rounds whose average |net xG gap| is at or below this get the draw-heavy profile.
pub const BALANCED_THRESHOLD: f64 = 0.25;
pub const EMPTY_ROUND_DELTA: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub form: f64,
    pub xg: f64,
    pub visitor_momentum: f64,
    pub home_adv: f64,
    pub shots: f64,
    pub draw_tendency: f64,
    pub discipline: f64,
}

const W_NORMAL: Weights = Weights {
    form: 28.0,
    xg: 20.0,
    visitor_momentum: 15.0,
    home_adv: 10.0,
    shots: 8.0,
    draw_tendency: 15.0,
    discipline: 4.0,
};

const W_BALANCED: Weights = Weights {
    form: 25.0,
    xg: 18.0,
    visitor_momentum: 10.0,
    home_adv: 8.0,
    shots: 6.0,
    draw_tendency: 30.0,
    discipline: 3.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightProfile {
    Normal,
    Balanced,
}

impl WeightProfile {
    pub fn weights(self) -> &'static Weights {
        match self {
            WeightProfile::Normal => &W_NORMAL,
            WeightProfile::Balanced => &W_BALANCED,
        }
    }

    pub fn is_balanced(self) -> bool {
        self == WeightProfile::Balanced
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundClass {
    pub avg_abs_delta_xg: f64,
    pub profile: WeightProfile,
}

pub fn avg_abs_delta_xg(matches: &[MatchInput]) -> f64 {
    if matches.is_empty() {
        return EMPTY_ROUND_DELTA;
    }
    let sum: f64 = matches
        .iter()
        .map(|m| (net_xg(&m.home.last5) - net_xg(&m.away.last5)).abs())
        .sum();
    sum / matches.len() as f64
}

/// Picks one profile for the whole batch. Must see every match before any is scored.
pub fn classify_round(matches: &[MatchInput]) -> RoundClass {
    let avg = avg_abs_delta_xg(matches);
    let profile = if avg <= BALANCED_THRESHOLD {
        WeightProfile::Balanced
    } else {
        WeightProfile::Normal
    };
    debug!(
        "round of {} matches: avg |dXG| {:.3} -> {:?}",
        matches.len(),
        avg,
        profile
    );
    RoundClass {
        avg_abs_delta_xg: avg,
        profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Last5, TeamFeatures};

    fn fixture(home_xg: (f64, f64), away_xg: (f64, f64)) -> MatchInput {
        MatchInput::new(
            "H",
            "A",
            TeamFeatures::new(Last5::record(2.0, 1.0, 2.0).with_xg(home_xg.0, home_xg.1)),
            TeamFeatures::new(Last5::record(2.0, 1.0, 2.0).with_xg(away_xg.0, away_xg.1)),
        )
    }

    #[test]
    fn empty_round_uses_default_delta_and_is_normal() {
        let class = classify_round(&[]);
        assert_eq!(class.avg_abs_delta_xg, EMPTY_ROUND_DELTA);
        assert_eq!(class.profile, WeightProfile::Normal);
    }

    #[test]
    fn even_round_is_balanced() {
        let round = vec![fixture((1.3, 1.2), (1.25, 1.2)), fixture((1.0, 1.0), (1.1, 1.0))];
        let class = classify_round(&round);
        assert!(class.avg_abs_delta_xg <= BALANCED_THRESHOLD);
        assert_eq!(class.profile, WeightProfile::Balanced);
    }

    #[test]
    fn one_lopsided_match_shifts_average_past_threshold() {
        let even = fixture((1.0, 1.0), (1.0, 1.0));
        let lopsided = fixture((2.5, 0.5), (0.8, 1.6));
        assert_eq!(classify_round(&[even.clone()]).profile, WeightProfile::Balanced);
        assert_eq!(classify_round(&[even, lopsided]).profile, WeightProfile::Normal);
    }

    #[test]
    fn balanced_profile_favours_draws() {
        let n = WeightProfile::Normal.weights();
        let b = WeightProfile::Balanced.weights();
        assert!(b.draw_tendency > n.draw_tendency);
        assert!(b.form < n.form && b.xg < n.xg && b.home_adv < n.home_adv);
    }
}
