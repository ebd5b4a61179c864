use log::warn;
use rayon::prelude::*;

use crate::features::{clamp01, draw_tendency, form_score, net_xg, shots_score};
use crate::model::{Last5, MatchInput, MatchOutput};
use crate::normalize::to_probs;
use crate::round::{WeightProfile, Weights, classify_round};
use crate::rules::{MatchContext, Note, Rule, ScoreDelta, Scores, apply_rules};

// Flat home-advantage share, scaled by the profile's home weight.
const HOME_ADV_BASE: f64 = 0.58;

/// Scores a whole round. Output `i` belongs to input `i`.
///
/// The weight profile is chosen from the full batch first; the matches are then
/// scored independently (in parallel).
pub fn predict_round(matches: &[MatchInput]) -> Vec<MatchOutput> {
    if matches.is_empty() {
        return Vec::new();
    }
    let class = classify_round(matches);
    matches
        .par_iter()
        .map(|m| score_match(m, class.profile))
        .collect()
}

/// The additive scores before any rule adjustment.
pub fn base_scores(m: &MatchInput, w: &Weights) -> Scores {
    let home_form = form_score(&m.home.last5);
    let away_form = form_score(&m.away.last5);
    let dxg = net_xg(&m.home.last5) - net_xg(&m.away.last5);
    let shots_home = shots_score(&m.home.last5);
    let shots_away = shots_score(&m.away.last5);

    let home = w.form * (home_form - away_form + 0.5)
        + w.xg * clamp01(0.5 + dxg / 2.0)
        + w.shots * clamp01(0.5 + (shots_home - shots_away))
        + w.home_adv * HOME_ADV_BASE;

    let draw = w.draw_tendency * draw_tendency(&m.home.last5, &m.away.last5);

    let away = w.form * (away_form - home_form + 0.5)
        + w.xg * clamp01(0.5 - dxg / 2.0)
        + w.shots * clamp01(0.5 + (shots_away - shots_home));

    Scores { home, draw, away }
}

/// Scores one match under an already-chosen round profile.
pub fn score_match(m: &MatchInput, profile: WeightProfile) -> MatchOutput {
    warn_on_odd_record(&m.home_team, &m.home.last5);
    warn_on_odd_record(&m.away_team, &m.away.last5);

    let mut notes = Vec::new();
    if profile.is_balanced() {
        notes.push(Note::new(Rule::BalancedRound, ScoreDelta::NONE));
    }

    let xg_home = net_xg(&m.home.last5);
    let xg_away = net_xg(&m.away.last5);
    let ctx = MatchContext {
        input: m,
        xg_home,
        xg_away,
        abs_dxg: (xg_home - xg_away).abs(),
    };

    let base = base_scores(m, profile.weights());
    let scores = apply_rules(&ctx, base, &mut notes);
    let (probs, pick) = to_probs(&scores);

    MatchOutput {
        id: m.id.clone(),
        home_team: m.home_team.clone(),
        away_team: m.away_team.clone(),
        probs,
        pick,
        notes,
    }
}

fn warn_on_odd_record(team: &str, l5: &Last5) {
    let games = l5.games();
    if games.is_finite() && (games - 5.0).abs() > f64::EPSILON {
        warn!("{team}: last-5 record sums to {games}, scoring it anyway");
    }
}
