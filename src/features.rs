use crate::model::Last5;

// Fallback proxy weights when xG is missing: shots on target and goals.
const SOT_XG_WEIGHT: f64 = 0.12;
const GOALS_XG_WEIGHT: f64 = 0.25;
// Typical shots-on-target spread is about +-4 per match.
const SOT_RANGE: f64 = 8.0;

/// Missing or non-finite numbers read as 0.
pub fn nz(v: Option<f64>) -> f64 {
    match v {
        Some(x) if x.is_finite() => x,
        _ => 0.0,
    }
}

fn num(v: f64) -> f64 {
    nz(Some(v))
}

pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

pub fn clamp01(v: f64) -> f64 {
    clamp(v, 0.0, 1.0)
}

/// xG for minus xG against; falls back to a light SOT/goals proxy when either xG side is absent.
pub fn net_xg(l5: &Last5) -> f64 {
    if let (Some(xg_for), Some(xg_against)) = (l5.xg_for, l5.xg_against) {
        return nz(Some(xg_for)) - nz(Some(xg_against));
    }
    let sot_net = nz(l5.sot_for) - nz(l5.sot_against);
    let goals_net = nz(l5.goals_for) - nz(l5.goals_against);
    SOT_XG_WEIGHT * sot_net + GOALS_XG_WEIGHT * goals_net
}

/// Points from the last five games over the 15 available.
pub fn form_score(l5: &Last5) -> f64 {
    let pts = num(l5.wins) * 3.0 + num(l5.draws);
    clamp01(pts / 15.0)
}

pub fn shots_score(l5: &Last5) -> f64 {
    let net = nz(l5.sot_for) - nz(l5.sot_against);
    clamp01(0.5 + net / SOT_RANGE)
}

pub fn draw_tendency(home: &Last5, away: &Last5) -> f64 {
    let d_home = clamp01(num(home.draws) / 5.0);
    let d_away = clamp01(num(away.draws) / 5.0);
    (d_home + d_away) / 2.0
}
