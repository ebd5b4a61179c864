use rand::Rng;

use crate::model::{H2hLast5, Last5, MatchId, MatchInput, TeamFeatures};

const TEAMS: &[&str] = &[
    "Flamengo", "Palmeiras", "Santos", "Gremio", "Bahia", "Fortaleza", "Botafogo", "Vasco",
    "Cruzeiro", "Bragantino", "Cuiaba", "Goias", "Coritiba", "Juventude", "Sport", "Ceara",
];

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn random_record<R: Rng>(rng: &mut R) -> (f64, f64, f64) {
    let wins = rng.gen_range(0..=5);
    let draws = rng.gen_range(0..=5 - wins);
    (wins as f64, draws as f64, (5 - wins - draws) as f64)
}

fn random_last5<R: Rng>(rng: &mut R, travelling: bool) -> Last5 {
    let (wins, draws, losses) = random_record(rng);
    let mut l5 = Last5::record(wins, draws, losses)
        .with_sot(round2(rng.gen_range(2.0..7.0)), round2(rng.gen_range(2.0..7.0)))
        .with_goals(round2(rng.gen_range(0.4..2.4)), round2(rng.gen_range(0.4..2.4)));
    // Leave xG out now and then so the SOT/goals fallback gets used.
    if rng.gen_bool(0.8) {
        l5 = l5.with_xg(round2(rng.gen_range(0.6..2.2)), round2(rng.gen_range(0.6..2.2)));
    }
    if travelling {
        let away_wins = rng.gen_range(0..=wins as u32);
        l5.away_wins = Some(away_wins as f64);
        l5.away_wins_streak = Some(rng.gen_range(0..=away_wins) as f64);
    }
    l5
}

fn random_side<R: Rng>(rng: &mut R, travelling: bool) -> TeamFeatures {
    TeamFeatures {
        last5: random_last5(rng, travelling),
        red_cards_per_match: Some(round2(rng.gen_range(0.0..0.35))),
        goalie_out: rng.gen_bool(0.08),
        key_scorer_out: rng.gen_bool(0.12),
    }
}

fn random_h2h<R: Rng>(rng: &mut R) -> H2hLast5 {
    let (home_wins, draws, away_wins) = random_record(rng);
    H2hLast5 {
        home_wins,
        draws,
        away_wins,
        away_wins_away: Some(rng.gen_range(0..=away_wins as u32) as f64),
    }
}

/// A plausible round of `n` matches for demos and benchmarks.
pub fn random_round<R: Rng>(rng: &mut R, n: usize) -> Vec<MatchInput> {
    (0..n)
        .map(|i| {
            let home = TEAMS[(2 * i) % TEAMS.len()];
            let away = TEAMS[(2 * i + 1) % TEAMS.len()];
            let mut m = MatchInput::new(home, away, random_side(rng, false), random_side(rng, true));
            m.id = Some(MatchId::Num(i as i64 + 1));
            if rng.gen_bool(0.7) {
                m.h2h_last5 = Some(random_h2h(rng));
            }
            m
        })
        .collect()
}
