//! Rule-based score adjustments.
//!
//! Rules run in a fixed order over one match's running scores. Each rule looks at
//! the match and the scores so far and either fires, yielding a [`Note`] whose
//! delta is added to the scores, or stays silent.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::features::nz;
use crate::model::MatchInput;

const VERY_TIGHT_DXG: f64 = 0.15;
const TIGHT_DXG: f64 = 0.20;
const VISITOR_XG_EDGE: f64 = 0.3;
const RED_CARD_RATE: f64 = 0.2;
const H2H_MAJORITY: f64 = 3.0;
const OVERCONFIDENT_SCORE: f64 = 65.0;
const OVERCONFIDENT_MAX_DXG: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl Scores {
    pub fn apply(&mut self, delta: ScoreDelta) {
        self.home += delta.home;
        self.draw += delta.draw;
        self.away += delta.away;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl ScoreDelta {
    pub const NONE: ScoreDelta = ScoreDelta::new(0.0, 0.0, 0.0);

    pub const fn new(home: f64, draw: f64, away: f64) -> Self {
        Self { home, draw, away }
    }

    pub fn is_zero(&self) -> bool {
        self.home == 0.0 && self.draw == 0.0 && self.away == 0.0
    }
}

impl fmt::Display for ScoreDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [("home", self.home), ("draw", self.draw), ("away", self.away)]
            .into_iter()
            .filter(|(_, v)| *v != 0.0)
            .map(|(label, v)| format!("{v:+} {label}"))
            .collect::<Vec<_>>();
        f.write_str(&parts.join(" / "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    BalancedRound,
    VeryTightMatch,
    TightMatch,
    VisitorMomentum,
    HomeIndiscipline,
    AwayIndiscipline,
    HomeGoalieOut,
    AwayGoalieOut,
    HomeKeyScorerOut,
    AwayKeyScorerOut,
    H2hFavorsHome,
    H2hFavorsAway,
    H2hManyDraws,
    H2hAwayRoadWins,
    OverconfidenceCut,
}

impl Rule {
    pub fn code(self) -> &'static str {
        match self {
            Rule::BalancedRound => "balanced_round",
            Rule::VeryTightMatch => "very_tight_match",
            Rule::TightMatch => "tight_match",
            Rule::VisitorMomentum => "visitor_momentum",
            Rule::HomeIndiscipline => "home_indiscipline",
            Rule::AwayIndiscipline => "away_indiscipline",
            Rule::HomeGoalieOut => "home_goalie_out",
            Rule::AwayGoalieOut => "away_goalie_out",
            Rule::HomeKeyScorerOut => "home_key_scorer_out",
            Rule::AwayKeyScorerOut => "away_key_scorer_out",
            Rule::H2hFavorsHome => "h2h_favors_home",
            Rule::H2hFavorsAway => "h2h_favors_away",
            Rule::H2hManyDraws => "h2h_many_draws",
            Rule::H2hAwayRoadWins => "h2h_away_road_wins",
            Rule::OverconfidenceCut => "overconfidence_cut",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Rule::BalancedRound => "Balanced round: extra weight on the draw",
            Rule::VeryTightMatch => "Very tight match",
            Rule::TightMatch => "Tight match",
            Rule::VisitorMomentum => "Dangerous visitor",
            Rule::HomeIndiscipline => "Home side undisciplined",
            Rule::AwayIndiscipline => "Away side undisciplined",
            Rule::HomeGoalieOut => "Home goalkeeper out",
            Rule::AwayGoalieOut => "Away goalkeeper out",
            Rule::HomeKeyScorerOut => "Home top scorer out",
            Rule::AwayKeyScorerOut => "Away top scorer out",
            Rule::H2hFavorsHome => "H2H favours the home side",
            Rule::H2hFavorsAway => "H2H favours the visitor",
            Rule::H2hManyDraws => "H2H full of draws",
            Rule::H2hAwayRoadWins => "Visitor has won away here repeatedly",
            Rule::OverconfidenceCut => "Favourite overconfidence cut",
        }
    }
}

/// One fired adjustment: which rule, and what it did to the scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub rule: Rule,
    pub delta: ScoreDelta,
}

impl Note {
    pub fn new(rule: Rule, delta: ScoreDelta) -> Self {
        Self { rule, delta }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.delta.is_zero() {
            write!(f, "{}.", self.rule.describe())
        } else {
            write!(f, "{}: {}.", self.rule.describe(), self.delta)
        }
    }
}

/// Per-match values fixed before the rule chain starts. Rules never recompute them.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    pub input: &'a MatchInput,
    pub xg_home: f64,
    pub xg_away: f64,
    pub abs_dxg: f64,
}

pub type RuleFn = fn(&MatchContext<'_>, &Scores) -> Option<Note>;

pub const RULES: &[RuleFn] = &[
    parity,
    visitor_momentum,
    home_indiscipline,
    away_indiscipline,
    home_goalie_out,
    away_goalie_out,
    home_key_scorer_out,
    away_key_scorer_out,
    h2h_favors_home,
    h2h_favors_away,
    h2h_many_draws,
    h2h_away_road_wins,
    overconfidence_cut,
];

/// Folds `RULES` over the base scores, appending one note per fired rule.
pub fn apply_rules(ctx: &MatchContext<'_>, base: Scores, notes: &mut Vec<Note>) -> Scores {
    RULES.iter().fold(base, |mut scores, rule| {
        if let Some(note) = rule(ctx, &scores) {
            scores.apply(note.delta);
            debug!(
                "{} v {}: {}",
                ctx.input.home_team, ctx.input.away_team, note
            );
            notes.push(note);
        }
        scores
    })
}

fn fire(cond: bool, rule: Rule, home: f64, draw: f64, away: f64) -> Option<Note> {
    cond.then(|| Note::new(rule, ScoreDelta::new(home, draw, away)))
}

pub fn parity(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    if ctx.abs_dxg <= VERY_TIGHT_DXG {
        fire(true, Rule::VeryTightMatch, 0.0, 12.0, 0.0)
    } else {
        fire(ctx.abs_dxg <= TIGHT_DXG, Rule::TightMatch, 0.0, 8.0, 0.0)
    }
}

pub fn visitor_momentum(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    let l5 = &ctx.input.away.last5;
    let hot = nz(l5.away_wins) >= 2.0
        || nz(l5.away_wins_streak) >= 2.0
        || ctx.xg_away - ctx.xg_home >= VISITOR_XG_EDGE;
    fire(hot, Rule::VisitorMomentum, -4.0, -3.0, 7.0)
}

pub fn home_indiscipline(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    let cond = nz(ctx.input.home.red_cards_per_match) > RED_CARD_RATE;
    fire(cond, Rule::HomeIndiscipline, -3.0, 1.0, 2.0)
}

pub fn away_indiscipline(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    let cond = nz(ctx.input.away.red_cards_per_match) > RED_CARD_RATE;
    fire(cond, Rule::AwayIndiscipline, 2.0, 1.0, -3.0)
}

pub fn home_goalie_out(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    fire(ctx.input.home.goalie_out, Rule::HomeGoalieOut, -4.0, 2.0, 2.0)
}

pub fn away_goalie_out(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    fire(ctx.input.away.goalie_out, Rule::AwayGoalieOut, 2.0, 2.0, -4.0)
}

pub fn home_key_scorer_out(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    fire(ctx.input.home.key_scorer_out, Rule::HomeKeyScorerOut, -2.0, 1.0, 0.0)
}

pub fn away_key_scorer_out(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    fire(ctx.input.away.key_scorer_out, Rule::AwayKeyScorerOut, 0.0, 1.0, -2.0)
}

pub fn h2h_favors_home(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    let h2h = ctx.input.h2h_last5.as_ref()?;
    fire(nz(Some(h2h.home_wins)) >= H2H_MAJORITY, Rule::H2hFavorsHome, 5.0, 0.0, 0.0)
}

pub fn h2h_favors_away(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    let h2h = ctx.input.h2h_last5.as_ref()?;
    fire(nz(Some(h2h.away_wins)) >= H2H_MAJORITY, Rule::H2hFavorsAway, 0.0, 0.0, 5.0)
}

pub fn h2h_many_draws(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    let h2h = ctx.input.h2h_last5.as_ref()?;
    fire(nz(Some(h2h.draws)) >= H2H_MAJORITY, Rule::H2hManyDraws, 0.0, 6.0, 0.0)
}

pub fn h2h_away_road_wins(ctx: &MatchContext<'_>, _: &Scores) -> Option<Note> {
    let h2h = ctx.input.h2h_last5.as_ref()?;
    fire(nz(h2h.away_wins_away) >= H2H_MAJORITY, Rule::H2hAwayRoadWins, 0.0, 0.0, 3.0)
}

/// A big favourite on a small xG gap gives some of its score back. Home wins ties.
pub fn overconfidence_cut(ctx: &MatchContext<'_>, scores: &Scores) -> Option<Note> {
    let fav = scores.home.max(scores.away);
    if fav <= OVERCONFIDENT_SCORE || ctx.abs_dxg > OVERCONFIDENT_MAX_DXG {
        return None;
    }
    if scores.home >= scores.away {
        fire(true, Rule::OverconfidenceCut, -5.0, 3.0, 2.0)
    } else {
        fire(true, Rule::OverconfidenceCut, 2.0, 3.0, -5.0)
    }
}
