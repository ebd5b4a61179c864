use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::rules::Note;

// JSON `null` counts as missing, which the scorer reads as 0.
fn null_as_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(d)?.unwrap_or(0.0))
}

fn null_as_false<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(d)?.unwrap_or(false))
}

/// Recent-form snapshot over a team's last five matches.
///
/// Only `wins`/`draws`/`losses` are expected; everything else may be absent.
/// Per-match averages (`xg_for`, `sot_for`, ...) are averages, not totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Last5 {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub wins: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub draws: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub losses: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xg_for: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xg_against: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sot_for: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sot_against: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals_for: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals_against: Option<f64>,
    // Only meaningful for the travelling side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_wins: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_wins_streak: Option<f64>,
}

impl Last5 {
    pub fn record(wins: f64, draws: f64, losses: f64) -> Self {
        Self {
            wins,
            draws,
            losses,
            ..Self::default()
        }
    }

    pub fn with_xg(mut self, xg_for: f64, xg_against: f64) -> Self {
        self.xg_for = Some(xg_for);
        self.xg_against = Some(xg_against);
        self
    }

    pub fn with_sot(mut self, sot_for: f64, sot_against: f64) -> Self {
        self.sot_for = Some(sot_for);
        self.sot_against = Some(sot_against);
        self
    }

    pub fn with_goals(mut self, goals_for: f64, goals_against: f64) -> Self {
        self.goals_for = Some(goals_for);
        self.goals_against = Some(goals_against);
        self
    }

    pub fn games(&self) -> f64 {
        self.wins + self.draws + self.losses
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamFeatures {
    pub last5: Last5,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_cards_per_match: Option<f64>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub goalie_out: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub key_scorer_out: bool,
}

impl TeamFeatures {
    pub fn new(last5: Last5) -> Self {
        Self {
            last5,
            ..Self::default()
        }
    }
}

/// Results of the last five meetings, from the current home side's point of view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct H2hLast5 {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub home_wins: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub draws: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub away_wins: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_wins_away: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchId {
    Num(i64),
    // Fractional ids, or integers past i64.
    Float(f64),
    Text(String),
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchId::Num(n) => write!(f, "{n}"),
            MatchId::Float(n) => write!(f, "{n}"),
            MatchId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MatchId>,
    pub home_team: String,
    pub away_team: String,
    pub home: TeamFeatures,
    pub away: TeamFeatures,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h2h_last5: Option<H2hLast5>,
}

impl MatchInput {
    pub fn new(home_team: &str, away_team: &str, home: TeamFeatures, away: TeamFeatures) -> Self {
        Self {
            id: None,
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home,
            away,
            h2h_last5: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pick {
    Home,
    Draw,
    Away,
}

impl Pick {
    pub fn as_str(self) -> &'static str {
        match self {
            Pick::Home => "HOME",
            Pick::Draw => "DRAW",
            Pick::Away => "AWAY",
        }
    }
}

/// Rounded percentages. Each is rounded on its own, so the sum may drift off 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probs {
    pub home: u8,
    pub draw: u8,
    pub away: u8,
}

impl Probs {
    pub fn total(&self) -> u32 {
        self.home as u32 + self.draw as u32 + self.away as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MatchId>,
    pub home_team: String,
    pub away_team: String,
    pub probs: Probs,
    pub pick: Pick,
    pub notes: Vec<Note>,
}
