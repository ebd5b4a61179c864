//! Two-way logistic pregame model with user-supplied coefficients.
//!
//! Coefficients arrive as JSON (`{"intercept": .., "weights": {..}, "metadata": {..}}`)
//! and are applied to named inputs. Booleans count as 1/0.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub intercept: f64,
    pub weights: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
}

impl LogisticModel {
    pub fn display_name(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .unwrap_or("custom model")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Number,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDef {
    pub key: String,
    pub label: String,
    pub kind: FeatureKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Flag(bool),
}

impl FeatureValue {
    fn as_f64(self) -> f64 {
        match self {
            FeatureValue::Number(v) => v,
            FeatureValue::Flag(true) => 1.0,
            FeatureValue::Flag(false) => 0.0,
        }
    }
}

fn model(intercept: f64, weights: &[(&str, f64)], metadata: ModelMetadata) -> LogisticModel {
    LogisticModel {
        intercept,
        weights: weights
            .iter()
            .map(|(k, w)| ((*k).to_string(), *w))
            .collect(),
        metadata: Some(metadata),
    }
}

static DEMO_MODEL: Lazy<LogisticModel> = Lazy::new(|| {
    model(
        -0.15,
        &[
            ("rating_diff", 0.025),
            ("form_diff", 0.12),
            ("home", 0.35),
            ("rest_diff", 0.03),
        ],
        ModelMetadata {
            name: Some("Demo Elo + Form Model".to_string()),
            sport: Some("Generic".to_string()),
            version: Some("1.0".to_string()),
        },
    )
});

pub fn demo_model() -> &'static LogisticModel {
    &DEMO_MODEL
}

/// Template handed out as a starting point for custom coefficient files.
pub fn example_model() -> LogisticModel {
    model(
        0.0,
        &[
            ("rating_diff", 0.02),
            ("form_diff", 0.1),
            ("home", 0.3),
            ("rest_diff", 0.02),
        ],
        ModelMetadata {
            name: Some("Example Model".to_string()),
            sport: Some("Generic".to_string()),
            version: None,
        },
    )
}

pub fn default_features() -> Vec<FeatureDef> {
    let number = |key: &str, label: &str, min: f64, max: f64| FeatureDef {
        key: key.to_string(),
        label: label.to_string(),
        kind: FeatureKind::Number,
        min: Some(min),
        max: Some(max),
        step: Some(1.0),
    };
    vec![
        number("rating_diff", "Rating difference (home - away)", -100.0, 100.0),
        number("form_diff", "Form last 5 games (home - away)", -10.0, 10.0),
        FeatureDef {
            key: "home".to_string(),
            label: "Home advantage".to_string(),
            kind: FeatureKind::Boolean,
            min: None,
            max: None,
            step: None,
        },
        number("rest_diff", "Rest days difference (home - away)", -5.0, 5.0),
    ]
}

/// Parses and validates a coefficient file.
pub fn parse_model_json(raw: &str) -> Result<LogisticModel> {
    let value: Value = serde_json::from_str(raw).context("model is not valid JSON")?;
    let Some(obj) = value.as_object() else {
        bail!("invalid model schema: expected an object");
    };
    if !obj.get("intercept").is_some_and(Value::is_number) {
        bail!("invalid model schema: intercept must be a number");
    }
    let Some(weights) = obj.get("weights").and_then(Value::as_object) else {
        bail!("invalid model schema: weights must be an object");
    };
    if let Some((key, _)) = weights.iter().find(|(_, v)| !v.is_number()) {
        bail!("invalid model schema: weight `{key}` is not a number");
    }
    serde_json::from_value(value).context("invalid model schema")
}

pub fn load_model(path: &Path) -> Result<LogisticModel> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read model file {}", path.display()))?;
    parse_model_json(&raw).with_context(|| format!("load model {}", path.display()))
}

pub fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Home-win probability. Weights without a matching input contribute nothing.
pub fn predict_probability(model: &LogisticModel, inputs: &BTreeMap<String, FeatureValue>) -> f64 {
    let z = model
        .weights
        .iter()
        .filter_map(|(k, w)| inputs.get(k).map(|v| v.as_f64() * w))
        .fold(model.intercept, |acc, term| acc + term);
    logistic(z)
}

pub fn to_decimal_odds(p: f64) -> f64 {
    if p > 0.0 { 1.0 / p } else { f64::INFINITY }
}

pub fn implied_probability(decimal_odds: f64) -> Option<f64> {
    (decimal_odds.is_finite() && decimal_odds > 1.0).then(|| 1.0 / decimal_odds)
}

/// Model probability minus the market's implied probability.
pub fn edge(p: f64, decimal_odds: f64) -> Option<f64> {
    implied_probability(decimal_odds).map(|implied| p - implied)
}
