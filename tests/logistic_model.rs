use std::collections::BTreeMap;
use std::path::PathBuf;

use matchday_forecaster::logistic::{
    FeatureValue, edge, load_model, logistic, predict_probability, to_decimal_odds,
};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn loads_custom_model_file() {
    let model = load_model(&fixture_path("model.json")).expect("model should load");
    assert_eq!(model.display_name(), "League Fit");
    assert_eq!(model.weights.len(), 4);
    let meta = model.metadata.as_ref().expect("metadata");
    assert_eq!(meta.sport.as_deref(), Some("Soccer"));
    assert_eq!(meta.version.as_deref(), Some("2.1"));
}

#[test]
fn rejects_non_numeric_weights() {
    let err = load_model(&fixture_path("bad_model.json")).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("rating_diff"), "{chain}");
}

#[test]
fn missing_model_file_reports_path() {
    let err = load_model(&fixture_path("nope.json")).unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}

#[test]
fn custom_model_prediction_and_market_edge() {
    let model = load_model(&fixture_path("model.json")).expect("model should load");
    let mut inputs = BTreeMap::new();
    inputs.insert("rating_diff".to_string(), FeatureValue::Number(25.0));
    inputs.insert("home".to_string(), FeatureValue::Flag(true));

    let p = predict_probability(&model, &inputs);
    let expected = logistic(0.1 + 0.3 + 25.0 * 0.02);
    assert!((p - expected).abs() < 1e-12);
    assert!(p > 0.5);

    let fair = to_decimal_odds(p);
    assert!((fair * p - 1.0).abs() < 1e-12);

    // A price longer than fair means a positive edge.
    let e = edge(p, fair + 0.5).expect("valid odds");
    assert!(e > 0.0);
}
