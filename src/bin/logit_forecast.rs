use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::debug;

use matchday_forecaster::logistic::{
    self, FeatureKind, FeatureValue, default_features, demo_model, load_model,
    predict_probability,
};

fn parse_feature(raw: &str, kinds: &BTreeMap<String, FeatureKind>) -> Result<(String, FeatureValue)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("expected key=value, got `{raw}`");
    };
    let key = key.trim().to_string();
    let value = value.trim();
    let parsed = match kinds.get(&key) {
        Some(FeatureKind::Boolean) => match value {
            "1" | "true" | "yes" => FeatureValue::Flag(true),
            "0" | "false" | "no" => FeatureValue::Flag(false),
            _ => bail!("feature `{key}` expects true/false"),
        },
        _ => FeatureValue::Number(
            value
                .parse::<f64>()
                .with_context(|| format!("feature `{key}` is not a number"))?,
        ),
    };
    Ok((key, parsed))
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let kinds: BTreeMap<String, FeatureKind> = default_features()
        .into_iter()
        .map(|f| (f.key, f.kind))
        .collect();

    let mut model_path: Option<PathBuf> = std::env::var("FORECAST_MODEL").ok().map(PathBuf::from);
    let mut market: Option<f64> = None;
    let mut inputs = BTreeMap::new();
    let mut print_example = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--model" => {
                model_path = Some(args.next().map(PathBuf::from).context("--model needs a path")?)
            }
            "--market" => {
                let raw = args.next().context("--market needs decimal odds")?;
                market = Some(raw.parse().context("--market must be a number")?);
            }
            "--example" => print_example = true,
            other => {
                let (key, value) = parse_feature(other, &kinds)?;
                inputs.insert(key, value);
            }
        }
    }

    if print_example {
        let json = serde_json::to_string_pretty(&logistic::example_model())
            .context("serialize example model")?;
        println!("{json}");
        return Ok(());
    }

    let custom;
    let model = match &model_path {
        Some(path) => {
            custom = load_model(path)?;
            &custom
        }
        None => demo_model(),
    };
    debug!("model {} with {} weights", model.display_name(), model.weights.len());

    let p_home = predict_probability(model, &inputs);
    let p_away = 1.0 - p_home;

    println!("Model: {}", model.display_name());
    println!("Home: {:.1}%  fair odds {:.2}", p_home * 100.0, logistic::to_decimal_odds(p_home));
    println!("Away: {:.1}%  fair odds {:.2}", p_away * 100.0, logistic::to_decimal_odds(p_away));
    if let Some(odds) = market {
        match logistic::edge(p_home, odds) {
            Some(edge) => println!("Edge vs market {odds:.2}: {:+.1} pp", edge * 100.0),
            None => println!("Market odds {odds} ignored (must be > 1)"),
        }
    }
    Ok(())
}
