use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use matchday_forecaster::fake_round::random_round;
use matchday_forecaster::render::{DEFAULT_BAR_WIDTH, render_round};
use matchday_forecaster::{MatchInput, predict_round};

const USAGE: &str = "usage: matchday_forecaster [PATH|-] [--json] [--demo] [--verbose]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug)]
struct RunConfig {
    input: Option<PathBuf>,
    format: OutputFormat,
    demo: bool,
    verbose: bool,
    help: bool,
    bar_width: usize,
    demo_size: usize,
    seed: Option<u64>,
}

impl RunConfig {
    fn from_env_and_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let format = match env::var("FORECAST_FORMAT")
            .unwrap_or_else(|_| "text".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
        let bar_width = env::var("FORECAST_BAR_WIDTH")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(DEFAULT_BAR_WIDTH)
            .clamp(10, 120);
        let demo_size = env::var("FORECAST_DEMO_SIZE")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(8)
            .clamp(1, 64);
        let seed = env::var("FORECAST_SEED")
            .ok()
            .and_then(|val| val.parse::<u64>().ok());

        let mut cfg = Self {
            input: None,
            format,
            demo: false,
            verbose: false,
            help: false,
            bar_width,
            demo_size,
            seed,
        };

        for arg in args {
            match arg.as_str() {
                "--json" => cfg.format = OutputFormat::Json,
                "--demo" => cfg.demo = true,
                "-v" | "--verbose" => cfg.verbose = true,
                "-h" | "--help" => cfg.help = true,
                "-" => cfg.input = None,
                other if other.starts_with("--") => bail!("unknown flag {other}\n{USAGE}"),
                other => cfg.input = Some(PathBuf::from(other)),
            }
        }
        Ok(cfg)
    }
}

/// Input is either a round (array) or a single match object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RoundFile {
    Round(Vec<MatchInput>),
    Single(Box<MatchInput>),
}

fn parse_round(raw: &str) -> Result<Vec<MatchInput>> {
    let parsed: RoundFile = serde_json::from_str(raw).context("parse round JSON")?;
    Ok(match parsed {
        RoundFile::Round(matches) => matches,
        RoundFile::Single(m) => vec![*m],
    })
}

fn read_round(cfg: &RunConfig) -> Result<Vec<MatchInput>> {
    if cfg.demo {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        return Ok(random_round(&mut rng, cfg.demo_size));
    }
    let raw = match &cfg.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read round file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("read round from stdin")?;
            buf
        }
    };
    parse_round(&raw)
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cfg = RunConfig::from_env_and_args(env::args().skip(1))?;
    if cfg.help {
        println!("{USAGE}");
        return Ok(());
    }
    init_logging(cfg.verbose);
    debug!("config: {cfg:?}");

    let round = read_round(&cfg)?;
    info!("scoring {} matches", round.len());
    let outputs = predict_round(&round);

    match cfg.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outputs).context("serialize forecasts")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render_round(&outputs, cfg.bar_width)),
    }
    Ok(())
}
