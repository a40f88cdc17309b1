use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use trickster_bot::{PlayingStrategy, StrategyKind};
use trickster_cli::config::CliConfig;
use trickster_cli::logging::init_logging;
use trickster_cli::request::DecisionRequest;

/// One-shot guess and play decisions for a single seat.
#[derive(Debug, Parser)]
#[command(
    name = "trickster",
    author,
    version,
    about = "Pick a card to play and a guess for the next round"
)]
struct Cli {
    /// Path to the JSON decision request.
    #[arg(short, long, value_name = "FILE")]
    request: PathBuf,

    /// Optional YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the strategy kind (baseline or tracking).
    #[arg(long, value_name = "KIND", value_parser = parse_kind)]
    strategy: Option<StrategyKind>,

    /// Override the RNG seed used by sampled guesses.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Exit after validating the configuration and request.
    #[arg(long)]
    validate_only: bool,
}

fn parse_kind(raw: &str) -> Result<StrategyKind, String> {
    StrategyKind::from_label(raw).ok_or_else(|| format!("unknown strategy kind '{raw}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => CliConfig::from_path(path)?,
        None => CliConfig::default(),
    };

    if let Some(kind) = cli.strategy {
        config.strategy.kind = kind;
    }

    if let Some(seed) = cli.seed {
        config.strategy.seed = Some(seed);
    }

    if let Some(level) = cli.log_level {
        config.logging.tracing_level = level;
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;

    let request = DecisionRequest::from_path(&cli.request)?;
    request
        .validate()
        .with_context(|| format!("checking request {}", cli.request.display()))?;

    if cli.validate_only {
        eprintln!("Validation-only mode: no decision made.");
        return Ok(());
    }

    let mut strategy = PlayingStrategy::from_features(config.strategy.features());
    let response = request
        .decide(&mut strategy)
        .with_context(|| format!("deciding for {}", cli.request.display()))?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
