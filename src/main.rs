use clap::Parser;
use serde_json::{json, Map, Value};
use std::error::Error;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trader_town::agents::analyze_all;
use trader_town::{AppConfig, MarketSnapshot, Persona, PersonaAnalyzer, PersonaKind};

/// Ask the trading personas for a decision on a market snapshot.
#[derive(Debug, Parser)]
#[command(name = "trader_town", version)]
struct Cli {
    /// JSON file holding the market snapshot
    #[arg(long)]
    snapshot: String,

    /// Persona to consult (fundamentals or technical); repeat for several, omit for both
    #[arg(long = "persona")]
    personas: Vec<PersonaKind>,

    /// Optional YAML config file
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // .env is optional
    dotenvy::dotenv().ok();

    // Setup Logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting Trader Town...");

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    info!("Loaded Configuration: {:?}", config);

    let snapshot: MarketSnapshot = serde_json::from_str(&fs::read_to_string(&cli.snapshot)?)?;

    let kinds = if cli.personas.is_empty() {
        PersonaKind::all().to_vec()
    } else {
        cli.personas.clone()
    };

    let analyzers = kinds
        .into_iter()
        .map(|kind| PersonaAnalyzer::from_config(Persona::of(kind), &config.llm))
        .collect::<Result<Vec<_>, _>>()?;

    let mut output = Map::new();
    for (kind, result) in analyze_all(&snapshot, &analyzers).await {
        let value = match result {
            Ok(decision) => serde_json::to_value(decision)?,
            Err(e) => json!({ "error": e.to_string() }),
        };
        output.insert(kind.to_string(), value);
    }

    println!("{}", serde_json::to_string_pretty(&Value::Object(output))?);
    Ok(())
}
