//! Glyph Replay
//!
//! Replays a recorded touch input script through the gesture engine and
//! prints the resulting glyphs as JSON.
//!
//! Usage: `glyph-replay <script.json> [config.json]`

use std::{env, fs};

use anyhow::{Context, bail};
use glyph_core::EngineConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod script;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let Some(script_path) = args.next() else {
        bail!("usage: glyph-replay <script.json> [config.json]");
    };

    let config = match args.next() {
        Some(config_path) => {
            let json = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config {config_path}"))?;
            EngineConfig::from_json(&json)
                .with_context(|| format!("invalid config {config_path}"))?
        }
        None => EngineConfig::default(),
    };

    let json = fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read script {script_path}"))?;
    let events = script::parse_script(&json)?;
    tracing::info!("[replay] Loaded {} events from {}", events.len(), script_path);

    let report = script::replay(&events, config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
