//! meteo-panel: periodic weather panel for one French municipality.
//!
//! Single-binary Tokio application that:
//! 1. Loads panel configuration (config.toml, .env, environment)
//! 2. Resolves the municipality to an INSEE code, searching by name
//!    when the code is missing or unusable
//! 3. Fetches the Météo-Concept daily forecast, or serves the session
//!    cache / bundled fixtures
//! 4. Renders the result to the terminal on a fixed interval

mod config;
mod render;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use forecast_core::{ForecastOrchestrator, WeatherCache};
use meteo_client::{MeteoClient, MockSource};

use crate::config::FileConfigProvider;

/// Météo-Concept terminal weather panel.
#[derive(Parser)]
#[command(name = "meteo-panel", about = "Météo-Concept terminal weather panel")]
struct Cli {
    /// Run a single fetch/render cycle and exit.
    #[arg(long)]
    once: bool,

    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meteo_panel=info,meteo_client=info,forecast_core=info".into()),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    info!("🌤️  meteo-panel starting up...");

    let provider = FileConfigProvider::new(&cli.config);

    // Initial load catches broken configuration before the loop starts
    // and fixes the refresh interval for the session. Every cycle still
    // reloads on its own.
    let initial = match provider.load_from_disk() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    info!("Mode: {}", if initial.use_mock { "MOCK" } else { "LIVE" });
    info!(
        "Location: city={:?}, insee_code={:?}",
        initial.city,
        initial.insee_code.as_ref().map(|c| c.to_string())
    );
    info!(
        "Cache {}, refresh every {}s",
        if initial.use_cache { "enabled" } else { "disabled" },
        initial.refresh_interval_secs
    );

    let live = match MeteoClient::new() {
        Ok(c) => c,
        Err(e) => {
            error!("HTTP client init failed: {}", e);
            std::process::exit(1);
        }
    };

    let orchestrator = ForecastOrchestrator::new(
        Arc::new(provider),
        Arc::new(live),
        Arc::new(MockSource::new()),
        WeatherCache::in_memory(),
    );

    if cli.once {
        if !run_cycle(&orchestrator).await {
            std::process::exit(1);
        }
        return;
    }

    let mut interval = tokio::time::interval(Duration::from_secs(initial.refresh_interval_secs));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    info!("🚀 meteo-panel is running. Press Ctrl+C to stop.");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // A failed cycle is logged and retried on the next tick.
                run_cycle(&orchestrator).await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("meteo-panel shut down.");
}

// ── Cycle ───────────────────────────────────────────────────────────

async fn run_cycle(orchestrator: &ForecastOrchestrator) -> bool {
    match orchestrator.run().await {
        Ok(report) => {
            info!(
                source = report.source.as_str(),
                insee = %report.insee,
                code = report.weather_code,
                "cycle complete"
            );
            println!("{}", render::panel(&report));
            true
        }
        Err(e) => {
            error!("Fetch cycle failed: {}", e);
            false
        }
    }
}
