//! `probe` subcommand: one-shot provider reachability check

use anyhow::Context;

use crate::config::AppConfig;
use crate::create_provider;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::HealthProber;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    let provider = create_provider(&config.provider);
    let prober = HealthProber::new(provider, &config.engine);

    let report = prober.probe().await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_healthy() {
        std::process::exit(1);
    }

    Ok(())
}
