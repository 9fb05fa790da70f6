// src/main.rs
use anyhow::Context;
use club_dashboard::{
    config::load_config,
    server::{AppState, DashboardServer},
    utils::setup_logging,
};
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    setup_logging(&config.log_level).context("Failed to initialize logging")?;

    info!("⚽ Starting club dashboard backend");
    config.validate_and_log();

    let state = Arc::new(AppState::new(config.clone())?);
    DashboardServer::new(config.port, state)
        .start()
        .await
        .context("Dashboard server failed")?;

    Ok(())
}
