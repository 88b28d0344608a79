//! Hanging Pieces Trainer
//!
//! Terminal front-end: pick a mode, then find every hanging piece of the
//! target color in randomly generated positions.

mod app;
mod config;
mod error;
mod render;
mod ticker;

use tracing::info;

use crate::app::App;
use crate::config::TrainerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays a clean board/JSON stream
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = TrainerConfig::from_env()?;
    info!(
        start_mode = ?config.start_mode,
        tick_ms = config.tick_interval.as_millis() as u64,
        seeded = config.seed.is_some(),
        output = ?config.output,
        "Trainer starting"
    );

    App::new(config).run().await?;
    Ok(())
}
