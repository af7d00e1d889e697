mod config;
mod console;
mod render;

use tokio::io::BufReader;
use tracing::info;

use fundlink_catalog::Catalog;
use fundlink_hub::Hub;
use fundlink_types::api::Command;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the JSON replies
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fundlink=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let hub = Hub::spawn(Catalog::seeded(), config.event_buffer);
    tokio::spawn(console::log_events(hub.subscribe()));

    if let Some(login) = config.auto_login() {
        hub.execute(Command::Login(login)).await?;
    }

    info!("FundLink console ready, reading commands from stdin");
    console::run(&hub, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
