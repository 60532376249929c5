use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};

use ticket_bot::config::Config;
use ticket_bot::logging;
use ticket_bot::supervisor;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    logging::init(&log_level);

    info!("Starting Ticket Support Discord Bot...");

    let config = Config::from_env().map_err(|e| {
        error!("❌ {}", e);
        e
    })?;

    supervisor::run(config).await
}
