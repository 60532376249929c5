//! # Process Supervisor
//!
//! Startup order and process-level failure policy.
//!
//! Panics are always logged through the panic hook. A panic inside a
//! per-event task is contained by the runtime and the bot keeps serving; a
//! failure in the supervisor's own flow ends the process with status 1.

use anyhow::{anyhow, Result};
use log::{error, info};
use serenity::prelude::*;
use std::sync::Arc;

use crate::bot::{intents, Bot};
use crate::buttons::TicketButtons;
use crate::commands::{builtin_modules, CommandRegistry};
use crate::config::Config;
use crate::heartbeat::Heartbeat;
use crate::http_server::start_http_server;
use crate::logging;
use crate::router::InteractionRouter;

/// Routes every panic through the logger before the default handler runs.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        logging::log_panic(info);
        default_hook(info);
    }));
}

/// Builds the router from the shipped command modules.
pub fn build_router() -> InteractionRouter {
    let registry = Arc::new(CommandRegistry::load(builtin_modules()));
    InteractionRouter::new(registry, Arc::new(TicketButtons::new()))
}

/// Runs the bot until the gateway connection ends.
pub async fn run(config: Config) -> Result<()> {
    install_panic_hook();

    let port = config.http_port;
    tokio::spawn(async move {
        if let Err(e) = start_http_server(port).await {
            error!("❌ {}", e);
        }
    });

    Heartbeat::default().spawn();

    let router = build_router();
    let bot = Bot::new(router, config.presence_text.clone());
    let intents = intents();

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(bot)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {}", e);
            anyhow!("Client creation failed: {}", e)
        })?;

    info!("Establishing WebSocket connection to Discord gateway...");
    info!("Gateway intents: {:?}", intents);

    if let Err(why) = client.start().await {
        error!("Failed to login: {:?}", why);
        return Err(anyhow!("Failed to establish gateway connection: {}", why));
    }

    Ok(())
}
