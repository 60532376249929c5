use anyhow::Result;
use log::{info, warn};
use serenity::async_trait;

use crate::commands::CREATE_TICKET_BUTTON;
use crate::interaction::{ButtonPress, Reply, Session};

/// Receives every button press the router sees.
#[async_trait]
pub trait ButtonHandler: Send + Sync {
    async fn handle_button_interaction(&self, interaction: &dyn ButtonPress, session: &Session) -> Result<()>;
}

/// Buttons attached to the ticket panel.
#[derive(Debug, Clone, Default)]
pub struct TicketButtons;

impl TicketButtons {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ButtonHandler for TicketButtons {
    async fn handle_button_interaction(&self, interaction: &dyn ButtonPress, _session: &Session) -> Result<()> {
        let user_id = interaction.user_id();
        info!("Processing button interaction: {} from user: {}", interaction.custom_id(), user_id);

        match interaction.custom_id() {
            CREATE_TICKET_BUTTON => {
                interaction
                    .reply(Reply::ephemeral(format!(
                        "🎫 Thanks <@{}>, your ticket request has been received. Staff will reach out shortly.",
                        user_id
                    )))
                    .await?;
            }
            other => {
                warn!("Unknown button interaction: {}", other);
                interaction.reply(Reply::ephemeral("Unknown button.")).await?;
            }
        }

        Ok(())
    }
}
