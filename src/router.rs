//! # Interaction Router
//!
//! Single entry point for inbound interactions. Slash commands are looked up in
//! the [`CommandRegistry`]; button presses go to the [`ButtonHandler`]; every
//! other kind is dropped.

use log::{debug, error, info};
use std::sync::Arc;

use crate::buttons::ButtonHandler;
use crate::commands::CommandRegistry;
use crate::interaction::{ButtonPress, CommandInvocation, Incoming, Reply, Session};

pub const COMMAND_ERROR_MESSAGE: &str = "There was an error while executing this command!";

#[derive(Clone)]
pub struct InteractionRouter {
    registry: Arc<CommandRegistry>,
    buttons: Arc<dyn ButtonHandler>,
}

impl InteractionRouter {
    pub fn new(registry: Arc<CommandRegistry>, buttons: Arc<dyn ButtonHandler>) -> Self {
        Self { registry, buttons }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub async fn route(&self, incoming: Incoming, session: &Session) {
        match incoming {
            Incoming::Command(command) => self.route_command(command.as_ref()).await,
            Incoming::Button(button) => self.route_button(button.as_ref(), session).await,
            Incoming::Other(kind) => debug!("Ignoring {} interaction", kind),
        }
    }

    async fn route_command(&self, interaction: &dyn CommandInvocation) {
        let name = interaction.command_name();

        let Some(command) = self.registry.get(name) else {
            error!("No command matching {} was found.", name);
            return;
        };

        info!("Processing slash command: {} from user: {}", name, interaction.user_id());

        let Err(e) = command.handler.execute(interaction).await else {
            return;
        };

        error!("Error executing command '{}': {:?}", name, e);

        let reply = Reply::ephemeral(COMMAND_ERROR_MESSAGE);
        let sent = if interaction.is_acknowledged() {
            interaction.follow_up(reply).await
        } else {
            interaction.reply(reply).await
        };

        if let Err(why) = sent {
            error!("Failed to send error message for '{}': {}", name, why);
        }
    }

    async fn route_button(&self, interaction: &dyn ButtonPress, session: &Session) {
        if let Err(e) = self.buttons.handle_button_interaction(interaction, session).await {
            error!("Error handling button interaction '{}': {:?}", interaction.custom_id(), e);
        }
    }
}
