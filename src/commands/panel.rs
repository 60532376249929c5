//! /panel - posts the ticket-support panel

use anyhow::Result;
use serenity::async_trait;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;
use serenity::model::permissions::Permissions;
use std::sync::Arc;

use super::{CommandModule, SlashCommand};
use crate::interaction::{CommandInvocation, Reply, ReplyButtonStyle};

pub const CREATE_TICKET_BUTTON: &str = "create_ticket";

const DEFAULT_PANEL_TEXT: &str =
    "🎫 **Ticket Support**\n\nNeed help? Press the button below and a member of staff will be with you shortly.";

pub struct PanelCommand;

impl PanelCommand {
    pub fn build_panel(message: Option<String>) -> Reply {
        let content = match message {
            Some(text) if !text.trim().is_empty() => format!("🎫 **Ticket Support**\n\n{}", text.trim()),
            _ => DEFAULT_PANEL_TEXT.to_string(),
        };

        Reply::new(content).with_button(CREATE_TICKET_BUTTON, "📩 Create Ticket", ReplyButtonStyle::Primary)
    }
}

#[async_trait]
impl SlashCommand for PanelCommand {
    async fn execute(&self, interaction: &dyn CommandInvocation) -> Result<()> {
        let panel = Self::build_panel(interaction.string_option("message"));
        interaction.reply(panel).await
    }
}

pub fn create_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("panel")
        .description("Post the ticket support panel in this channel")
        .default_member_permissions(Permissions::MANAGE_GUILD)
        .create_option(|option| {
            option
                .name("message")
                .description("Custom text shown above the button")
                .kind(CommandOptionType::String)
                .required(false)
        })
        .to_owned()
}

pub(super) fn module() -> CommandModule {
    CommandModule::new("commands/panel")
        .data(create_command())
        .execute(Arc::new(PanelCommand))
}
