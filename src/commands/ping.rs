//! /ping

use anyhow::Result;
use serenity::async_trait;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use super::{CommandModule, SlashCommand};
use crate::interaction::{CommandInvocation, Reply};

pub struct PingCommand;

#[async_trait]
impl SlashCommand for PingCommand {
    async fn execute(&self, interaction: &dyn CommandInvocation) -> Result<()> {
        interaction.reply(Reply::new("🏓 Pong!")).await
    }
}

pub fn create_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ping")
        .description("Test bot responsiveness")
        .to_owned()
}

pub(super) fn module() -> CommandModule {
    CommandModule::new("commands/ping")
        .data(create_command())
        .execute(Arc::new(PingCommand))
}
