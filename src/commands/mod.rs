//! # Command System
//!
//! Slash command modules and the registry that holds them.
//!
//! Each command module pairs a declaration (the `CreateApplicationCommand`
//! pushed to Discord) with a handler implementing [`SlashCommand`]. Modules are
//! listed explicitly in [`builtin_modules`]; the registry validates and indexes
//! them by name at startup.

mod panel;
mod ping;
pub mod registry;

use anyhow::Result;
use serenity::async_trait;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::interaction::application_command::CommandDataOption;
use std::sync::Arc;

use crate::interaction::CommandInvocation;

pub use panel::{PanelCommand, CREATE_TICKET_BUTTON};
pub use ping::PingCommand;
pub use registry::{CommandRegistry, RegisteredCommand};

/// Executable half of a slash command.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    async fn execute(&self, interaction: &dyn CommandInvocation) -> Result<()>;
}

/// A command as discovered at startup, before validation.
///
/// Either half may be missing; the registry skips incomplete modules.
#[derive(Clone)]
pub struct CommandModule {
    pub source: String,
    pub data: Option<CreateApplicationCommand>,
    pub execute: Option<Arc<dyn SlashCommand>>,
}

impl CommandModule {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            data: None,
            execute: None,
        }
    }

    pub fn data(mut self, data: CreateApplicationCommand) -> Self {
        self.data = Some(data);
        self
    }

    pub fn execute(mut self, handler: Arc<dyn SlashCommand>) -> Self {
        self.execute = Some(handler);
        self
    }
}

/// All commands shipped with the bot.
pub fn builtin_modules() -> Vec<CommandModule> {
    vec![ping::module(), panel::module()]
}

/// Utility function to get string option from slash command
pub fn get_string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

/// Reads the `name` field of a declaration, if it has one.
pub fn declared_name(data: &CreateApplicationCommand) -> Option<&str> {
    data.0.get("name").and_then(|name| name.as_str())
}
