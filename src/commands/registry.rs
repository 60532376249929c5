use log::{info, warn};
use serenity::builder::CreateApplicationCommand;
use std::collections::HashMap;
use std::sync::Arc;

use super::{declared_name, CommandModule, SlashCommand};

/// A validated command: its declaration plus the handler that runs it.
#[derive(Clone)]
pub struct RegisteredCommand {
    pub source: String,
    pub data: CreateApplicationCommand,
    pub handler: Arc<dyn SlashCommand>,
}

/// Name-keyed command table. Built once at startup and read-only afterwards.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, RegisteredCommand>,
    skipped: Vec<String>,
}

impl CommandRegistry {
    /// Validates and indexes `modules`.
    ///
    /// Modules without a named declaration or without a handler are skipped
    /// with a warning. A later module with the same name replaces an earlier
    /// one.
    pub fn load(modules: impl IntoIterator<Item = CommandModule>) -> Self {
        let mut registry = CommandRegistry::default();

        for module in modules {
            let CommandModule { source, data, execute } = module;

            let (data, handler) = match (data, execute) {
                (Some(data), Some(handler)) if declared_name(&data).is_some() => (data, handler),
                _ => {
                    warn!(
                        "⚠️ The command at {} is missing a required \"data\" or \"execute\" property.",
                        source
                    );
                    registry.skipped.push(source);
                    continue;
                }
            };

            let name = declared_name(&data).unwrap_or_default().to_string();
            let command = RegisteredCommand {
                source: source.clone(),
                data,
                handler,
            };

            if let Some(previous) = registry.commands.insert(name.clone(), command) {
                warn!(
                    "⚠️ Command '{}' from {} replaces the one loaded from {}",
                    name, source, previous.source
                );
            }
        }

        info!(
            "📦 Loaded {} command(s): {}",
            registry.commands.len(),
            registry.names().join(", ")
        );

        registry
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    /// Declarations of every registered command, sorted by name.
    pub fn declarations(&self) -> Vec<CreateApplicationCommand> {
        self.names()
            .iter()
            .filter_map(|name| self.commands.get(name))
            .map(|command| command.data.clone())
            .collect()
    }

    /// Sources of the modules rejected during `load`.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}
