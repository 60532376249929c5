//! Pushes the registry's command declarations to Discord in one bulk call.

use anyhow::{anyhow, Result};
use log::info;
use serenity::async_trait;
use serenity::builder::CreateApplicationCommand;
use serenity::http::Http;
use serenity::model::application::command::Command;

use crate::commands::CommandRegistry;

/// The REST surface used to declare global application commands.
#[async_trait]
pub trait CommandsApi: Send + Sync {
    /// Replaces every global command of `application_id` with `commands`.
    /// Returns how many commands Discord now has registered.
    async fn set_global_commands(&self, application_id: u64, commands: Vec<CreateApplicationCommand>) -> Result<usize>;
}

#[async_trait]
impl CommandsApi for Http {
    async fn set_global_commands(&self, application_id: u64, commands: Vec<CreateApplicationCommand>) -> Result<usize> {
        self.set_application_id(application_id);

        let registered = Command::set_global_application_commands(self, |builder| {
            for command in commands {
                builder.add_application_command(command);
            }
            builder
        })
        .await?;

        Ok(registered.len())
    }
}

/// Publishes every command in `registry` for `application_id`.
pub async fn publish(api: &dyn CommandsApi, registry: &CommandRegistry, application_id: u64) -> Result<usize> {
    let declarations = registry.declarations();

    info!("🔄 Started refreshing {} application (/) commands.", declarations.len());

    let count = api
        .set_global_commands(application_id, declarations)
        .await
        .map_err(|e| anyhow!("Error refreshing commands: {}", e))?;

    info!("✅ Successfully reloaded {} application (/) commands.", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{builtin_modules, declared_name};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingApi {
        calls: Mutex<Vec<(u64, Vec<String>)>>,
        fail: bool,
    }

    #[async_trait]
    impl CommandsApi for RecordingApi {
        async fn set_global_commands(
            &self,
            application_id: u64,
            commands: Vec<CreateApplicationCommand>,
        ) -> Result<usize> {
            let names = commands
                .iter()
                .map(|c| declared_name(c).unwrap_or("<unnamed>").to_string())
                .collect::<Vec<_>>();
            let count = names.len();
            self.calls.lock().unwrap().push((application_id, names));
            if self.fail {
                return Err(anyhow!("401: Unauthorized"));
            }
            Ok(count)
        }
    }

    #[tokio::test]
    async fn test_publish_makes_single_bulk_call() {
        let api = RecordingApi::default();
        let registry = CommandRegistry::load(builtin_modules());

        let count = publish(&api, &registry, 42).await.unwrap();

        assert_eq!(count, 2);
        let calls = api.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 42);
        assert_eq!(calls[0].1, vec!["panel", "ping"]);
    }

    #[tokio::test]
    async fn test_publish_failure_is_reported() {
        let api = RecordingApi {
            fail: true,
            ..Default::default()
        };
        let registry = CommandRegistry::load(builtin_modules());

        let err = publish(&api, &registry, 42).await.unwrap_err();

        assert!(err.to_string().contains("Unauthorized"));
        assert_eq!(api.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_empty_registry_still_clears() {
        let api = RecordingApi::default();
        let registry = CommandRegistry::default();

        assert_eq!(publish(&api, &registry, 7).await.unwrap(), 0);
        assert_eq!(api.calls.lock().unwrap()[0].1.len(), 0);
    }
}
