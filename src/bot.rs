//! Serenity event handler: the glue between the gateway and the router/publisher.

use log::{error, info, warn};
use serenity::async_trait;
use serenity::client::bridge::gateway::event::ShardStageUpdateEvent;
use serenity::gateway::ConnectionStage;
use serenity::model::application::interaction::Interaction;
use serenity::model::event::ResumedEvent;
use serenity::model::gateway::{Activity, Ready};
use serenity::model::user::OnlineStatus;
use serenity::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::interaction::{Incoming, Session};
use crate::publisher::{publish, CommandsApi};
use crate::router::InteractionRouter;

pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS
}

pub struct Bot {
    router: InteractionRouter,
    presence_text: String,
    published: AtomicBool,
}

impl Bot {
    pub fn new(router: InteractionRouter, presence_text: String) -> Self {
        Self {
            router,
            presence_text,
            published: AtomicBool::new(false),
        }
    }

    /// Publishes the registry the first time it is called; later calls are no-ops.
    /// Returns whether a publish was attempted.
    pub async fn publish_once(&self, api: &dyn CommandsApi, application_id: u64) -> bool {
        if self.published.swap(true, Ordering::SeqCst) {
            info!("Commands already published this session, skipping");
            return false;
        }

        if let Err(e) = publish(api, self.router.registry(), application_id).await {
            error!("❌ {}", e);
        }
        true
    }
}

#[async_trait]
impl EventHandler for Bot {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("✅ {} is online and ready!", ready.user.tag());
        info!("📡 Connected to {} guilds", ready.guilds.len());

        ctx.set_presence(Some(Activity::watching(&self.presence_text)), OnlineStatus::Online)
            .await;

        self.publish_once(&*ctx.http, ready.application.id.0).await;
    }

    async fn resume(&self, _ctx: Context, _: ResumedEvent) {
        info!("🔁 Gateway session resumed");
    }

    async fn shard_stage_update(&self, _ctx: Context, event: ShardStageUpdateEvent) {
        if event.new == ConnectionStage::Disconnected {
            warn!(
                "Discord client error: shard {} disconnected (was {:?}), waiting for reconnect",
                event.shard_id.0, event.old
            );
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let session = Session::from(&ctx);
        let incoming = Incoming::from_serenity(ctx.http.clone(), interaction);
        self.router.route(incoming, &session).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::TicketButtons;
    use crate::commands::{builtin_modules, declared_name, CommandRegistry};
    use anyhow::Result;
    use serenity::builder::CreateApplicationCommand;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingApi {
        calls: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl CommandsApi for RecordingApi {
        async fn set_global_commands(&self, _application_id: u64, commands: Vec<CreateApplicationCommand>) -> Result<usize> {
            let names: Vec<String> = commands
                .iter()
                .filter_map(|c| declared_name(c).map(str::to_string))
                .collect();
            let count = names.len();
            self.calls.lock().unwrap().push(names);
            Ok(count)
        }
    }

    fn bot() -> Bot {
        let registry = Arc::new(CommandRegistry::load(builtin_modules()));
        let router = InteractionRouter::new(registry, Arc::new(TicketButtons::new()));
        Bot::new(router, "Ticket Support | /panel".to_string())
    }

    #[tokio::test]
    async fn test_ready_publishes_once() {
        let bot = bot();
        let api = RecordingApi::default();

        assert!(bot.publish_once(&api, 1).await);
        assert!(!bot.publish_once(&api, 1).await);

        let calls = api.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], vec!["panel", "ping"]);
    }

    #[test]
    fn test_intents() {
        let intents = intents();
        assert!(intents.contains(GatewayIntents::GUILDS));
        assert!(intents.contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(intents.contains(GatewayIntents::GUILD_MEMBERS));
        assert!(!intents.contains(GatewayIntents::DIRECT_MESSAGES));
    }
}
