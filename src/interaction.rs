//! # Interactions
//!
//! Transport-neutral view of the interactions the router deals with, plus the
//! serenity-backed implementations used at runtime.
//!
//! Discord accepts one initial response per interaction. Every responder
//! tracks whether it has replied or deferred; after that, further messages go
//! out as follow-ups.

use anyhow::Result;
use serenity::async_trait;
use serenity::builder::{CreateComponents, CreateInteractionResponseData, CreateInteractionResponseFollowup};
use serenity::http::Http;
use serenity::model::application::command::CommandType;
use serenity::model::application::component::{ButtonStyle, ComponentType};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::prelude::Context;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::commands::get_string_option;

/// Shared handle to the gateway session, passed to collaborators that need to
/// make their own REST calls.
#[derive(Clone)]
pub struct Session {
    pub http: Arc<Http>,
}

impl Session {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

impl From<&Context> for Session {
    fn from(ctx: &Context) -> Self {
        Self::new(ctx.http.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

impl From<ReplyButtonStyle> for ButtonStyle {
    fn from(style: ReplyButtonStyle) -> Self {
        match style {
            ReplyButtonStyle::Primary => ButtonStyle::Primary,
            ReplyButtonStyle::Secondary => ButtonStyle::Secondary,
            ReplyButtonStyle::Success => ButtonStyle::Success,
            ReplyButtonStyle::Danger => ButtonStyle::Danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyButton {
    pub custom_id: String,
    pub label: String,
    pub style: ReplyButtonStyle,
}

/// A message sent in response to an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub content: String,
    pub ephemeral: bool,
    pub buttons: Vec<ReplyButton>,
}

impl Reply {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
            ..Default::default()
        }
    }

    pub fn with_button(mut self, custom_id: &str, label: &str, style: ReplyButtonStyle) -> Self {
        self.buttons.push(ReplyButton {
            custom_id: custom_id.to_string(),
            label: label.to_string(),
            style,
        });
        self
    }
}

/// Anything that can answer an interaction.
#[async_trait]
pub trait Responder: Send + Sync {
    /// True once an initial reply or a deferral has been sent.
    fn is_acknowledged(&self) -> bool;

    async fn reply(&self, reply: Reply) -> Result<()>;

    async fn defer(&self, ephemeral: bool) -> Result<()>;

    async fn follow_up(&self, reply: Reply) -> Result<()>;
}

/// A chat-input slash command invocation.
pub trait CommandInvocation: Responder {
    fn command_name(&self) -> &str;
    fn user_id(&self) -> u64;
    fn string_option(&self, name: &str) -> Option<String>;
}

/// A button press on a message component.
pub trait ButtonPress: Responder {
    fn custom_id(&self) -> &str;
    fn user_id(&self) -> u64;
}

/// An inbound interaction, classified for routing.
pub enum Incoming {
    Command(Box<dyn CommandInvocation>),
    Button(Box<dyn ButtonPress>),
    Other(&'static str),
}

impl Incoming {
    /// Classifies a serenity interaction. Only chat-input commands and button
    /// components are routable; everything else is `Other`.
    pub fn from_serenity(http: Arc<Http>, interaction: Interaction) -> Self {
        match interaction {
            Interaction::ApplicationCommand(command) if command.data.kind == CommandType::ChatInput => {
                Incoming::Command(Box::new(SerenityCommand::new(http, command)))
            }
            Interaction::ApplicationCommand(_) => Incoming::Other("context_menu"),
            Interaction::MessageComponent(component) if component.data.component_type == ComponentType::Button => {
                Incoming::Button(Box::new(SerenityButton::new(http, component)))
            }
            Interaction::MessageComponent(_) => Incoming::Other("select_menu"),
            Interaction::Autocomplete(_) => Incoming::Other("autocomplete"),
            Interaction::ModalSubmit(_) => Incoming::Other("modal_submit"),
            Interaction::Ping(_) => Incoming::Other("ping"),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Incoming::Command(_) => "command",
            Incoming::Button(_) => "button",
            Incoming::Other(kind) => *kind,
        }
    }
}

fn apply_buttons<'b>(components: &'b mut CreateComponents, buttons: &[ReplyButton]) -> &'b mut CreateComponents {
    components.create_action_row(|row| {
        for button in buttons {
            row.create_button(|b| {
                b.custom_id(&button.custom_id)
                    .label(&button.label)
                    .style(button.style.into())
            });
        }
        row
    })
}

fn response_data<'a, 'b>(
    message: &'b mut CreateInteractionResponseData<'a>,
    reply: &Reply,
) -> &'b mut CreateInteractionResponseData<'a> {
    message.content(&reply.content).ephemeral(reply.ephemeral);
    if !reply.buttons.is_empty() {
        message.components(|c| apply_buttons(c, &reply.buttons));
    }
    message
}

fn followup_data<'a, 'b>(
    message: &'b mut CreateInteractionResponseFollowup<'a>,
    reply: &Reply,
) -> &'b mut CreateInteractionResponseFollowup<'a> {
    message.content(&reply.content).ephemeral(reply.ephemeral);
    if !reply.buttons.is_empty() {
        message.components(|c| apply_buttons(c, &reply.buttons));
    }
    message
}

/// Slash command backed by a live gateway interaction.
pub struct SerenityCommand {
    http: Arc<Http>,
    inner: ApplicationCommandInteraction,
    acknowledged: AtomicBool,
}

impl SerenityCommand {
    pub fn new(http: Arc<Http>, inner: ApplicationCommandInteraction) -> Self {
        Self {
            http,
            inner,
            acknowledged: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Responder for SerenityCommand {
    fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }

    async fn reply(&self, reply: Reply) -> Result<()> {
        self.inner
            .create_interaction_response(&self.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| response_data(message, &reply))
            })
            .await?;
        self.acknowledged.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.inner
            .create_interaction_response(&self.http, |response| {
                response
                    .kind(InteractionResponseType::DeferredChannelMessageWithSource)
                    .interaction_response_data(|message| message.ephemeral(ephemeral))
            })
            .await?;
        self.acknowledged.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn follow_up(&self, reply: Reply) -> Result<()> {
        self.inner
            .create_followup_message(&self.http, |message| followup_data(message, &reply))
            .await?;
        Ok(())
    }
}

impl CommandInvocation for SerenityCommand {
    fn command_name(&self) -> &str {
        &self.inner.data.name
    }

    fn user_id(&self) -> u64 {
        self.inner.user.id.0
    }

    fn string_option(&self, name: &str) -> Option<String> {
        get_string_option(&self.inner.data.options, name)
    }
}

/// Button press backed by a live gateway interaction.
pub struct SerenityButton {
    http: Arc<Http>,
    inner: MessageComponentInteraction,
    acknowledged: AtomicBool,
}

impl SerenityButton {
    pub fn new(http: Arc<Http>, inner: MessageComponentInteraction) -> Self {
        Self {
            http,
            inner,
            acknowledged: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Responder for SerenityButton {
    fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }

    async fn reply(&self, reply: Reply) -> Result<()> {
        self.inner
            .create_interaction_response(&self.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| response_data(message, &reply))
            })
            .await?;
        self.acknowledged.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn defer(&self, _ephemeral: bool) -> Result<()> {
        self.inner
            .create_interaction_response(&self.http, |response| {
                response.kind(InteractionResponseType::DeferredUpdateMessage)
            })
            .await?;
        self.acknowledged.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn follow_up(&self, reply: Reply) -> Result<()> {
        self.inner
            .create_followup_message(&self.http, |message| followup_data(message, &reply))
            .await?;
        Ok(())
    }
}

impl ButtonPress for SerenityButton {
    fn custom_id(&self) -> &str {
        &self.inner.data.custom_id
    }

    fn user_id(&self) -> u64 {
        self.inner.user.id.0
    }
}
