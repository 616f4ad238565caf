mod params;

use anyhow::Context as _;
use reactkit::adapters::{self, ReactionHub, ReactionSource};
use reactkit::collector::{CollectorOptions, EndReason, MessageTarget, ReactionCollector};
use reactkit::embed::{ColorInput, EmbedBuilder, EmbedPayload, FIELDS_MAX, TITLE_MAX};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info};

use serenity::async_trait;
use serenity::builder::CreateMessage;
use serenity::model::channel::{Message, Reaction};
use serenity::model::gateway::Ready;
use serenity::prelude::*;

const POLL_OPTIONS: [char; 2] = ['👍', '👎'];

struct Handler {
    params: Arc<params::Params>,
}

impl Handler {
    fn new(params: &params::Params) -> Handler {
        Handler {
            params: Arc::new(params.clone()),
        }
    }

    /// Post a poll embed, collect votes, and reply with the tally
    async fn run_poll(&self, ctx: &Context, message: &Message, question: &str) -> anyhow::Result<()> {
        let hub = adapters::registered_hub(ctx)
            .await
            .context("Reaction hub is not registered")?;

        let mut embed = EmbedBuilder::new();
        embed
            .set_title(question)?
            .set_author(message.author.display_name(), None, None)?
            .set_color(ColorInput::Random)?
            .set_footer("React to vote", None)?
            .set_timestamp_now();

        let poll = message
            .channel_id
            .send_message(&ctx.http, CreateMessage::new().embed(embed.build().into()))
            .await
            .context("Sending poll embed")?;

        // Votes can land while the bot is still adding its own reactions
        let votes = hub.subscribe(MessageTarget::from(&poll));

        for emoji in POLL_OPTIONS {
            poll.react(&ctx.http, emoji)
                .await
                .context("Adding poll reaction")?;
        }

        let bot_id = ctx.cache.current_user().id;
        let options = CollectorOptions::new()
            .with_timeout_ms(self.params.poll_timeout_ms)
            .with_max_count(self.params.poll_max_count)
            .with_filter(move |user_id| user_id != bot_id);

        let collector = ReactionCollector::new(&poll, options)
            .run_with_stream(votes)
            .await;

        let results = tally_embed(question, &collector)?;
        poll.channel_id
            .send_message(
                &ctx.http,
                CreateMessage::new()
                    .embed(results.into())
                    .reference_message(&poll),
            )
            .await
            .context("Sending poll results")?;

        Ok(())
    }
}

/// Summarize a finished poll as an embed with one field per emoji
fn tally_embed(question: &str, collector: &ReactionCollector) -> anyhow::Result<EmbedPayload> {
    let mut votes: BTreeMap<String, usize> = BTreeMap::new();
    for reaction in collector.collected() {
        *votes.entry(reaction.emoji.to_string()).or_default() += 1;
    }

    let ended = match collector.end_reason() {
        Some(EndReason::Limit) => "vote limit reached",
        Some(EndReason::Stopped) => "stopped",
        Some(EndReason::SourceClosed) => "bot shutting down",
        Some(EndReason::Timeout) | None => "time is up",
    };

    let mut embed = EmbedBuilder::new();
    embed
        .set_title(&format!("Results: {question}").chars().take(TITLE_MAX).collect::<String>())?
        .set_description(&format!("Poll closed ({ended})"))?;

    if votes.is_empty() {
        embed.add_field(Some("No votes"), None, false)?;
    }
    for (emoji, count) in votes.into_iter().take(FIELDS_MAX) {
        embed.add_field(Some(&emoji), Some(&count.to_string()), true)?;
    }

    Ok(embed.into_payload())
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _: Context, ready: Ready) {
        info!(
            display_name = %ready.user.display_name(),
            user_id = %ready.user.id,
            "Bot is connected"
        );
    }

    async fn message(&self, ctx: Context, message: Message) {
        if message.author.bot {
            return;
        }

        let Some(question) = self.params.parse_poll_command(&message.content) else {
            return;
        };

        debug!(message_id = %message.id, %question, "Poll requested");
        if let Err(err) = self.run_poll(&ctx, &message, question).await {
            error!(?err, "Failed to run poll");
        }
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        if let Some(hub) = adapters::registered_hub(&ctx).await {
            hub.dispatch(&reaction);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Default: reactkit=info, serenity=warn (suppress serenity's normal operation logs)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reactkit=info,serenity=warn".into()),
        )
        .init();

    info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        description = env!("CARGO_PKG_DESCRIPTION"),
        "Starting application"
    );

    let params = params::Params::new()?;
    info!(?params, "Application parameters loaded");

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::DIRECT_MESSAGE_REACTIONS;

    let mut client = Client::builder(&params.discord_token, intents)
        .event_handler(Handler::new(&params))
        .await
        .context("Creating Discord Client")?;

    // Duplicate registration is reported by install() and is not fatal
    let _ = adapters::install(&mut *client.data.write().await, Arc::new(ReactionHub::new()));

    client
        .start_autosharded()
        .await
        .context("Running Discord Client")
}
