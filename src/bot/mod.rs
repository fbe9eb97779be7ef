//! Discord gateway adapter: turns slash-command interactions into dispatcher calls.

mod commands;
mod interaction;

use serenity::{
    all::{ActivityData, Client, Context, EventHandler, GatewayIntents, GuildId, Interaction, Ready},
    async_trait,
};
use tracing::info;

use crate::{config::DiscordConfig, dto::command::COMMAND_NAME, state::SharedState};

pub use self::commands::tally_command;
pub use self::interaction::{render_embed, render_message};

/// Event handler owning a handle to the shared tally state.
pub struct Handler {
    state: SharedState,
    guild_id: Option<GuildId>,
}

impl Handler {
    /// Handler registering its command in `guild_id`, or globally when absent.
    pub fn new(state: SharedState, guild_id: Option<GuildId>) -> Self {
        Self { state, guild_id }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "bot logged in");
        ctx.set_activity(Some(ActivityData::watching("tallies")));
        commands::register(&ctx, self.guild_id).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) if command.data.name == COMMAND_NAME => {
                interaction::respond_to_command(&ctx, &self.state, &command).await;
            }
            Interaction::Autocomplete(command) if command.data.name == COMMAND_NAME => {
                interaction::respond_to_autocomplete(&ctx, &self.state, &command).await;
            }
            _ => {}
        }
    }
}

/// Log in and process gateway events until the connection ends.
pub async fn run(state: SharedState, config: DiscordConfig) -> Result<(), serenity::Error> {
    let intents = GatewayIntents::GUILDS | GatewayIntents::DIRECT_MESSAGES;
    let guild_id = config.guild_id.map(|id| GuildId::new(id.get()));

    let mut client = Client::builder(&config.token, intents)
        .event_handler(Handler::new(state, guild_id))
        .await?;
    client.start().await
}
