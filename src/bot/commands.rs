use serenity::all::{
    Command, CommandOptionType, Context, CreateCommand, CreateCommandOption, GuildId,
};
use tracing::{error, info};

use crate::dto::command::{COMMAND_NAME, TALLY_OPTION};

/// Schema of the `/tally` command and its seven subcommands.
pub fn tally_command() -> CreateCommand {
    CreateCommand::new(COMMAND_NAME)
        .description("Manage win/loss tallies")
        .add_option(
            subcommand("create", "Create a new tally")
                .add_sub_option(text("name", "Name of the tally (e.g., \"Chess\", \"Valorant\")"))
                .add_sub_option(text(
                    "participant1",
                    "First person/team (comma-separated for teams: Alice,Bob,Charlie)",
                ))
                .add_sub_option(text(
                    "participant2",
                    "Second person/team (can be \"Randoms\" for team type)",
                )),
        )
        .add_option(
            subcommand("add-win", "Add a win to a tally")
                .add_sub_option(tally("Name and type of the tally (autocomplete available)"))
                .add_sub_option(text("participant", "Participant/team that won")),
        )
        .add_option(
            subcommand("add-loss", "Add a loss to a tally")
                .add_sub_option(tally("Name and type of the tally (autocomplete available)"))
                .add_sub_option(text("participant", "Participant/team that lost")),
        )
        .add_option(
            subcommand("record", "View the record for a tally")
                .add_sub_option(tally("Name of the tally")),
        )
        .add_option(subcommand("list", "List all tallies"))
        .add_option(
            subcommand("delete", "Delete a tally")
                .add_sub_option(tally("Name of the tally to delete")),
        )
        .add_option(
            subcommand(
                "stats",
                "View overall stats for a participant across all games",
            )
            .add_sub_option(text("participant", "Name of the participant")),
        )
}

fn subcommand(name: &str, description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, name, description)
}

fn text(name: &str, description: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::String, name, description).required(true)
}

fn tally(description: &str) -> CreateCommandOption {
    text(TALLY_OPTION, description).set_autocomplete(true)
}

/// Register `/tally` in the configured guild, or globally.
pub(super) async fn register(ctx: &Context, guild_id: Option<GuildId>) {
    let commands = vec![tally_command()];
    let result = match guild_id {
        Some(guild_id) => guild_id.set_commands(&ctx.http, commands).await,
        None => Command::set_global_commands(&ctx.http, commands).await,
    };

    match result {
        Ok(registered) => info!(
            count = registered.len(),
            guild = ?guild_id,
            "slash commands registered"
        ),
        Err(err) => error!(error = %err, "failed to register slash commands"),
    }
}
