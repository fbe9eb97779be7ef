use std::path::Path;

use serenity::all::{
    CommandInteraction, Context, CreateAttachment, CreateAutocompleteResponse, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, ResolvedOption, ResolvedValue, Timestamp,
};
use tracing::{debug, warn};

use crate::{
    dto::{
        command::TALLY_OPTION,
        reply::{Embed, Reply, ReplyBody},
    },
    services::{autocomplete_service, command_service, replies},
    state::SharedState,
};

/// Run the invoked subcommand and answer the interaction.
pub(super) async fn respond_to_command(
    ctx: &Context,
    state: &SharedState,
    command: &CommandInteraction,
) {
    let options = command.data.options();
    let reply = match options.first() {
        Some(ResolvedOption {
            name,
            value: ResolvedValue::SubCommand(args),
            ..
        }) => {
            let pairs = args.iter().filter_map(|option| match &option.value {
                ResolvedValue::String(value) => Some((option.name, *value)),
                _ => None,
            });
            command_service::handle(state, name, pairs).await
        }
        _ => {
            warn!(user = %command.user.name, "tally command invoked without a subcommand");
            Reply::private_text(replies::GENERIC_FAILURE)
        }
    };

    send_reply(ctx, command, reply).await;
}

/// Answer an autocomplete request for the `tally` option.
pub(super) async fn respond_to_autocomplete(
    ctx: &Context,
    state: &SharedState,
    command: &CommandInteraction,
) {
    let Some(focused) = command.data.autocomplete() else {
        return;
    };
    if focused.name != TALLY_OPTION {
        return;
    }

    let partial = focused.value.to_string();
    let response = autocomplete_service::suggestions(state, &partial)
        .await
        .into_iter()
        .fold(CreateAutocompleteResponse::new(), |response, suggestion| {
            response.add_string_choice(suggestion.name, suggestion.value)
        });

    if let Err(err) = command
        .create_response(&ctx.http, CreateInteractionResponse::Autocomplete(response))
        .await
    {
        warn!(error = %err, "failed to send autocomplete suggestions");
    }
}

async fn send_reply(ctx: &Context, command: &CommandInteraction, reply: Reply) {
    let message = render_message(&reply);
    if let Err(err) = command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
    {
        warn!(error = %err, "failed to send tally reply");
        return;
    }

    if let Some(path) = reply.attachment.as_deref() {
        send_attachment(ctx, command, path).await;
    }
}

async fn send_attachment(ctx: &Context, command: &CommandInteraction, path: &Path) {
    let attachment = match CreateAttachment::path(path).await {
        Ok(attachment) => attachment,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read media file");
            return;
        }
    };

    match command
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new().add_file(attachment),
        )
        .await
    {
        Ok(_) => debug!(path = %path.display(), "sent media follow-up"),
        Err(err) => warn!(path = %path.display(), error = %err, "failed to send media follow-up"),
    }
}

/// Convert a reply into the primary interaction response.
pub fn render_message(reply: &Reply) -> CreateInteractionResponseMessage {
    let message = CreateInteractionResponseMessage::new().ephemeral(reply.ephemeral);
    match &reply.body {
        ReplyBody::Text(text) => message.content(text),
        ReplyBody::Embed(embed) => message.embed(render_embed(embed)),
    }
}

/// Convert an embed into its Discord builder.
pub fn render_embed(embed: &Embed) -> CreateEmbed {
    let builder = embed.fields.iter().fold(
        CreateEmbed::new().title(&embed.title).colour(embed.colour),
        |builder, field| builder.field(&field.name, &field.value, field.inline),
    );

    if embed.timestamp {
        builder.timestamp(Timestamp::now())
    } else {
        builder
    }
}
