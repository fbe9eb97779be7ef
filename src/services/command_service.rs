//! Dispatches `/tally` subcommands to the tally store and formats the replies.

use std::{future::Future, panic::AssertUnwindSafe};

use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::{
    dto::{command::TallyCommand, reply::Reply},
    error::TallyError,
    services::replies,
    state::{
        SharedState,
        stats::LEADERBOARD_SIZE,
        tally_store::{Outcome, Resolution, TallyRef},
    },
};

/// Parse and run a subcommand.
///
/// Malformed input, and any panic raised while handling it, get the generic failure reply.
pub async fn handle<'a, I>(state: &SharedState, subcommand: &str, options: I) -> Reply
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    guarded(subcommand, parse_and_dispatch(state, subcommand, options)).await
}

async fn guarded<F>(subcommand: &str, handling: F) -> Reply
where
    F: Future<Output = Reply>,
{
    match AssertUnwindSafe(handling).catch_unwind().await {
        Ok(reply) => reply,
        Err(panic) => {
            let cause = panic
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("unknown panic");
            error!(subcommand, cause, "tally command panicked");
            Reply::private_text(replies::GENERIC_FAILURE)
        }
    }
}

async fn parse_and_dispatch<'a, I>(state: &SharedState, subcommand: &str, options: I) -> Reply
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    match TallyCommand::parse(subcommand, options) {
        Ok(command) => dispatch(state, command).await,
        Err(err) => {
            warn!(error = %err, "rejected tally command");
            Reply::private_text(replies::GENERIC_FAILURE)
        }
    }
}

/// Run a parsed subcommand. Store failures become a private error reply.
pub async fn dispatch(state: &SharedState, command: TallyCommand) -> Reply {
    match execute(state, &command).await {
        Ok(reply) => reply,
        Err(err) => {
            debug!(subcommand = command.name(), error = %err, "tally command failed");
            replies::failure(err)
        }
    }
}

async fn execute(state: &SharedState, command: &TallyCommand) -> Result<Reply, TallyError> {
    match command {
        TallyCommand::Create {
            game,
            participant1,
            participant2,
        } => {
            let created = state
                .mutate(|tallies| tallies.create_matchup(game, participant1, participant2))
                .await?;
            info!(game = %created.game, matchup = %created.id, "created matchup");
            Ok(replies::created(&created))
        }
        TallyCommand::AddWin { tally, participant } => {
            let outcome = state
                .mutate(|tallies| {
                    tallies.record_outcome(
                        &TallyRef::parse(tally),
                        Resolution::Strict,
                        participant,
                        Outcome::Win,
                    )
                })
                .await?;
            info!(game = %outcome.game, matchup = %outcome.id, winner = %outcome.participant, "recorded win");
            Ok(replies::win_added(&outcome).with_attachment(state.media().pick_random()))
        }
        TallyCommand::AddLoss { tally, participant } => {
            let outcome = state
                .mutate(|tallies| {
                    tallies.record_outcome(
                        &TallyRef::parse(tally),
                        Resolution::Keyed,
                        participant,
                        Outcome::Loss,
                    )
                })
                .await?;
            info!(game = %outcome.game, matchup = %outcome.id, loser = %outcome.participant, "recorded loss");
            Ok(replies::loss_added(&outcome).with_attachment(state.media().pick_random()))
        }
        TallyCommand::Record { tally } => {
            let reply = {
                let tallies = state.tallies().await;
                let view = tallies.get_record(&TallyRef::parse(tally), Resolution::Keyed)?;
                replies::record(&view)
            };
            Ok(reply.with_attachment(state.media().pick_random()))
        }
        TallyCommand::List => {
            let reply = {
                let tallies = state.tallies().await;
                if tallies.is_empty() {
                    return Ok(Reply::private_text(replies::EMPTY_LIST));
                }
                replies::list(&tallies.list_all(), &tallies.leaderboard(LEADERBOARD_SIZE))
            };
            Ok(reply.with_attachment(state.media().pick_random()))
        }
        TallyCommand::Delete { tally } => {
            let deleted = state
                .mutate(|tallies| tallies.delete_matchup(&TallyRef::parse(tally), Resolution::Keyed))
                .await?;
            info!(game = %deleted.game, matchup = %deleted.id, game_removed = deleted.game_removed, "deleted matchup");
            Ok(replies::deleted(&deleted))
        }
        TallyCommand::Stats { participant } => {
            let reply = {
                let tallies = state.tallies().await;
                let stats = tallies.aggregate_participant(participant)?;
                replies::stats(participant, &stats, &tallies.leaderboard(LEADERBOARD_SIZE))
            };
            Ok(reply.with_attachment(state.media().pick_random()))
        }
    }
}
