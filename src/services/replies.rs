//! Reply templates for each `/tally` subcommand.

use crate::{
    dto::reply::{Embed, Reply},
    state::{
        Record,
        stats::AggregateStats,
        tally_store::{CreatedMatchup, DeletedMatchup, MatchupView, RecordedOutcome},
    },
};

/// Colour of `create` and `add-win` embeds.
pub const COLOUR_SUCCESS: u32 = 0x00FF00;
/// Colour of `add-loss` embeds.
pub const COLOUR_LOSS: u32 = 0xFF6600;
/// Colour of `record` embeds.
pub const COLOUR_RECORD: u32 = 0x0099FF;
/// Colour of `list` embeds.
pub const COLOUR_LIST: u32 = 0x9900FF;
/// Colour of `stats` embeds.
pub const COLOUR_STATS: u32 = 0x9B59B6;

/// Heading of the leaderboard field.
pub const LEADERBOARD_TITLE: &str = "🏆 Top 3 Overall";
/// Reply to malformed or crashed commands.
pub const GENERIC_FAILURE: &str = "❌ An error occurred while processing your command.";
/// Private reply to `list` when nothing is tracked.
pub const EMPTY_LIST: &str = "📊 No tallies created yet! Use `/tally create` to get started.";

/// Private reply for a failed lookup or validation.
pub fn failure(message: impl std::fmt::Display) -> Reply {
    Reply::private_text(format!("❌ {message}"))
}

/// `create` confirmation.
pub fn created(created: &CreatedMatchup) -> Reply {
    Reply::embed(
        Embed::new("✓ Tally Created", COLOUR_SUCCESS)
            .field("Game", &created.game)
            .field("Matchup", &created.id),
    )
}

/// `add-win` confirmation with the winner's updated record.
pub fn win_added(outcome: &RecordedOutcome) -> Reply {
    outcome_embed("✓ Win Added", COLOUR_SUCCESS, "Winner", outcome)
}

/// `add-loss` confirmation with the loser's updated record.
pub fn loss_added(outcome: &RecordedOutcome) -> Reply {
    outcome_embed("✓ Loss Added", COLOUR_LOSS, "Loser", outcome)
}

fn outcome_embed(title: &str, colour: u32, role: &str, outcome: &RecordedOutcome) -> Reply {
    Reply::embed(
        Embed::new(title, colour)
            .field("Game", &outcome.game)
            .field("Matchup", &outcome.id)
            .field(role, &outcome.participant)
            .field(
                format!("{}'s Record", outcome.participant),
                format!("W: {} | L: {}", outcome.record.wins, outcome.record.losses),
            ),
    )
}

/// One field per participant with record and win rate.
pub fn record(view: &MatchupView<'_>) -> Reply {
    let embed = view.matchup.participants.iter().fold(
        Embed::new(format!("📊 {} - {}", view.game, view.id), COLOUR_RECORD).timestamped(),
        |embed, (participant, record)| embed.field(participant, bold_line(record)),
    );
    Reply::embed(embed)
}

/// Every matchup by game, followed by the leaderboard.
pub fn list(matchups: &[MatchupView<'_>], leaderboard: &[AggregateStats]) -> Reply {
    let mut embed = Embed::new("📊 All Tallies by Game", COLOUR_LIST).timestamped();

    for view in matchups {
        if view.matchup.participants.is_empty() {
            continue;
        }
        let records = view
            .matchup
            .participants
            .iter()
            .map(|(participant, record)| {
                format!("{participant} ({}-{})", record.wins, record.losses)
            })
            .collect::<Vec<_>>()
            .join(" vs ");
        embed = embed.field(format!("{} - {}", view.game, view.id), records);
    }

    if !leaderboard.is_empty() {
        embed = embed.field(LEADERBOARD_TITLE, leaderboard_lines(leaderboard));
    }

    Reply::embed(embed)
}

/// Private `delete` confirmation.
pub fn deleted(deleted: &DeletedMatchup) -> Reply {
    Reply::private_text(format!(
        "✓ Matchup \"{}\" in \"{}\" has been deleted.",
        deleted.id, deleted.game
    ))
}

/// Overall and per-game totals of `requested`, followed by the leaderboard.
pub fn stats(requested: &str, stats: &AggregateStats, leaderboard: &[AggregateStats]) -> Reply {
    let mut embed = Embed::new(format!("📈 {requested}'s Overall Stats"), COLOUR_STATS)
        .field("Overall Record", bold_line(&stats.record));

    for (game, per_game) in &stats.games {
        let record = &per_game.record;
        embed = embed.field(
            game,
            format!(
                "W: {} | L: {} | Win Rate: {}%",
                record.wins,
                record.losses,
                record.win_rate()
            ),
        );
    }

    let ranking = if leaderboard.is_empty() {
        "No data".to_string()
    } else {
        leaderboard_lines(leaderboard)
    };
    Reply::embed(embed.field(LEADERBOARD_TITLE, ranking))
}

fn bold_line(record: &Record) -> String {
    format!(
        "W: **{}** | L: **{}** | Win Rate: **{}%**",
        record.wins,
        record.losses,
        record.win_rate()
    )
}

fn leaderboard_lines(leaderboard: &[AggregateStats]) -> String {
    leaderboard
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "{}. {} - {}W {}L ({}%)",
                index + 1,
                entry.display_name,
                entry.record.wins,
                entry.record.losses,
                entry.record.win_rate()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn leaderboard_lines_are_ranked() {
        let entries = vec![
            AggregateStats {
                display_name: "Bob".into(),
                record: Record { wins: 3, losses: 1 },
                games: IndexMap::new(),
            },
            AggregateStats {
                display_name: "Alice".into(),
                record: Record { wins: 0, losses: 0 },
                games: IndexMap::new(),
            },
        ];
        assert_eq!(
            leaderboard_lines(&entries),
            "1. Bob - 3W 1L (75.0%)\n2. Alice - 0W 0L (0.0%)"
        );
    }

    #[test]
    fn failure_is_private() {
        let reply = failure("Game \"Chess\" not found!");
        assert!(reply.ephemeral);
        assert_eq!(reply.as_text(), Some("❌ Game \"Chess\" not found!"));
    }

    #[test]
    fn list_renders_counts_at_the_limit() {
        let store: crate::state::TallyStore = serde_json::from_value(serde_json::json!({
            "Chess": {
                "A vs B": {
                    "A": {"wins": u64::MAX, "losses": 1},
                    "B": {"wins": 1, "losses": u64::MAX},
                    "createdAt": "2024-01-01T00:00:00.000Z"
                }
            }
        }))
        .unwrap();

        let reply = list(&store.list_all(), &store.leaderboard(3));
        let embed = reply.as_embed().unwrap();
        assert_eq!(
            embed.field_value("Chess - A vs B"),
            Some(format!("A ({}-1) vs B (1-{})", u64::MAX, u64::MAX).as_str())
        );
        assert!(
            embed
                .field_value(LEADERBOARD_TITLE)
                .unwrap()
                .starts_with(&format!("1. A - {}W 1L (100.0%)", u64::MAX))
        );
    }
}
