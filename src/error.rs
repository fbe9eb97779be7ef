//! Error types surfaced by the tally store and the command parser.

use thiserror::Error;

/// Failures of the tally store operations.
///
/// The display text is the message shown to the user who issued the command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TallyError {
    /// No game is stored under the exact key.
    #[error("Game \"{game}\" not found!")]
    GameNotFound {
        /// Requested game.
        game: String,
    },
    /// No matchup of the game matches case-insensitively.
    ///
    /// `matchup` is absent when the lookup strategy does not echo the requested id.
    #[error("{}", matchup_not_found(game, matchup.as_deref()))]
    MatchupNotFound {
        /// Resolved game.
        game: String,
        /// Requested matchup id, when echoed.
        matchup: Option<String>,
    },
    /// The participant is not part of the matchup.
    #[error("Participant \"{participant}\" not found in this matchup!")]
    ParticipantNotFound {
        /// Requested participant.
        participant: String,
    },
    /// The matchup, or its reverse (`existing`), is already tracked under the game.
    #[error("{}", duplicate_matchup(game, existing.as_deref()))]
    DuplicateMatchup {
        /// Game holding the matchup.
        game: String,
        /// Stored reversed id, when the reverse order matched.
        existing: Option<String>,
    },
    /// The participant has no recorded win or loss anywhere.
    #[error("No stats found for \"{participant}\".")]
    NoStatsFound {
        /// Requested participant.
        participant: String,
    },
    /// The name collides with the key holding the matchup creation time.
    #[error("\"{participant}\" cannot be used as a participant name!")]
    ReservedParticipant {
        /// Rejected name.
        participant: String,
    },
}

/// Failures while turning an inbound interaction into a [`crate::dto::command::TallyCommand`].
#[derive(Debug, Error)]
pub enum CommandError {
    /// The subcommand is not part of the `tally` command.
    #[error("unknown subcommand `{0}`")]
    UnknownSubcommand(String),
    /// A required option was not supplied.
    #[error("missing required option `{option}` for `{subcommand}`")]
    MissingOption {
        /// Subcommand being parsed.
        subcommand: &'static str,
        /// Missing option name.
        option: &'static str,
    },
}

fn matchup_not_found(game: &str, matchup: Option<&str>) -> String {
    match matchup {
        Some(matchup) => format!("Matchup \"{matchup}\" not found in \"{game}\"!"),
        None => format!("Matchup not found in \"{game}\"!"),
    }
}

fn duplicate_matchup(game: &str, existing: Option<&str>) -> String {
    match existing {
        Some(existing) => {
            format!("This matchup already exists in \"{game}\" (as \"{existing}\")!")
        }
        None => format!("This matchup already exists in \"{game}\"!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_follow_lookup_strategy() {
        let keyed = TallyError::MatchupNotFound {
            game: "Chess".into(),
            matchup: Some("Alice vs Carol".into()),
        };
        assert_eq!(
            keyed.to_string(),
            "Matchup \"Alice vs Carol\" not found in \"Chess\"!"
        );

        let strict = TallyError::MatchupNotFound {
            game: "Chess".into(),
            matchup: None,
        };
        assert_eq!(strict.to_string(), "Matchup not found in \"Chess\"!");
    }

    #[test]
    fn duplicate_message_names_reversed_matchup() {
        let err = TallyError::DuplicateMatchup {
            game: "Chess".into(),
            existing: Some("Bob vs Alice".into()),
        };
        assert_eq!(
            err.to_string(),
            "This matchup already exists in \"Chess\" (as \"Bob vs Alice\")!"
        );
    }
}
