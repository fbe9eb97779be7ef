//! Parsed form of the `tally` slash command, independent of the chat platform.

use crate::error::CommandError;

/// Name of the top-level command.
pub const COMMAND_NAME: &str = "tally";
/// Option supporting autocomplete.
pub const TALLY_OPTION: &str = "tally";
/// Maximum number of suggestions returned to the platform.
pub const MAX_SUGGESTIONS: usize = 25;

/// One subcommand of `/tally` with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyCommand {
    /// `create {name, participant1, participant2}`
    Create {
        /// Game the matchup is tracked under.
        game: String,
        /// First person or team.
        participant1: String,
        /// Second person or team.
        participant2: String,
    },
    /// `add-win {tally, participant}`
    AddWin {
        /// `game|matchup` token.
        tally: String,
        /// Winner.
        participant: String,
    },
    /// `add-loss {tally, participant}`
    AddLoss {
        /// `game|matchup` token.
        tally: String,
        /// Loser.
        participant: String,
    },
    /// `record {tally}`
    Record {
        /// `game|matchup` token.
        tally: String,
    },
    /// `list`
    List,
    /// `delete {tally}`
    Delete {
        /// `game|matchup` token.
        tally: String,
    },
    /// `stats {participant}`
    Stats {
        /// Name looked up across every game.
        participant: String,
    },
}

impl TallyCommand {
    /// Build a command from a subcommand name and its `(option, value)` string pairs.
    pub fn parse<'a, I>(subcommand: &str, options: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let options: Vec<(&str, &str)> = options.into_iter().collect();
        let args = |subcommand: &'static str| Args {
            subcommand,
            options: &options,
        };

        let command = match subcommand {
            "create" => {
                let args = args("create");
                TallyCommand::Create {
                    game: args.required("name")?,
                    participant1: args.required("participant1")?,
                    participant2: args.required("participant2")?,
                }
            }
            "add-win" => {
                let args = args("add-win");
                TallyCommand::AddWin {
                    tally: args.required(TALLY_OPTION)?,
                    participant: args.required("participant")?,
                }
            }
            "add-loss" => {
                let args = args("add-loss");
                TallyCommand::AddLoss {
                    tally: args.required(TALLY_OPTION)?,
                    participant: args.required("participant")?,
                }
            }
            "record" => TallyCommand::Record {
                tally: args("record").required(TALLY_OPTION)?,
            },
            "list" => TallyCommand::List,
            "delete" => TallyCommand::Delete {
                tally: args("delete").required(TALLY_OPTION)?,
            },
            "stats" => TallyCommand::Stats {
                participant: args("stats").required("participant")?,
            },
            other => return Err(CommandError::UnknownSubcommand(other.into())),
        };
        Ok(command)
    }

    /// Subcommand name as registered with the platform.
    pub fn name(&self) -> &'static str {
        match self {
            TallyCommand::Create { .. } => "create",
            TallyCommand::AddWin { .. } => "add-win",
            TallyCommand::AddLoss { .. } => "add-loss",
            TallyCommand::Record { .. } => "record",
            TallyCommand::List => "list",
            TallyCommand::Delete { .. } => "delete",
            TallyCommand::Stats { .. } => "stats",
        }
    }
}

struct Args<'a> {
    subcommand: &'static str,
    options: &'a [(&'a str, &'a str)],
}

impl Args<'_> {
    fn required(&self, option: &'static str) -> Result<String, CommandError> {
        self.options
            .iter()
            .find(|(name, _)| *name == option)
            .map(|(_, value)| value.to_string())
            .ok_or(CommandError::MissingOption {
                subcommand: self.subcommand,
                option,
            })
    }
}

/// Autocomplete choice: `"<game> - <matchup>"` shown, `"<game>|<matchup>"` submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Label shown to the user.
    pub name: String,
    /// Token submitted as the option value.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_options_by_name() {
        let command = TallyCommand::parse(
            "create",
            [
                ("participant2", "Bob"),
                ("name", "Chess"),
                ("participant1", "Alice"),
            ],
        )
        .unwrap();
        assert_eq!(
            command,
            TallyCommand::Create {
                game: "Chess".into(),
                participant1: "Alice".into(),
                participant2: "Bob".into(),
            }
        );
        assert_eq!(command.name(), "create");
    }

    #[test]
    fn parses_list_without_options() {
        assert_eq!(
            TallyCommand::parse("list", []).unwrap(),
            TallyCommand::List
        );
    }

    #[test]
    fn missing_option_is_reported() {
        let err = TallyCommand::parse("add-win", [("tally", "Chess|Alice vs Bob")]).unwrap_err();
        assert!(matches!(
            err,
            CommandError::MissingOption {
                subcommand: "add-win",
                option: "participant"
            }
        ));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        let err = TallyCommand::parse("reset", []).unwrap_err();
        assert!(matches!(err, CommandError::UnknownSubcommand(name) if name == "reset"));
    }
}
