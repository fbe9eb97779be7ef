//! Query and mutation operations of the in-memory [`TallyStore`].
//!
//! Nothing here touches the disk; callers persist through [`crate::state::AppState::mutate`].

use crate::{
    error::TallyError,
    state::models::{
        CREATED_AT_KEY, GameTallies, Matchup, Record, StoredEntry, TallyStore, find_key_ignore_case,
    },
};

/// Outcome recorded for a participant of a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The named participant won; everyone else lost.
    Win,
    /// The named participant lost; everyone else won.
    Loss,
}

/// How the matchup part of a [`TallyRef`] is matched against stored ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Re-split the raw token and match its second segment case-insensitively.
    /// A token without `|` resolves to the empty id and the error does not echo an id.
    Strict,
    /// Search the parsed matchup id case-insensitively; errors echo the requested id.
    Keyed,
}

/// Reference to a matchup as typed by a user or produced by autocomplete (`game|matchup`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TallyRef<'a> {
    raw: &'a str,
    game: &'a str,
    matchup: Option<&'a str>,
}

impl<'a> TallyRef<'a> {
    /// Split a token on its first `|`. Without a separator the whole token names the game.
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('|') {
            Some((game, matchup)) => Self {
                raw,
                game,
                matchup: Some(matchup),
            },
            None => Self {
                raw,
                game: raw,
                matchup: None,
            },
        }
    }

    /// Game key (exact match).
    pub fn game(&self) -> &'a str {
        self.game
    }

    /// Matchup id, if the token carried one.
    pub fn matchup(&self) -> Option<&'a str> {
        self.matchup
    }

    fn strict_matchup(&self) -> &'a str {
        self.raw.split_once('|').map(|(_, id)| id).unwrap_or("")
    }
}

/// Borrowed view of a stored matchup together with its keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchupView<'a> {
    /// Game key.
    pub game: &'a str,
    /// Stored matchup id.
    pub id: &'a str,
    /// Matchup records.
    pub matchup: &'a Matchup,
}

/// Result of [`TallyStore::create_matchup`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedMatchup {
    /// Game key as entered.
    pub game: String,
    /// Constructed matchup id.
    pub id: String,
    /// Freshly initialised records.
    pub matchup: Matchup,
}

/// Result of [`TallyStore::record_outcome`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedOutcome {
    /// Game key.
    pub game: String,
    /// Stored matchup id.
    pub id: String,
    /// Stored (original-case) participant name.
    pub participant: String,
    /// Participant record after the update.
    pub record: Record,
    /// Whole matchup after the update.
    pub matchup: Matchup,
}

/// Keys of a matchup removed by [`TallyStore::delete_matchup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedMatchup {
    /// Game key.
    pub game: String,
    /// Stored matchup id.
    pub id: String,
    /// Whether the game itself was removed because it became empty.
    pub game_removed: bool,
}

impl TallyStore {
    /// Create `"<a> vs <b>"` under `game` with both records at `{0, 0}`.
    ///
    /// The duplicate check compares the constructed ids exactly (case-sensitive), in both
    /// orders. A participant named like the `createdAt` key is rejected.
    pub fn create_matchup(
        &mut self,
        game: &str,
        participant_a: &str,
        participant_b: &str,
    ) -> Result<CreatedMatchup, TallyError> {
        if let Some(reserved) = [participant_a, participant_b]
            .into_iter()
            .find(|name| *name == CREATED_AT_KEY)
        {
            return Err(TallyError::ReservedParticipant {
                participant: reserved.into(),
            });
        }

        let id = format!("{participant_a} vs {participant_b}");
        let reversed = format!("{participant_b} vs {participant_a}");

        if let Some(existing) = self.games.get(game) {
            if existing.entries.contains_key(&id) {
                return Err(TallyError::DuplicateMatchup {
                    game: game.into(),
                    existing: None,
                });
            }
            if existing.entries.contains_key(&reversed) {
                return Err(TallyError::DuplicateMatchup {
                    game: game.into(),
                    existing: Some(reversed),
                });
            }
        }

        let matchup = Matchup::new([participant_a, participant_b]);
        self.games
            .entry(game.to_string())
            .or_insert_with(GameTallies::default)
            .entries
            .insert(id.clone(), StoredEntry::Matchup(matchup.clone()));

        Ok(CreatedMatchup {
            game: game.into(),
            id,
            matchup,
        })
    }

    /// Resolve a reference to the stored `(game, matchup id)` keys.
    pub fn resolve(
        &self,
        tally: &TallyRef<'_>,
        resolution: Resolution,
    ) -> Result<(String, String), TallyError> {
        let game = self
            .games
            .get(tally.game())
            .ok_or_else(|| TallyError::GameNotFound {
                game: tally.game().into(),
            })?;

        let (wanted, echoed) = match resolution {
            Resolution::Strict => (Some(tally.strict_matchup()), None),
            Resolution::Keyed => (tally.matchup(), tally.matchup()),
        };

        let found = wanted.and_then(|wanted| {
            find_key_ignore_case(
                game.entries
                    .iter()
                    .filter(|(_, entry)| entry.as_matchup().is_some())
                    .map(|(id, _)| id),
                wanted,
            )
        });

        match found {
            Some(id) => Ok((tally.game().to_string(), id.to_string())),
            None => Err(TallyError::MatchupNotFound {
                game: tally.game().into(),
                matchup: echoed.map(str::to_string),
            }),
        }
    }

    /// Record a win or a loss for a participant.
    ///
    /// A win increments the participant's wins and the losses of every other participant of
    /// the matchup; a loss is the dual.
    pub fn record_outcome(
        &mut self,
        tally: &TallyRef<'_>,
        resolution: Resolution,
        participant: &str,
        outcome: Outcome,
    ) -> Result<RecordedOutcome, TallyError> {
        let (game, id) = self.resolve(tally, resolution)?;
        let matchup = self
            .games
            .get_mut(&game)
            .and_then(|tallies| tallies.entries.get_mut(&id))
            .and_then(StoredEntry::as_matchup_mut)
            .ok_or_else(|| TallyError::MatchupNotFound {
                game: game.clone(),
                matchup: Some(id.clone()),
            })?;

        let name = matchup
            .find_participant(participant)
            .map(str::to_string)
            .ok_or_else(|| TallyError::ParticipantNotFound {
                participant: participant.into(),
            })?;

        for (key, record) in matchup.participants.iter_mut() {
            let named = *key == name;
            match (outcome, named) {
                (Outcome::Win, true) | (Outcome::Loss, false) => {
                    record.wins = record.wins.saturating_add(1)
                }
                (Outcome::Loss, true) | (Outcome::Win, false) => {
                    record.losses = record.losses.saturating_add(1)
                }
            }
        }

        let record = matchup.record(&name).unwrap_or_default();
        Ok(RecordedOutcome {
            game,
            id,
            participant: name,
            record,
            matchup: matchup.clone(),
        })
    }

    /// Fetch a matchup without modifying it.
    pub fn get_record(
        &self,
        tally: &TallyRef<'_>,
        resolution: Resolution,
    ) -> Result<MatchupView<'_>, TallyError> {
        let (game, id) = self.resolve(tally, resolution)?;
        let view = self.games.get_key_value(&game).and_then(|(game_key, tallies)| {
            tallies.entries.get_key_value(&id).and_then(|(id_key, entry)| {
                entry.as_matchup().map(|matchup| MatchupView {
                    game: game_key,
                    id: id_key,
                    matchup,
                })
            })
        });
        view.ok_or(TallyError::MatchupNotFound {
            game,
            matchup: Some(id),
        })
    }

    /// Every well-formed matchup, game by game, in insertion order.
    pub fn list_all(&self) -> Vec<MatchupView<'_>> {
        self.games
            .iter()
            .flat_map(|(game, tallies)| {
                tallies.matchups().map(move |(id, matchup)| MatchupView {
                    game: game.as_str(),
                    id,
                    matchup,
                })
            })
            .collect()
    }

    /// Remove a matchup, and its game when nothing else is stored under it.
    pub fn delete_matchup(
        &mut self,
        tally: &TallyRef<'_>,
        resolution: Resolution,
    ) -> Result<DeletedMatchup, TallyError> {
        let (game, id) = self.resolve(tally, resolution)?;

        let mut game_removed = false;
        if let Some(tallies) = self.games.get_mut(&game) {
            tallies.entries.shift_remove(&id);
            if tallies.is_empty() {
                self.games.shift_remove(&game);
                game_removed = true;
            }
        }

        Ok(DeletedMatchup {
            game,
            id,
            game_removed,
        })
    }
}
