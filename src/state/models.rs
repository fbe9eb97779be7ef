//! Serialized shape of the tally data. The same types back the in-memory store, the JSON data
//! file and the `/api/tallies` snapshot.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, macros::format_description};

/// Root of the tally data: game name to the matchups tracked under it.
///
/// Game keys are case-sensitive and keep the insertion order of the persisted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TallyStore {
    pub(crate) games: IndexMap<String, GameTallies>,
}

/// Matchups tracked under a single game, keyed by `"<participantA> vs <participantB>"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameTallies {
    pub(crate) entries: IndexMap<String, StoredEntry>,
}

/// A value stored under a matchup key.
///
/// Anything that does not decode as a [`Matchup`] is kept verbatim so a save never drops data
/// that a previous version (or a hand edit) wrote, but it is invisible to every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredEntry {
    /// Well-formed matchup carrying a `createdAt` stamp.
    Matchup(Matchup),
    /// Entry that is not a matchup.
    Unrecognized(serde_json::Value),
}

/// Key under which a matchup stores its creation time, never usable as a participant name.
pub const CREATED_AT_KEY: &str = "createdAt";

/// Win/loss records for the participants of one matchup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    /// Participant display name to record. Fixed at creation.
    #[serde(flatten)]
    pub participants: IndexMap<String, Record>,
    /// ISO-8601 creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Cumulative tally of a participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Number of wins.
    pub wins: u64,
    /// Number of losses.
    pub losses: u64,
}

impl Record {
    /// Total number of games played.
    pub fn total(&self) -> u64 {
        self.wins.saturating_add(self.losses)
    }

    /// Add another record's counts, saturating at the counter limit.
    pub fn absorb(&mut self, other: Record) {
        self.wins = self.wins.saturating_add(other.wins);
        self.losses = self.losses.saturating_add(other.losses);
    }

    /// Win rate rendered with one decimal place.
    pub fn win_rate(&self) -> String {
        win_rate(self.wins, self.losses)
    }
}

impl Matchup {
    /// Create a matchup with every participant at `{0, 0}`, stamped with the current time.
    pub fn new<I, S>(participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            participants: participants
                .into_iter()
                .map(|name| (name.into(), Record::default()))
                .collect(),
            created_at: now_iso8601(),
        }
    }

    /// Find the stored (original-case) participant key matching `name` case-insensitively.
    pub fn find_participant(&self, name: &str) -> Option<&str> {
        find_key_ignore_case(self.participants.keys(), name)
    }

    /// Record of a participant looked up by its exact stored key.
    pub fn record(&self, participant: &str) -> Option<Record> {
        self.participants.get(participant).copied()
    }
}

impl StoredEntry {
    /// Borrow the matchup if this entry is one.
    pub fn as_matchup(&self) -> Option<&Matchup> {
        match self {
            StoredEntry::Matchup(matchup) => Some(matchup),
            StoredEntry::Unrecognized(_) => None,
        }
    }

    /// Mutably borrow the matchup if this entry is one.
    pub fn as_matchup_mut(&mut self) -> Option<&mut Matchup> {
        match self {
            StoredEntry::Matchup(matchup) => Some(matchup),
            StoredEntry::Unrecognized(_) => None,
        }
    }
}

impl GameTallies {
    /// Iterate over the well-formed matchups, skipping unrecognized entries.
    pub fn matchups(&self) -> impl Iterator<Item = (&str, &Matchup)> {
        self.entries
            .iter()
            .filter_map(|(id, entry)| entry.as_matchup().map(|matchup| (id.as_str(), matchup)))
    }

    /// Number of stored entries, recognized or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored under the game.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TallyStore {
    /// Whether the store holds no game at all.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Number of games.
    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// Borrow the matchups of a game by its exact key.
    pub fn game(&self, game: &str) -> Option<&GameTallies> {
        self.games.get(game)
    }

    /// Iterate over every game in insertion order.
    pub fn games(&self) -> impl Iterator<Item = (&str, &GameTallies)> {
        self.games.iter().map(|(name, game)| (name.as_str(), game))
    }
}

/// Render `wins / (wins + losses) * 100` with one decimal place, `"0.0"` when nothing was played.
///
/// Halfway values round away from zero.
pub fn win_rate(wins: u64, losses: u64) -> String {
    let total = wins as f64 + losses as f64;
    if total == 0.0 {
        return "0.0".into();
    }
    let rate = wins as f64 / total * 100.0;
    format!("{:.1}", (rate * 10.0).round() / 10.0)
}

/// Case-insensitive key search returning the stored key.
pub(crate) fn find_key_ignore_case<'a, I>(keys: I, needle: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let needle = needle.to_lowercase();
    keys.into_iter()
        .find(|key| key.to_lowercase() == needle)
        .map(String::as_str)
}

fn now_iso8601() -> String {
    iso8601_millis(OffsetDateTime::now_utc())
}

/// UTC timestamp with millisecond precision, e.g. `2024-01-02T03:04:05.678Z`.
pub(crate) fn iso8601_millis(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
