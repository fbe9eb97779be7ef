//! Cross-game statistics: per-participant aggregation and the wins leaderboard.

use indexmap::IndexMap;

use crate::{
    error::TallyError,
    state::models::{Record, TallyStore},
};

/// Default number of entries shown in the leaderboard.
pub const LEADERBOARD_SIZE: usize = 3;

/// Record of a participant within one matchup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchupStats {
    /// Stored matchup id.
    pub matchup: String,
    /// Participant record in that matchup.
    pub record: Record,
}

/// Per-game totals of a participant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    /// Sum over every matchup of the game.
    pub record: Record,
    /// Contributing matchups in stored order.
    pub matchups: Vec<MatchupStats>,
}

/// Totals of a participant across every game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateStats {
    /// First-seen stored casing of the name.
    pub display_name: String,
    /// Sum over every matchup.
    pub record: Record,
    /// Breakdown by game key, in first-seen order.
    pub games: IndexMap<String, GameStats>,
}

impl AggregateStats {
    fn new(display_name: &str) -> Self {
        Self {
            display_name: display_name.into(),
            record: Record::default(),
            games: IndexMap::new(),
        }
    }

    fn add(&mut self, game: &str, matchup: &str, record: Record) {
        self.record.absorb(record);

        let per_game = self.games.entry(game.to_string()).or_default();
        per_game.record.absorb(record);
        per_game.matchups.push(MatchupStats {
            matchup: matchup.into(),
            record,
        });
    }
}

impl TallyStore {
    /// Sum the records of every participant named `name` (case-insensitively) across all games.
    ///
    /// A participant that exists but has neither wins nor losses is reported as
    /// [`TallyError::NoStatsFound`], like an unknown one.
    pub fn aggregate_participant(&self, name: &str) -> Result<AggregateStats, TallyError> {
        let wanted = name.to_lowercase();
        let mut stats: Option<AggregateStats> = None;

        for view in self.list_all() {
            for (participant, record) in &view.matchup.participants {
                if participant.to_lowercase() != wanted {
                    continue;
                }
                stats
                    .get_or_insert_with(|| AggregateStats::new(participant))
                    .add(view.game, view.id, *record);
            }
        }

        match stats {
            Some(stats) if stats.record.total() > 0 => Ok(stats),
            _ => Err(TallyError::NoStatsFound {
                participant: name.into(),
            }),
        }
    }

    /// Aggregate every distinct participant, grouping names case-insensitively, in first-seen
    /// order.
    pub fn aggregate_all(&self) -> Vec<AggregateStats> {
        let mut all: IndexMap<String, AggregateStats> = IndexMap::new();

        for view in self.list_all() {
            for (participant, record) in &view.matchup.participants {
                all.entry(participant.to_lowercase())
                    .or_insert_with(|| AggregateStats::new(participant))
                    .add(view.game, view.id, *record);
            }
        }

        all.into_values().collect()
    }

    /// The `top` participants ranked by total wins, descending.
    ///
    /// Losses do not break ties; tied participants keep their first-seen order.
    pub fn leaderboard(&self, top: usize) -> Vec<AggregateStats> {
        let mut ranking = self.aggregate_all();
        ranking.sort_by(|a, b| b.record.wins.cmp(&a.record.wins));
        ranking.truncate(top);
        ranking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tally_store::{Outcome, Resolution, TallyRef};

    fn win(store: &mut TallyStore, tally: &str, participant: &str, times: usize) {
        for _ in 0..times {
            store
                .record_outcome(
                    &TallyRef::parse(tally),
                    Resolution::Keyed,
                    participant,
                    Outcome::Win,
                )
                .unwrap();
        }
    }

    #[test]
    fn aggregate_sums_across_games_by_folded_name() {
        let mut store = TallyStore::default();
        store.create_matchup("Chess", "Alice", "Bob").unwrap();
        store.create_matchup("Go", "bob", "Carol").unwrap();
        win(&mut store, "Chess|Alice vs Bob", "Bob", 1);
        win(&mut store, "Go|bob vs Carol", "Carol", 2);

        let stats = store.aggregate_participant("BOB").unwrap();
        assert_eq!(stats.display_name, "Bob");
        assert_eq!(stats.record, Record { wins: 1, losses: 2 });
        let games: Vec<_> = stats.games.keys().map(String::as_str).collect();
        assert_eq!(games, vec!["Chess", "Go"]);
        assert_eq!(stats.games["Go"].record, Record { wins: 0, losses: 2 });
        assert_eq!(stats.games["Go"].matchups[0].matchup, "bob vs Carol");
    }

    #[test]
    fn scenario_stats_after_single_win() {
        let mut store = TallyStore::default();
        store.create_matchup("Chess", "Alice", "Bob").unwrap();
        win(&mut store, "Chess|Alice vs Bob", "Bob", 1);

        let stats = store.aggregate_participant("bob").unwrap();
        assert_eq!(stats.record, Record { wins: 1, losses: 0 });
        assert_eq!(stats.games.len(), 1);
        assert_eq!(stats.games["Chess"].record, Record { wins: 1, losses: 0 });
    }

    #[test]
    fn zero_record_is_reported_as_not_found() {
        let mut store = TallyStore::default();
        store.create_matchup("Chess", "Alice", "Bob").unwrap();

        assert_eq!(
            store.aggregate_participant("alice").unwrap_err(),
            TallyError::NoStatsFound {
                participant: "alice".into()
            }
        );
        assert!(matches!(
            store.aggregate_participant("nobody"),
            Err(TallyError::NoStatsFound { .. })
        ));
    }

    #[test]
    fn leaderboard_keeps_first_seen_order_for_ties() {
        let mut store = TallyStore::default();
        store.create_matchup("Chess", "Zed", "Carl").unwrap();
        store.create_matchup("Go", "Amy", "Carl").unwrap();
        win(&mut store, "Chess|Zed vs Carl", "Zed", 5);
        win(&mut store, "Go|Amy vs Carl", "Amy", 5);
        win(&mut store, "Go|Amy vs Carl", "Carl", 3);

        let names: Vec<_> = store
            .leaderboard(LEADERBOARD_SIZE)
            .into_iter()
            .map(|stats| (stats.display_name, stats.record.wins))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Zed".to_string(), 5),
                ("Amy".to_string(), 5),
                ("Carl".to_string(), 3),
            ]
        );
    }

    #[test]
    fn leaderboard_is_truncated_to_top() {
        let mut store = TallyStore::default();
        store.create_matchup("Chess", "Alice", "Bob").unwrap();
        store.create_matchup("Go", "Carol", "Dave").unwrap();

        assert_eq!(store.leaderboard(3).len(), 3);
        assert_eq!(store.aggregate_all().len(), 4);
        assert!(TallyStore::default().leaderboard(3).is_empty());
    }

    #[test]
    fn aggregates_saturate_on_huge_counts() {
        let store: TallyStore = serde_json::from_value(serde_json::json!({
            "Chess": {
                "A vs B": {
                    "A": {"wins": u64::MAX, "losses": 1},
                    "B": {"wins": 1, "losses": u64::MAX},
                    "createdAt": "2024-01-01T00:00:00.000Z"
                },
                "A vs C": {
                    "A": {"wins": 5, "losses": 0},
                    "C": {"wins": 0, "losses": 5},
                    "createdAt": "2024-01-01T00:00:00.000Z"
                }
            }
        }))
        .unwrap();

        let stats = store.aggregate_participant("a").unwrap();
        assert_eq!(stats.record, Record { wins: u64::MAX, losses: 1 });
        assert_eq!(stats.games["Chess"].record.wins, u64::MAX);
        assert_eq!(stats.record.win_rate(), "100.0");
        assert_eq!(store.leaderboard(LEADERBOARD_SIZE)[0].display_name, "A");
    }
}
