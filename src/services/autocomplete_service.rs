use crate::{
    dto::command::{MAX_SUGGESTIONS, Suggestion},
    state::{SharedState, TallyStore},
};

/// Suggest `game|matchup` tokens whose label contains `partial`, ignoring case.
pub async fn suggestions(state: &SharedState, partial: &str) -> Vec<Suggestion> {
    let tallies = state.tallies().await;
    suggest(&tallies, partial)
}

/// Label every matchup as `"<game> - <matchup>"` and keep the first [`MAX_SUGGESTIONS`] matches.
pub fn suggest(tallies: &TallyStore, partial: &str) -> Vec<Suggestion> {
    let needle = partial.to_lowercase();
    tallies
        .list_all()
        .into_iter()
        .map(|view| Suggestion {
            name: format!("{} - {}", view.game, view.id),
            value: format!("{}|{}", view.game, view.id),
        })
        .filter(|suggestion| suggestion.name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}
