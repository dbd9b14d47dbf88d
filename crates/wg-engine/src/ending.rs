//! Ending views that hide what the player has not discovered yet.
//!
//! Views are computed from the story and the unlock set; the stored
//! [`Ending`](wg_core::Ending) data is never touched. Listings always reveal
//! how many endings exist and where each one sits, but only the name and text
//! of unlocked ones.

use serde::Serialize;
use wg_core::Story;

use crate::unlock::UnlockSet;

/// Default marker shown for locked endings.
pub const LOCKED_MARKER: &str = "???";

/// An ending as the player is allowed to see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndingView {
    /// 1-based position in authoring order.
    pub ordinal: usize,
    /// Ending id.
    pub id: String,
    /// True name, or the locked marker.
    pub name: String,
    /// True text, or the locked marker.
    pub text: String,
    /// Whether the player has discovered this ending.
    pub unlocked: bool,
}

/// Every ending of a story, in order, as the player is allowed to see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndingProgress {
    /// One view per ending.
    pub endings: Vec<EndingView>,
}

impl EndingProgress {
    /// Number of unlocked endings.
    pub fn unlocked_count(&self) -> usize {
        self.endings.iter().filter(|e| e.unlocked).count()
    }

    /// Total number of endings.
    pub fn total(&self) -> usize {
        self.endings.len()
    }
}

/// Builds ending views with a configurable locked marker.
#[derive(Debug, Clone)]
pub struct EndingPresenter {
    marker: String,
}

impl Default for EndingPresenter {
    fn default() -> Self {
        Self::new(LOCKED_MARKER)
    }
}

impl EndingPresenter {
    /// Create a presenter using `marker` for locked endings.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// View one ending. `None` if `ending_id` is not an ending of the story.
    pub fn describe(
        &self,
        story: &Story,
        unlocked: &UnlockSet,
        ending_id: &str,
    ) -> Option<EndingView> {
        let ending = story.ending(ending_id)?;
        let ordinal = story.ending_ordinal(ending_id)?;
        let view = if unlocked.contains(ending_id) {
            EndingView {
                ordinal,
                id: ending.id.clone(),
                name: ending.name.clone(),
                text: ending.text.clone(),
                unlocked: true,
            }
        } else {
            EndingView {
                ordinal,
                id: ending.id.clone(),
                name: self.marker.clone(),
                text: self.marker.clone(),
                unlocked: false,
            }
        };
        Some(view)
    }

    /// View every ending of the story.
    pub fn list(&self, story: &Story, unlocked: &UnlockSet) -> EndingProgress {
        let endings = story
            .endings()
            .iter()
            .filter_map(|e| self.describe(story, unlocked, &e.id))
            .collect();
        EndingProgress { endings }
    }
}

/// [`EndingPresenter::describe`] with the default marker.
pub fn describe_ending(story: &Story, unlocked: &UnlockSet, ending_id: &str) -> Option<EndingView> {
    EndingPresenter::default().describe(story, unlocked, ending_id)
}

/// [`EndingPresenter::list`] with the default marker.
pub fn list_endings(story: &Story, unlocked: &UnlockSet) -> EndingProgress {
    EndingPresenter::default().list(story, unlocked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wg_core::{Ending, Node};

    fn story() -> Story {
        Story::new("Branching", "a")
            .with_node(Node::new("a", "A").with_choice("b", "b").with_choice("c", "c"))
            .with_node(Node::new("b", "B").with_choice("1", "ending1"))
            .with_node(
                Node::new("c", "C")
                    .with_choice("1", "ending1")
                    .with_choice("2", "ending2"),
            )
            .with_ending(Ending::new("ending1", "The Quiet Road", "You walk home."))
            .with_ending(Ending::new("ending2", "The Storm", "Thunder answers."))
    }

    fn unlocked(ids: &[&str]) -> UnlockSet {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unlocked_ending_shows_true_content() {
        let view = describe_ending(&story(), &unlocked(&["ending1"]), "ending1").unwrap();
        assert!(view.unlocked);
        assert_eq!(view.ordinal, 1);
        assert_eq!(view.name, "The Quiet Road");
        assert_eq!(view.text, "You walk home.");
    }

    #[test]
    fn locked_ending_is_redacted_every_time() {
        let story = story();
        let mut set = UnlockSet::new();
        for _ in 0..3 {
            let view = describe_ending(&story, &set, "ending2").unwrap();
            assert!(!view.unlocked);
            assert_eq!(view.ordinal, 2);
            assert_eq!(view.name, "???");
            assert_eq!(view.text, "???");
            set.insert("ending1".to_string());
        }
        // Stored data is untouched.
        assert_eq!(story.ending("ending2").unwrap().name, "The Storm");
    }

    #[test]
    fn unknown_id_has_no_view() {
        assert!(describe_ending(&story(), &UnlockSet::new(), "a").is_none());
        assert!(describe_ending(&story(), &UnlockSet::new(), "nope").is_none());
    }

    #[test]
    fn listing_reveals_count_and_position_only() {
        let progress = list_endings(&story(), &unlocked(&["ending1"]));
        assert_eq!(progress.total(), 2);
        assert_eq!(progress.unlocked_count(), 1);

        let names: Vec<_> = progress
            .endings
            .iter()
            .map(|e| (e.ordinal, e.name.as_str()))
            .collect();
        assert_eq!(names, [(1, "The Quiet Road"), (2, "???")]);
    }

    #[test]
    fn unknown_unlocked_ids_are_not_counted() {
        let progress = list_endings(&story(), &unlocked(&["ending2", "removed_long_ago"]));
        assert_eq!(progress.unlocked_count(), 1);
        assert_eq!(progress.total(), 2);
    }

    #[test]
    fn custom_marker() {
        let presenter = EndingPresenter::new("[locked]");
        let view = presenter
            .describe(&story(), &UnlockSet::new(), "ending1")
            .unwrap();
        assert_eq!(view.name, "[locked]");
        assert_eq!(view.text, "[locked]");
    }
}
