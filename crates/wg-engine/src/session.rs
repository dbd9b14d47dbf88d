//! Play-through state for one story.
//!
//! A [`Session`] owns the story, the player's unlock set and the store that
//! persists it. Positions move from node to node until an ending is reached;
//! [`Session::reset_to_start`] begins a new play-through with the unlocks
//! kept.

use wg_core::{Node, Story, ensure_valid};

use crate::ending::{EndingPresenter, EndingProgress, EndingView};
use crate::error::{EngineError, EngineResult, LoadError};
use crate::unlock::{UnlockSet, UnlockStore};

/// Where the player currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// Reading a node.
    AtNode(String),
    /// Reached an ending. Terminal until reset.
    AtEnding(String),
}

/// The result of a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit<'s> {
    /// The choice led to another node.
    Node(&'s Node),
    /// The choice led to an ending.
    Ending {
        /// The ending as the player now sees it.
        view: EndingView,
        /// Whether this visit unlocked the ending.
        newly_unlocked: bool,
    },
}

/// An interactive play-through of a validated story.
pub struct Session<S: UnlockStore> {
    story: Story,
    story_key: String,
    store: S,
    unlocked: UnlockSet,
    position: Position,
    presenter: EndingPresenter,
}

impl<S: UnlockStore> Session<S> {
    /// Validate the story, load its unlock set from `store`, and start at the
    /// start node.
    pub fn begin(story: Story, story_key: impl Into<String>, store: S) -> EngineResult<Self> {
        let story_key = story_key.into();
        let unlocked = store.load_unlocked(&story_key);
        Self::with_unlocked(story, story_key, store, unlocked)
    }

    /// Like [`Session::begin`] with a caller-supplied unlock set.
    pub fn with_unlocked(
        story: Story,
        story_key: impl Into<String>,
        store: S,
        unlocked: UnlockSet,
    ) -> EngineResult<Self> {
        ensure_valid(&story)?;
        if !story.is_node(&story.start) {
            return Err(EngineError::Load(LoadError::InvalidStart {
                start: story.start.clone(),
            }));
        }

        let story_key = story_key.into();
        tracing::info!(
            story = %story_key,
            title = %story.title,
            unlocked = unlocked.len(),
            "session begun"
        );

        let position = Position::AtNode(story.start.clone());
        Ok(Self {
            story,
            story_key,
            store,
            unlocked,
            position,
            presenter: EndingPresenter::default(),
        })
    }

    /// Use a custom presenter for ending views.
    pub fn with_presenter(mut self, presenter: EndingPresenter) -> Self {
        self.presenter = presenter;
        self
    }

    /// The story being played.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// Key the unlock set is stored under.
    pub fn story_key(&self) -> &str {
        &self.story_key
    }

    /// The player's unlock set.
    pub fn unlocked(&self) -> &UnlockSet {
        &self.unlocked
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Whether the play-through reached an ending.
    pub fn is_finished(&self) -> bool {
        matches!(self.position, Position::AtEnding(_))
    }

    /// The current node, or `None` at an ending.
    pub fn current_node(&self) -> Option<&Node> {
        match &self.position {
            Position::AtNode(id) => Some(self.node(id)),
            Position::AtEnding(_) => None,
        }
    }

    /// The current ending, or `None` at a node.
    pub fn current_ending(&self) -> Option<EndingView> {
        match &self.position {
            Position::AtEnding(id) => self.presenter.describe(&self.story, &self.unlocked, id),
            Position::AtNode(_) => None,
        }
    }

    /// All endings as the player currently sees them.
    pub fn endings(&self) -> EndingProgress {
        self.presenter.list(&self.story, &self.unlocked)
    }

    /// Follow the choice leading to `target`.
    ///
    /// An id naming both an ending and a node leads to the ending.
    /// Reaching an ending for the first time unlocks it and persists the
    /// unlock set. If persisting fails the error is returned, but the
    /// unlock and the move both stand.
    pub fn choose(&mut self, target: &str) -> EngineResult<Visit<'_>> {
        let current = match &self.position {
            Position::AtNode(id) => id.clone(),
            Position::AtEnding(_) => return Err(EngineError::SessionFinished),
        };

        if !self.node(&current).targets().any(|t| t == target) {
            return Err(EngineError::InvalidChoice {
                node: current,
                target: target.to_string(),
            });
        }

        if !self.story.is_ending(target) {
            if !self.story.is_node(target) {
                unreachable!("validated story has dangling choice {current} -> {target}");
            }
            self.position = Position::AtNode(target.to_string());
            return Ok(Visit::Node(self.node(target)));
        }

        self.position = Position::AtEnding(target.to_string());
        let newly_unlocked = self.unlocked.insert(target.to_string());
        if newly_unlocked {
            tracing::info!(story = %self.story_key, ending = target, "ending unlocked");
            self.store.save_unlocked(&self.story_key, &self.unlocked)?;
        }

        let Some(view) = self.presenter.describe(&self.story, &self.unlocked, target) else {
            unreachable!("ending {target} vanished from story");
        };
        Ok(Visit::Ending {
            view,
            newly_unlocked,
        })
    }

    /// Follow the choice at 0-based `index` of the current node.
    pub fn choose_index(&mut self, index: usize) -> EngineResult<Visit<'_>> {
        let node = self.current_node().ok_or(EngineError::SessionFinished)?;
        let target = match node.choices.get(index) {
            Some(choice) => choice.target.clone(),
            None => {
                return Err(EngineError::ChoiceOutOfRange {
                    node: node.id.clone(),
                    index,
                });
            }
        };
        self.choose(&target)
    }

    /// Start a new play-through. Unlocks are kept.
    pub fn reset_to_start(&mut self) {
        self.position = Position::AtNode(self.story.start.clone());
    }

    /// Forget every unlocked ending, in memory and in the store.
    pub fn reset_progress(&mut self) -> EngineResult<()> {
        self.unlocked.clear();
        self.store.clear_unlocked(&self.story_key)?;
        Ok(())
    }

    /// Give back the store, ending the session.
    pub fn into_store(self) -> S {
        self.store
    }

    fn node(&self, id: &str) -> &Node {
        match self.story.node(id) {
            Some(node) => node,
            None => unreachable!("validated story has no node {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::unlock::MemoryUnlockStore;
    use wg_core::Ending;

    fn branching() -> Story {
        Story::new("Branching", "a")
            .with_node(
                Node::new("a", "Fork in the road.")
                    .with_choice("Left", "b")
                    .with_choice("Right", "c"),
            )
            .with_node(Node::new("b", "A quiet lane.").with_choice("Walk on", "ending1"))
            .with_node(
                Node::new("c", "Dark clouds.")
                    .with_choice("Turn back", "ending1")
                    .with_choice("Press on", "ending2"),
            )
            .with_ending(Ending::new("ending1", "The Quiet Road", "You walk home."))
            .with_ending(Ending::new("ending2", "The Storm", "Thunder answers."))
    }

    fn session() -> Session<MemoryUnlockStore> {
        Session::begin(branching(), "branching", MemoryUnlockStore::new()).unwrap()
    }

    /// A store whose writes always fail.
    #[derive(Default)]
    struct ReadOnlyStore;

    impl UnlockStore for ReadOnlyStore {
        fn load_unlocked(&self, _story_key: &str) -> UnlockSet {
            UnlockSet::new()
        }

        fn save_unlocked(&mut self, story_key: &str, _: &UnlockSet) -> Result<(), StorageError> {
            Err(StorageError::Write {
                path: story_key.into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }

        fn clear_unlocked(&mut self, _story_key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn begins_at_start() {
        let s = session();
        assert_eq!(s.position(), &Position::AtNode("a".to_string()));
        assert_eq!(s.current_node().unwrap().text, "Fork in the road.");
        assert!(!s.is_finished());
        assert!(s.unlocked().is_empty());
    }

    #[test]
    fn shared_id_leads_to_the_ending() {
        let story = Story::new("Shared", "a")
            .with_node(Node::new("a", "A").with_choice("Go", "x"))
            .with_node(Node::new("x", "Also a node.").with_choice("On", "end"))
            .with_ending(Ending::new("x", "Crossroads", "Both at once."))
            .with_ending(Ending::new("end", "End", "Done."));
        let bounds = wg_core::compute_path_bounds(&story);
        assert_eq!((bounds.min, bounds.max), (1, 1));

        let mut s = Session::begin(story, "shared", MemoryUnlockStore::new()).unwrap();
        match s.choose("x").unwrap() {
            Visit::Ending { view, newly_unlocked } => {
                assert_eq!(view.name, "Crossroads");
                assert!(newly_unlocked);
            }
            Visit::Node(node) => panic!("moved to node {}", node.id),
        }
        assert_eq!(s.position(), &Position::AtEnding("x".to_string()));
        assert!(s.unlocked().contains("x"));
    }

    #[test]
    fn invalid_story_is_rejected_with_all_edges() {
        let story = branching().with_node(
            Node::new("b", "Broken")
                .with_choice("x", "nowhere")
                .with_choice("y", "void"),
        );
        let err = Session::begin(story, "broken", MemoryUnlockStore::new())
            .err()
            .unwrap();
        match err {
            EngineError::Validation(v) => assert_eq!(v.broken.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn choose_moves_between_nodes() {
        let mut s = session();
        match s.choose("c").unwrap() {
            Visit::Node(node) => assert_eq!(node.id, "c"),
            other => panic!("expected node, got {other:?}"),
        }
        assert_eq!(s.position(), &Position::AtNode("c".to_string()));
    }

    #[test]
    fn reaching_ending_unlocks_and_persists() {
        let mut s = session();
        s.choose("b").unwrap();
        match s.choose("ending1").unwrap() {
            Visit::Ending {
                view,
                newly_unlocked,
            } => {
                assert!(newly_unlocked);
                assert_eq!(view.name, "The Quiet Road");
                assert_eq!(view.ordinal, 1);
            }
            other => panic!("expected ending, got {other:?}"),
        }
        assert!(s.is_finished());
        assert!(s.current_node().is_none());
        assert!(s.unlocked().contains("ending1"));

        let store = s.into_store();
        let mut expected = UnlockSet::new();
        expected.insert("ending1".to_string());
        assert_eq!(store.load_unlocked("branching"), expected);
    }

    #[test]
    fn second_visit_is_not_new() {
        let mut s = session();
        s.choose("b").unwrap();
        s.choose("ending1").unwrap();
        s.reset_to_start();
        s.choose("c").unwrap();
        let visit = s.choose("ending1").unwrap();
        assert!(matches!(
            visit,
            Visit::Ending {
                newly_unlocked: false,
                ..
            }
        ));
    }

    #[test]
    fn listing_after_unlocking_first_ending() {
        let mut s = session();
        s.choose("b").unwrap();
        s.choose("ending1").unwrap();

        let progress = s.endings();
        let names: Vec<_> = progress.endings.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["The Quiet Road", "???"]);
        assert_eq!(progress.unlocked_count(), 1);
    }

    #[test]
    fn ending_is_terminal_until_reset() {
        let mut s = session();
        s.choose("b").unwrap();
        s.choose("ending1").unwrap();
        assert!(matches!(s.choose("a"), Err(EngineError::SessionFinished)));
        assert!(matches!(s.choose_index(0), Err(EngineError::SessionFinished)));

        s.reset_to_start();
        assert_eq!(s.position(), &Position::AtNode("a".to_string()));
        assert!(s.unlocked().contains("ending1"));
    }

    #[test]
    fn only_current_choices_are_allowed() {
        let mut s = session();
        let err = s.choose("ending2").unwrap_err();
        assert!(matches!(err, EngineError::InvalidChoice { ref node, ref target }
            if node == "a" && target == "ending2"));
        assert!(matches!(
            s.choose_index(5),
            Err(EngineError::ChoiceOutOfRange { index: 5, .. })
        ));
        assert_eq!(s.position(), &Position::AtNode("a".to_string()));
    }

    #[test]
    fn choose_by_index() {
        let mut s = session();
        s.choose_index(1).unwrap();
        let visit = s.choose_index(1).unwrap();
        match visit {
            Visit::Ending { view, .. } => assert_eq!(view.id, "ending2"),
            other => panic!("expected ending, got {other:?}"),
        }
    }

    #[test]
    fn storage_failure_keeps_unlock_in_memory() {
        let mut s = Session::begin(branching(), "branching", ReadOnlyStore).unwrap();
        s.choose("b").unwrap();
        let err = s.choose("ending1").unwrap_err();
        assert!(matches!(err, EngineError::Storage(_)));

        assert!(s.is_finished());
        assert!(s.unlocked().contains("ending1"));
        assert_eq!(s.current_ending().unwrap().name, "The Quiet Road");
    }

    #[test]
    fn existing_unlocks_are_loaded() {
        let mut store = MemoryUnlockStore::new();
        let mut set = UnlockSet::new();
        set.insert("ending2".to_string());
        set.insert("from_an_older_version".to_string());
        store.save_unlocked("branching", &set).unwrap();

        let s = Session::begin(branching(), "branching", store).unwrap();
        // Unknown ids are kept but never listed.
        assert!(s.unlocked().contains("from_an_older_version"));
        let progress = s.endings();
        assert_eq!(progress.unlocked_count(), 1);
        assert_eq!(progress.endings[1].name, "The Storm");
    }

    #[test]
    fn reset_progress_clears_store() {
        let mut s = session();
        s.choose("b").unwrap();
        s.choose("ending1").unwrap();
        s.reset_progress().unwrap();
        assert!(s.unlocked().is_empty());
        assert!(s.into_store().load_unlocked("branching").is_empty());
    }

    #[test]
    fn custom_presenter_marker() {
        let s = session().with_presenter(EndingPresenter::new("(hidden)"));
        assert_eq!(s.endings().endings[0].name, "(hidden)");
    }
}
