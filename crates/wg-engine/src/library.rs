//! A directory of stories, one folder per story.
//!
//! Each folder holds the story file and, once the player has found an
//! ending, its unlock record. The folder name is the story key.

use std::path::PathBuf;

use serde::Serialize;
use wg_core::{PathBounds, Story, compute_path_bounds_with};

use crate::config::EngineConfig;
use crate::ending::{EndingPresenter, EndingProgress};
use crate::error::{EngineError, EngineResult, LoadError, StorageError};
use crate::loader::load_story;
use crate::session::Session;
use crate::unlock::{FileUnlockStore, UnlockStore};

/// One story folder in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryEntry {
    /// Folder name, used as the story key.
    pub key: String,
    /// Story title, or the key if the story failed to load.
    pub title: String,
    /// Whether the story failed to load.
    pub broken: bool,
    /// Unlocked and total endings, if the story loaded.
    pub progress: Option<(usize, usize)>,
}

/// A story directory configured by [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct StoryLibrary {
    config: EngineConfig,
}

impl StoryLibrary {
    /// Create a library over `config.stories_dir`.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Path of the story file for `key`.
    pub fn story_path(&self, key: &str) -> PathBuf {
        self.config
            .stories_dir
            .join(key)
            .join(&self.config.story_file)
    }

    /// Unlock store rooted at the library directory.
    pub fn unlocks(&self) -> FileUnlockStore {
        FileUnlockStore::new(&self.config.stories_dir, &self.config.unlock_file)
    }

    /// Ending presenter using the configured locked marker.
    pub fn presenter(&self) -> EndingPresenter {
        EndingPresenter::new(&self.config.locked_marker)
    }

    /// Story folders holding a story file, sorted by key.
    pub fn list(&self) -> EngineResult<Vec<StoryEntry>> {
        let dir = &self.config.stories_dir;
        let entries = std::fs::read_dir(dir).map_err(|source| EngineError::LibraryUnreadable {
            path: dir.clone(),
            source,
        })?;

        let mut keys: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|key| self.story_path(key).is_file())
            .collect();
        keys.sort();

        let store = self.unlocks();
        let presenter = self.presenter();
        let stories = keys
            .into_iter()
            .map(|key| match self.load(&key) {
                Ok(story) => {
                    let progress = presenter.list(&story, &store.load_unlocked(&key));
                    StoryEntry {
                        title: story.title,
                        broken: false,
                        progress: Some((progress.unlocked_count(), progress.total())),
                        key,
                    }
                }
                Err(e) => {
                    tracing::warn!(story = %key, error = %e, "story failed to load");
                    StoryEntry {
                        title: key.clone(),
                        broken: true,
                        progress: None,
                        key,
                    }
                }
            })
            .collect();
        Ok(stories)
    }

    /// Load the story stored under `key`.
    pub fn load(&self, key: &str) -> Result<Story, LoadError> {
        load_story(&self.story_path(key))
    }

    /// Load the player's progress for a story.
    pub fn progress(&self, key: &str, story: &Story) -> EndingProgress {
        self.presenter()
            .list(story, &self.unlocks().load_unlocked(key))
    }

    /// Path bounds for a story, honouring the configured visit bound.
    pub fn path_bounds(&self, story: &Story) -> EngineResult<PathBounds> {
        Ok(compute_path_bounds_with(story, self.config.path_limits())?)
    }

    /// Load, validate and begin a session for `key`.
    pub fn open(&self, key: &str) -> EngineResult<Session<FileUnlockStore>> {
        let story = self.load(key)?;
        let session = Session::begin(story, key, self.unlocks())?;
        Ok(session.with_presenter(self.presenter()))
    }

    /// Delete the unlock records of every listed story.
    pub fn clear<I, K>(&self, keys: I) -> Result<(), StorageError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut store = self.unlocks();
        for key in keys {
            store.clear_unlocked(key.as_ref())?;
        }
        Ok(())
    }
}
