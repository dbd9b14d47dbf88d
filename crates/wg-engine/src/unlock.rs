//! Persistence of discovered endings.
//!
//! A record holds the unlocked ending ids of one story, joined by newlines
//! and base64-encoded. The encoding only deters casual editing; it is not a
//! security boundary. Records that fail to decode are treated as empty so
//! that corrupt progress never blocks play.

use std::collections::{BTreeSet, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::StorageError;

/// The ending ids a player has discovered in one story.
pub type UnlockSet = BTreeSet<String>;

/// Storage for per-story unlock records.
pub trait UnlockStore {
    /// Read the unlock set for a story. Missing or undecodable records
    /// yield the empty set.
    fn load_unlocked(&self, story_key: &str) -> UnlockSet;

    /// Overwrite the record for a story with the full set.
    fn save_unlocked(&mut self, story_key: &str, unlocked: &UnlockSet)
    -> Result<(), StorageError>;

    /// Delete the record for a story. Deleting an absent record succeeds.
    fn clear_unlocked(&mut self, story_key: &str) -> Result<(), StorageError>;
}

/// Encode an unlock set as a record.
pub fn encode_record(unlocked: &UnlockSet) -> String {
    let joined = unlocked
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    STANDARD.encode(joined.as_bytes())
}

/// Decode a record. Returns `None` if it is not valid base64 or UTF-8.
pub fn decode_record(record: &str) -> Option<UnlockSet> {
    let bytes = STANDARD.decode(record.trim()).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    Some(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Unlock records stored as `<root>/<story_key>/<file_name>`.
#[derive(Debug, Clone)]
pub struct FileUnlockStore {
    root: PathBuf,
    file_name: String,
}

impl FileUnlockStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
        }
    }

    /// Path of the record for a story.
    pub fn record_path(&self, story_key: &str) -> PathBuf {
        self.root.join(story_key).join(&self.file_name)
    }

    /// Library root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl UnlockStore for FileUnlockStore {
    fn load_unlocked(&self, story_key: &str) -> UnlockSet {
        let path = self.record_path(story_key);
        let record = match std::fs::read_to_string(&path) {
            Ok(record) => record,
            Err(e) if e.kind() == ErrorKind::NotFound => return UnlockSet::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unlock record unreadable, ignoring");
                return UnlockSet::new();
            }
        };

        decode_record(&record).unwrap_or_else(|| {
            tracing::warn!(path = %path.display(), "unlock record corrupt, ignoring");
            UnlockSet::new()
        })
    }

    fn save_unlocked(
        &mut self,
        story_key: &str,
        unlocked: &UnlockSet,
    ) -> Result<(), StorageError> {
        let path = self.record_path(story_key);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, encode_record(unlocked))
            .map_err(|source| StorageError::Write { path, source })
    }

    fn clear_unlocked(&mut self, story_key: &str) -> Result<(), StorageError> {
        let path = self.record_path(story_key);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(story = story_key, "unlock record cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove { path, source }),
        }
    }
}

/// Unlock records held in memory, encoded exactly as on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryUnlockStore {
    records: HashMap<String, String>,
}

impl MemoryUnlockStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw record, bypassing encoding.
    pub fn insert_raw(&mut self, story_key: impl Into<String>, record: impl Into<String>) {
        self.records.insert(story_key.into(), record.into());
    }

    /// The raw record for a story, if any.
    pub fn raw(&self, story_key: &str) -> Option<&str> {
        self.records.get(story_key).map(String::as_str)
    }
}

impl UnlockStore for MemoryUnlockStore {
    fn load_unlocked(&self, story_key: &str) -> UnlockSet {
        self.records
            .get(story_key)
            .and_then(|record| decode_record(record))
            .unwrap_or_default()
    }

    fn save_unlocked(
        &mut self,
        story_key: &str,
        unlocked: &UnlockSet,
    ) -> Result<(), StorageError> {
        self.records
            .insert(story_key.to_string(), encode_record(unlocked));
        Ok(())
    }

    fn clear_unlocked(&mut self, story_key: &str) -> Result<(), StorageError> {
        self.records.remove(story_key);
        Ok(())
    }
}
