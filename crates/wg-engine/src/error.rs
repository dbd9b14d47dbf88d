//! Error types for the story engine.

use std::path::PathBuf;

use thiserror::Error;
use wg_core::{PathError, ValidationError};

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failures while reading a story resource.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The story file does not exist.
    #[error("story not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The story file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The story file is not a valid story description.
    #[error("cannot parse {}: {message}", path.display())]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The start id does not name a node.
    #[error("start `{start}` is not a node")]
    InvalidStart {
        /// The offending start id.
        start: String,
    },
}

/// Failures while persisting unlocked endings.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the unlock record failed.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Record path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Deleting the unlock record failed.
    #[error("cannot remove {}: {source}", path.display())]
    Remove {
        /// Record path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Creating the story directory for the record failed.
    #[error("cannot create {}: {source}", path.display())]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that can occur while selecting or playing a story.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The story could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The story graph has broken edges.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Path analysis hit its visit bound.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Unlock state could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The target is not one of the current node's choices.
    #[error("`{target}` is not a choice at `{node}`")]
    InvalidChoice {
        /// Current node id.
        node: String,
        /// Requested target id.
        target: String,
    },

    /// The choice index is past the end of the current node's choices.
    #[error("no choice {index} at `{node}`")]
    ChoiceOutOfRange {
        /// Current node id.
        node: String,
        /// Requested 0-based index.
        index: usize,
    },

    /// The play-through already reached an ending.
    #[error("the story has ended; reset to play again")]
    SessionFinished,

    /// The story library directory could not be listed.
    #[error("cannot read story library {}: {source}", path.display())]
    LibraryUnreadable {
        /// Library root.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
