//! Story engine for Wegweiser.
//!
//! Loads branching stories from YAML, persists which endings a player has
//! discovered, and runs play-through sessions over a validated story graph.
//! A [`StoryLibrary`] ties these together for a directory of story folders.

/// Engine configuration.
pub mod config;
/// Ending views and redaction of undiscovered endings.
pub mod ending;
/// Error types for the engine.
pub mod error;
/// Story directory management.
pub mod library;
/// Story loading from YAML.
pub mod loader;
/// Play-through sessions.
pub mod session;
/// Unlock record persistence.
pub mod unlock;

pub use config::EngineConfig;
pub use ending::{EndingPresenter, EndingProgress, EndingView, describe_ending, list_endings};
pub use error::{EngineError, EngineResult, LoadError, StorageError};
pub use library::{StoryEntry, StoryLibrary};
pub use loader::{load_story, parse_story};
pub use session::{Position, Session, Visit};
pub use unlock::{FileUnlockStore, MemoryUnlockStore, UnlockSet, UnlockStore};
