//! Core types for Wegweiser: the story graph and its analyses.
//!
//! This crate defines the in-memory shape of a branching story and the pure
//! checks run against it before play. It does no I/O; loading stories and
//! persisting unlocked endings live in `wg-engine`.

/// Error types used throughout the crate.
pub mod error;
/// Shortest and longest path analysis.
pub mod paths;
/// Story, node, choice and ending types.
pub mod story;
/// Broken-edge detection.
pub mod validate;

/// Re-export error types.
pub use error::{PathError, ValidationError};
/// Re-export path analysis.
pub use paths::{PathBounds, PathLimits, compute_path_bounds, compute_path_bounds_with};
/// Re-export story model types.
pub use story::{Choice, Ending, Node, Story, Target};
/// Re-export validation.
pub use validate::{BrokenEdge, ensure_valid, validate};
