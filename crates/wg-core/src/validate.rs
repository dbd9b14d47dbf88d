//! Broken-edge detection for story graphs.

use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;
use crate::story::Story;

/// A choice whose target is neither a known node nor a known ending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BrokenEdge {
    /// Id of the node holding the choice.
    pub source: String,
    /// The unresolved target id. Empty when the choice names no target.
    pub target: String,
}

impl BrokenEdge {
    /// Create a broken edge record.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for BrokenEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.target.is_empty() {
            write!(f, "{} -> (no target)", self.source)
        } else {
            write!(f, "{} -> {}", self.source, self.target)
        }
    }
}

/// Every broken edge in the story, in node then choice order.
///
/// An empty result means every choice resolves to a node or an ending.
pub fn validate(story: &Story) -> Vec<BrokenEdge> {
    story
        .nodes()
        .iter()
        .flat_map(|node| {
            node.targets()
                .filter(|target| !story.is_node(target) && !story.is_ending(target))
                .map(|target| BrokenEdge::new(node.id.as_str(), target))
        })
        .collect()
}

/// Like [`validate`], but fails with the full broken-edge list.
pub fn ensure_valid(story: &Story) -> Result<(), ValidationError> {
    let broken = validate(story);
    if broken.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { broken })
    }
}
