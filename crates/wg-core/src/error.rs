use crate::paths::PathBounds;
use crate::validate::BrokenEdge;

/// A story with one or more broken edges. Carries every broken edge, not
/// just the first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render_edges(.broken))]
pub struct ValidationError {
    /// Broken edges in node authoring order, then choice order.
    pub broken: Vec<BrokenEdge>,
}

fn render_edges(broken: &[BrokenEdge]) -> String {
    let plural = if broken.len() == 1 { "" } else { "s" };
    let mut out = format!("story has {} broken path{plural}:", broken.len());
    for edge in broken {
        out.push_str(&format!("\n  {edge}"));
    }
    out
}

/// Errors from bounded path analysis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// More work items were dequeued than the host allowed.
    #[error("path analysis stopped after {limit} visits")]
    VisitLimitExceeded {
        /// The visit bound that was exceeded.
        limit: usize,
        /// Bounds recorded before the analysis stopped.
        partial: PathBounds,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_edge() {
        let err = ValidationError {
            broken: vec![
                BrokenEdge::new("start", "nowhere"),
                BrokenEdge::new("hall", "void"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("story has 2 broken paths:"));
        assert!(msg.contains("start -> nowhere"));
        assert!(msg.contains("hall -> void"));
    }

    #[test]
    fn single_edge_is_singular() {
        let err = ValidationError {
            broken: vec![BrokenEdge::new("a", "b")],
        };
        assert_eq!(err.to_string(), "story has 1 broken path:\n  a -> b");
    }
}
