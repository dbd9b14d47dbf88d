//! Shortest and longest play-through lengths.
//!
//! Exploration is breadth-first from the start node. Each work item carries
//! the set of ids already on its own path, so a node is never revisited
//! within one path but may appear on many different paths. A global visited
//! set would drop longer paths through shared nodes, so none is used.
//!
//! The number of explored paths can grow exponentially on heavily branching
//! graphs; [`compute_path_bounds_with`] lets the host cap the work.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::error::PathError;
use crate::story::Story;

/// Path lengths, in edges, from the start node to any reachable ending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PathBounds {
    /// Length of the shortest path, or 0 if no ending is reachable.
    pub min: usize,
    /// Length of the longest cycle-free path, or 0 if no ending is reachable.
    pub max: usize,
    /// Number of distinct endings hit by at least one path.
    pub endings_reachable: usize,
}

impl PathBounds {
    /// Whether at least one ending is reachable from the start.
    pub fn any_reachable(&self) -> bool {
        self.endings_reachable > 0
    }
}

/// Host-imposed limits on path analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathLimits {
    /// Maximum number of work items to dequeue. `None` means unbounded.
    pub max_visits: Option<usize>,
}

impl PathLimits {
    /// No limits.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Stop after `max_visits` dequeued work items.
    pub fn with_max_visits(max_visits: usize) -> Self {
        Self {
            max_visits: Some(max_visits),
        }
    }
}

/// Compute path bounds with no visit limit.
pub fn compute_path_bounds(story: &Story) -> PathBounds {
    let mut recorder = Recorder::default();
    // An unbounded walk never reports the limit.
    let _ = walk(story, None, &mut recorder);
    recorder.bounds()
}

/// Compute path bounds, failing once more than `limits.max_visits` work
/// items have been dequeued.
pub fn compute_path_bounds_with(story: &Story, limits: PathLimits) -> Result<PathBounds, PathError> {
    let mut recorder = Recorder::default();
    match walk(story, limits.max_visits, &mut recorder) {
        Ok(()) => Ok(recorder.bounds()),
        Err(limit) => Err(PathError::VisitLimitExceeded {
            limit,
            partial: recorder.bounds(),
        }),
    }
}

#[derive(Default)]
struct Recorder<'s> {
    min: Option<usize>,
    max: Option<usize>,
    endings: HashSet<&'s str>,
    paths: usize,
}

impl<'s> Recorder<'s> {
    fn record(&mut self, ending: &'s str, depth: usize) {
        self.min = Some(self.min.map_or(depth, |m| m.min(depth)));
        self.max = Some(self.max.map_or(depth, |m| m.max(depth)));
        self.endings.insert(ending);
        self.paths += 1;
    }

    fn bounds(&self) -> PathBounds {
        PathBounds {
            min: self.min.unwrap_or(0),
            max: self.max.unwrap_or(0),
            endings_reachable: self.endings.len(),
        }
    }
}

struct WorkItem<'s> {
    id: &'s str,
    depth: usize,
    on_path: HashSet<&'s str>,
}

/// Breadth-first walk. Returns `Err(limit)` when the visit bound is exceeded.
fn walk<'s>(
    story: &'s Story,
    max_visits: Option<usize>,
    recorder: &mut Recorder<'s>,
) -> Result<(), usize> {
    if story.node_count() == 0 || story.start.is_empty() {
        return Ok(());
    }

    let start = story.start.as_str();
    let mut queue = VecDeque::new();
    queue.push_back(WorkItem {
        id: start,
        depth: 0,
        on_path: HashSet::from([start]),
    });

    let mut visits = 0usize;
    while let Some(item) = queue.pop_front() {
        visits += 1;
        if let Some(limit) = max_visits {
            if visits > limit {
                tracing::debug!(limit, paths = recorder.paths, "path analysis hit visit limit");
                return Err(limit);
            }
        }

        if story.is_ending(item.id) {
            recorder.record(item.id, item.depth);
            continue;
        }

        // Unknown ids are skipped so unvalidated stories can still be measured.
        let Some(node) = story.node(item.id) else {
            continue;
        };

        for target in node.targets() {
            if target.is_empty() || item.on_path.contains(target) {
                continue;
            }
            let mut on_path = item.on_path.clone();
            on_path.insert(target);
            queue.push_back(WorkItem {
                id: target,
                depth: item.depth + 1,
                on_path,
            });
        }
    }

    tracing::debug!(visits, paths = recorder.paths, "path analysis finished");
    Ok(())
}
