//! Configuration for the story engine.

use std::path::PathBuf;

use wg_core::PathLimits;

/// Default visit bound for path analysis.
pub const DEFAULT_MAX_PATH_VISITS: usize = 1_000_000;

/// Configuration for a story library and the sessions opened from it.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Root directory holding one folder per story.
    pub stories_dir: PathBuf,
    /// Story file name inside each story folder.
    pub story_file: String,
    /// Unlock record file name inside each story folder.
    pub unlock_file: String,
    /// Marker shown instead of a locked ending's name and text.
    pub locked_marker: String,
    /// Visit bound for path analysis. `None` means unbounded.
    pub max_path_visits: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stories_dir: PathBuf::from("stories"),
            story_file: "story.yaml".to_string(),
            unlock_file: "unlocked.dat".to_string(),
            locked_marker: "???".to_string(),
            max_path_visits: Some(DEFAULT_MAX_PATH_VISITS),
        }
    }
}

impl EngineConfig {
    /// Set the library root.
    pub fn with_stories_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stories_dir = dir.into();
        self
    }

    /// Set the story file name.
    pub fn with_story_file(mut self, name: impl Into<String>) -> Self {
        self.story_file = name.into();
        self
    }

    /// Set the unlock record file name.
    pub fn with_unlock_file(mut self, name: impl Into<String>) -> Self {
        self.unlock_file = name.into();
        self
    }

    /// Set the locked-ending marker.
    pub fn with_locked_marker(mut self, marker: impl Into<String>) -> Self {
        self.locked_marker = marker.into();
        self
    }

    /// Set the path analysis visit bound.
    pub fn with_max_path_visits(mut self, max: Option<usize>) -> Self {
        self.max_path_visits = max;
        self
    }

    /// Path analysis limits derived from this configuration.
    pub fn path_limits(&self) -> PathLimits {
        PathLimits {
            max_visits: self.max_path_visits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.stories_dir, PathBuf::from("stories"));
        assert_eq!(cfg.story_file, "story.yaml");
        assert_eq!(cfg.unlock_file, "unlocked.dat");
        assert_eq!(cfg.locked_marker, "???");
        assert_eq!(cfg.max_path_visits, Some(DEFAULT_MAX_PATH_VISITS));
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_stories_dir("/tmp/tales")
            .with_story_file("tale.yml")
            .with_unlock_file("progress")
            .with_locked_marker("[locked]")
            .with_max_path_visits(None);
        assert_eq!(cfg.stories_dir, PathBuf::from("/tmp/tales"));
        assert_eq!(cfg.story_file, "tale.yml");
        assert_eq!(cfg.unlock_file, "progress");
        assert_eq!(cfg.locked_marker, "[locked]");
        assert_eq!(cfg.path_limits(), PathLimits::unbounded());
    }
}
