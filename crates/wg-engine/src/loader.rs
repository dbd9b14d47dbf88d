//! Story loading from YAML resources.
//!
//! A story file has a `title`, a `start` node id, a `story` mapping of node
//! id to `{ text, choices: [{ text, next }] }`, and an `endings` mapping of
//! ending id to either `{ name, text }` or a bare text string. Mapping order
//! is authoring order and is preserved.
//!
//! Loading does not check that choices resolve; run
//! [`wg_core::validate`] on the result before starting a session.

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use wg_core::{Ending, Node, Story};

use crate::error::LoadError;

#[derive(Debug, Deserialize)]
struct RawStory {
    title: Option<String>,
    start: Option<Value>,
    story: Option<Mapping>,
    endings: Option<Mapping>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNode {
    #[serde(default)]
    text: String,
    #[serde(default)]
    choices: Vec<RawChoice>,
}

#[derive(Debug, Deserialize)]
struct RawChoice {
    #[serde(default)]
    text: String,
    #[serde(default)]
    next: Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEnding {
    Text(String),
    Full {
        name: Option<String>,
        #[serde(default)]
        text: String,
    },
}

/// Load a story from a YAML file.
///
/// The title falls back to the name of the folder holding the file.
pub fn load_story(path: &Path) -> Result<Story, LoadError> {
    let source = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let fallback = path
        .parent()
        .and_then(|p| p.file_name())
        .or_else(|| path.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let story = parse_at(&source, &fallback, path)?;
    tracing::info!(
        path = %path.display(),
        nodes = story.node_count(),
        endings = story.ending_count(),
        "story loaded"
    );
    Ok(story)
}

/// Parse a story from YAML source text.
pub fn parse_story(source: &str, fallback_title: &str) -> Result<Story, LoadError> {
    parse_at(source, fallback_title, Path::new("<inline>"))
}

fn parse_at(source: &str, fallback_title: &str, path: &Path) -> Result<Story, LoadError> {
    let parse_error = |message: String| LoadError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let raw: RawStory = serde_yaml::from_str(source).map_err(|e| parse_error(e.to_string()))?;

    let start = match &raw.start {
        Some(value) => id_string(value)
            .ok_or_else(|| parse_error("`start` must be a node id".to_string()))?,
        None => return Err(parse_error("missing `start`".to_string())),
    };
    let title = raw.title.unwrap_or_else(|| fallback_title.to_string());

    let mut story = Story::new(title, start);

    for (key, value) in raw.story.unwrap_or_default() {
        let id = id_string(&key).ok_or_else(|| parse_error(format!("invalid node id {key:?}")))?;
        let raw_node: RawNode = match value {
            Value::Null => RawNode::default(),
            other => serde_yaml::from_value(other)
                .map_err(|e| parse_error(format!("node `{id}`: {e}")))?,
        };

        let mut node = Node::new(id.as_str(), raw_node.text);
        for choice in raw_node.choices {
            // A missing target loads as empty and is reported by validation.
            let target = match &choice.next {
                Value::Null => String::new(),
                next => id_string(next).ok_or_else(|| {
                    parse_error(format!("node `{id}`: choice `next` must be an id"))
                })?,
            };
            node = node.with_choice(choice.text, target);
        }
        story.add_node(node);
    }

    for (key, value) in raw.endings.unwrap_or_default() {
        let id =
            id_string(&key).ok_or_else(|| parse_error(format!("invalid ending id {key:?}")))?;
        let raw_ending: RawEnding = match value {
            Value::Null => RawEnding::Text(String::new()),
            other => serde_yaml::from_value(other)
                .map_err(|e| parse_error(format!("ending `{id}`: {e}")))?,
        };

        let ending = match raw_ending {
            RawEnding::Text(text) => Ending::new(id.as_str(), default_ending_name(&id), text),
            RawEnding::Full { name, text } => {
                let name = name.unwrap_or_else(|| default_ending_name(&id));
                Ending::new(id.as_str(), name, text)
            }
        };
        story.add_ending(ending);
    }

    if !story.is_node(&story.start) {
        return Err(LoadError::InvalidStart { start: story.start });
    }

    Ok(story)
}

fn default_ending_name(id: &str) -> String {
    format!("Ending {id}")
}

/// Ids may be written as strings, numbers or booleans in YAML.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CAVE: &str = r#"
title: The Cave
start: entrance
story:
  entrance:
    text: You stand before a cave.
    choices:
      - text: Go in
        next: tunnel
      - text: Walk away
        next: fled
  tunnel:
    text: Water drips somewhere.
    choices:
      - text: Deeper
        next: eaten
endings:
  eaten:
    name: Eaten by a grue
    text: It was dark.
  fled: You ran home.
"#;

    #[test]
    fn parses_full_story() {
        let story = parse_story(CAVE, "cave").unwrap();
        assert_eq!(story.title, "The Cave");
        assert_eq!(story.start, "entrance");
        assert_eq!(story.node_count(), 2);

        let entrance = story.node("entrance").unwrap();
        assert_eq!(entrance.text, "You stand before a cave.");
        assert_eq!(entrance.choices.len(), 2);
        assert_eq!(entrance.choices[0].label, "Go in");
        assert_eq!(entrance.choices[0].target, "tunnel");
        assert_eq!(entrance.choices[1].target, "fled");
    }

    #[test]
    fn endings_support_both_shapes_and_keep_order() {
        let story = parse_story(CAVE, "cave").unwrap();
        let ids: Vec<_> = story.endings().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["eaten", "fled"]);

        let eaten = story.ending("eaten").unwrap();
        assert_eq!(eaten.name, "Eaten by a grue");
        assert_eq!(eaten.text, "It was dark.");

        let fled = story.ending("fled").unwrap();
        assert_eq!(fled.name, "Ending fled");
        assert_eq!(fled.text, "You ran home.");
    }

    #[test]
    fn title_falls_back() {
        let story = parse_story("start: a\nstory:\n  a:\n    text: hi\n", "folder").unwrap();
        assert_eq!(story.title, "folder");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let source = "start: a\nstory:\n  a:\n  b:\n    text: only text\n";
        let story = parse_story(source, "x").unwrap();
        assert!(story.node("a").unwrap().text.is_empty());
        assert!(story.node("b").unwrap().choices.is_empty());
        assert_eq!(story.ending_count(), 0);
    }

    #[test]
    fn numeric_ids_become_strings() {
        let source = "start: 1\nstory:\n  1:\n    choices:\n      - text: go\n        next: 2\nendings:\n  2: Done.\n";
        let story = parse_story(source, "x").unwrap();
        assert_eq!(story.start, "1");
        assert_eq!(story.node("1").unwrap().choices[0].target, "2");
        assert!(story.is_ending("2"));
    }

    #[test]
    fn loader_does_not_check_targets() {
        let source = "start: a\nstory:\n  a:\n    choices:\n      - text: go\n        next: nowhere\n";
        let story = parse_story(source, "x").unwrap();
        assert_eq!(wg_core::validate(&story).len(), 1);
    }

    #[test]
    fn empty_ending_gets_default_name() {
        let source = "start: a\nstory:\n  a:\n    choices:\n      - text: go\n        next: end\nendings:\n  end:\n";
        let story = parse_story(source, "x").unwrap();
        let end = story.ending("end").unwrap();
        assert_eq!(end.name, "Ending end");
        assert!(end.text.is_empty());
        assert!(wg_core::validate(&story).is_empty());
    }

    #[test]
    fn choice_without_next_is_a_broken_edge() {
        let source = "start: a\nstory:\n  a:\n    choices:\n      - text: dead end\n      - text: also\n        next:\n";
        let story = parse_story(source, "x").unwrap();
        let broken = wg_core::validate(&story);
        assert_eq!(
            broken,
            vec![wg_core::BrokenEdge::new("a", ""), wg_core::BrokenEdge::new("a", "")]
        );
    }

    #[test]
    fn non_scalar_next_is_parse_error() {
        let source = "start: a\nstory:\n  a:\n    choices:\n      - text: go\n        next: [b, c]\n";
        assert!(matches!(parse_story(source, "x"), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = parse_story("start: [unclosed", "x").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        let err = parse_story("start: a\nstory:\n  a:\n    choices: 7\n", "x").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn missing_start_is_parse_error() {
        let err = parse_story("title: No start\n", "x").unwrap_err();
        match err {
            LoadError::Parse { message, .. } => assert!(message.contains("start")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn start_must_be_a_node() {
        let err = parse_story("start: end\nendings:\n  end: Over.\n", "x").unwrap_err();
        assert!(matches!(err, LoadError::InvalidStart { start } if start == "end"));

        let err = parse_story("start: ghost\nstory:\n  a:\n    text: A\n", "x").unwrap_err();
        assert!(matches!(err, LoadError::InvalidStart { .. }));
    }

    #[test]
    fn load_from_file_uses_folder_title() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join("caverns");
        std::fs::create_dir(&folder).unwrap();
        let path = folder.join("story.yaml");
        std::fs::write(&path, "start: a\nstory:\n  a:\n    text: A\n").unwrap();

        let story = load_story(&path).unwrap();
        assert_eq!(story.title, "caverns");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_story(&dir.path().join("story.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }
}
