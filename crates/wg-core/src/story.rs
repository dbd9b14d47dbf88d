use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A labelled edge from a node to another node or to an ending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The text shown to the player.
    pub label: String,
    /// Id of the node or ending this choice leads to.
    pub target: String,
}

impl Choice {
    /// Create a new choice leading to `target`.
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// A narrative unit with body text and outgoing choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id within the story.
    pub id: String,
    /// Body text.
    pub text: String,
    /// Outgoing choices in authoring order.
    pub choices: Vec<Choice>,
}

impl Node {
    /// Create a node without choices.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, label: impl Into<String>, target: impl Into<String>) -> Self {
        self.choices.push(Choice::new(label, target));
        self
    }

    /// Iterate over the target ids of this node's choices.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|c| c.target.as_str())
    }
}

/// A terminal narrative unit, eligible for unlock tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ending {
    /// Unique id within the story.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Closing text.
    pub text: String,
}

impl Ending {
    /// Create a new ending.
    pub fn new(id: impl Into<String>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
        }
    }
}

/// What an id resolves to inside a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'s> {
    /// The id names a node.
    Node(&'s Node),
    /// The id names an ending.
    Ending(&'s Ending),
}

/// A branching story: nodes, endings and the node play starts from.
///
/// Nodes and endings keep their authoring order; ending ordinals shown to the
/// player are positions in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    /// Story title.
    pub title: String,
    /// Id of the node play starts from.
    pub start: String,
    nodes: Vec<Node>,
    endings: Vec<Ending>,

    // Indexes
    node_index: HashMap<String, usize>,
    ending_index: HashMap<String, usize>,
}

impl Story {
    /// Create an empty story.
    pub fn new(title: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start: start.into(),
            nodes: Vec::new(),
            endings: Vec::new(),
            node_index: HashMap::new(),
            ending_index: HashMap::new(),
        }
    }

    /// Add a node, replacing any node with the same id in place.
    pub fn add_node(&mut self, node: Node) {
        match self.node_index.get(&node.id) {
            Some(&idx) => self.nodes[idx] = node,
            None => {
                self.node_index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Add an ending, replacing any ending with the same id in place.
    pub fn add_ending(&mut self, ending: Ending) {
        match self.ending_index.get(&ending.id) {
            Some(&idx) => self.endings[idx] = ending,
            None => {
                self.ending_index
                    .insert(ending.id.clone(), self.endings.len());
                self.endings.push(ending);
            }
        }
    }

    /// Builder form of [`Story::add_node`].
    pub fn with_node(mut self, node: Node) -> Self {
        self.add_node(node);
        self
    }

    /// Builder form of [`Story::add_ending`].
    pub fn with_ending(mut self, ending: Ending) -> Self {
        self.add_ending(ending);
        self
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Look up an ending by id.
    pub fn ending(&self, id: &str) -> Option<&Ending> {
        self.ending_index.get(id).map(|&idx| &self.endings[idx])
    }

    /// 1-based position of an ending in authoring order.
    pub fn ending_ordinal(&self, id: &str) -> Option<usize> {
        self.ending_index.get(id).map(|idx| idx + 1)
    }

    /// Resolve an id, checking endings before nodes.
    pub fn resolve(&self, id: &str) -> Option<Target<'_>> {
        self.ending(id)
            .map(Target::Ending)
            .or_else(|| self.node(id).map(Target::Node))
    }

    /// Whether `id` names a node.
    pub fn is_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Whether `id` names an ending.
    pub fn is_ending(&self, id: &str) -> bool {
        self.ending_index.contains_key(id)
    }

    /// The start node, if `start` names a node.
    pub fn start_node(&self) -> Option<&Node> {
        self.node(&self.start)
    }

    /// All nodes in authoring order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All endings in authoring order.
    pub fn endings(&self) -> &[Ending] {
        &self.endings
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of endings.
    pub fn ending_count(&self) -> usize {
        self.endings.len()
    }

    /// Total number of choices across all nodes.
    pub fn choice_count(&self) -> usize {
        self.nodes.iter().map(|n| n.choices.len()).sum()
    }
}
