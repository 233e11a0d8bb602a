//! Wire types exchanged with the solving engine.
//!
//! Field names follow the engine's JSON exactly; nothing here is renamed.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Sentinel id for problems composed in the form.
pub const USER_PROBLEM_ID: &str = "UserInput";
/// Sentinel id for the problem shown before anything is submitted.
pub const INITIAL_PROBLEM_ID: &str = "Initial";

/// A logic-inference request: logic choice, premises, conclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub expected: String,
    pub logic: String,
    /// Order is proof construction order.
    pub premises: Vec<String>,
    pub conclusion: String,
}

impl Problem {
    pub fn user_input(logic: String, premises: Vec<String>, conclusion: String) -> Self {
        Self {
            id: USER_PROBLEM_ID.to_string(),
            expected: String::new(),
            logic,
            premises,
            conclusion,
        }
    }

    pub fn initial(logic: String) -> Self {
        Self {
            id: INITIAL_PROBLEM_ID.to_string(),
            logic,
            ..Self::default()
        }
    }
}

/// Node identifier as sent by the engine: a JSON number or a string.
///
/// Two ids are equal when they denote the same integer, whatever their
/// representation; non-numeric ids compare as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Number(i64),
    Text(String),
}

impl NodeId {
    pub fn numeric(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl PartialEq for NodeId {
    fn eq(&self, other: &Self) -> bool {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.to_string() == other.to_string(),
            _ => false,
        }
    }
}

impl Eq for NodeId {}

impl Hash for NodeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.numeric() {
            Some(n) => n.hash(state),
            None => self.to_string().hash(state),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One rule application in the proof tree. At most three children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofTreeNode {
    pub id: NodeId,
    pub formula: String,
    #[serde(default)]
    pub is_contradictory: bool,
    #[serde(default)]
    pub spawner_node_id: Option<NodeId>,
    #[serde(default)]
    pub contrarian_node_id: Option<NodeId>,
    #[serde(default)]
    pub left: Option<Box<ProofTreeNode>>,
    #[serde(default)]
    pub middle: Option<Box<ProofTreeNode>>,
    #[serde(default)]
    pub right: Option<Box<ProofTreeNode>>,
}

impl ProofTreeNode {
    pub fn leaf(id: impl Into<NodeId>, formula: &str) -> Self {
        Self {
            id: id.into(),
            formula: formula.to_string(),
            is_contradictory: false,
            spawner_node_id: None,
            contrarian_node_id: None,
            left: None,
            middle: None,
            right: None,
        }
    }

    /// Children in left, middle, right order.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        [&self.left, &self.middle, &self.right]
            .into_iter()
            .filter_map(|child| child.as_deref())
    }
}

/// Directed, tagged edge between two graph nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphVertex {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Labeled directed multigraph over opaque node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub vertices: Vec<GraphVertex>,
}

/// Atomic valuations of one world, in document order.
///
/// A `None` value means the engine left the atom undetermined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Atomics(pub Vec<(String, Option<bool>)>);

impl Serialize for Atomics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, value)| (name, value)))
    }
}

impl<'de> Deserialize<'de> for Atomics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AtomicsVisitor)
    }
}

struct AtomicsVisitor;

impl<'de> Visitor<'de> for AtomicsVisitor {
    type Value = Atomics;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of atomic names to truth values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, value)) = map.next_entry::<String, Option<bool>>()? {
            entries.push((name, value));
        }
        Ok(Atomics(entries))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountermodelNode {
    pub possible_world: i64,
    pub is_normal_world: bool,
    #[serde(default)]
    pub atomics: Atomics,
}

/// Relational structure witnessing that the conclusion does not follow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countermodel {
    #[serde(default)]
    pub was_built_from_modality_graph: bool,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub nodes: Vec<CountermodelNode>,
    #[serde(default)]
    pub vertices: Vec<GraphVertex>,
}

/// Everything one solve call returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofResult {
    pub root_node: ProofTreeNode,
    pub was_proved: bool,
    #[serde(default)]
    pub has_timeout: bool,
    pub problem: Problem,
    #[serde(default)]
    pub modality_graph: Graph,
    #[serde(default)]
    pub countermodel: Option<Countermodel>,
    #[serde(default)]
    pub execution_log: Vec<String>,
}

impl ProofResult {
    pub const fn status(&self) -> ProofStatus {
        if self.has_timeout {
            ProofStatus::Timeout
        } else if self.was_proved {
            ProofStatus::Proved
        } else {
            ProofStatus::Disproved
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofStatus {
    Proved,
    Disproved,
    Timeout,
}

impl ProofStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Proved => "PROVED!",
            Self::Disproved => "DISPROVED!",
            Self::Timeout => "TIMEOUT!",
        }
    }
}

/// Countermodel size controls forwarded to the engine with a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountermodelOptions {
    pub min_nodes: Option<u32>,
    pub max_nodes: Option<u32>,
    pub shuffle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveRequest {
    pub problem: Problem,
    pub countermodel: CountermodelOptions,
}
