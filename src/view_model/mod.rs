//! Pure transformations from engine results to renderable node/edge models.
//!
//! Nothing here knows about the terminal. Markers such as the non-normal
//! world `*` live in [`NodeMeta`] and are only turned into text when drawn.

pub mod execution_log;
pub mod graph;
pub mod highlight;
pub mod proof_tree;

pub use highlight::{HighlightColor, HighlightEngine, Selection};

use crate::engine::NodeId;

/// Structured per-node data, kept next to the display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeMeta {
    Proof {
        is_contradictory: bool,
        spawner: Option<NodeId>,
        contrarian: Option<NodeId>,
        /// Distance from the root; a layout hint only.
        depth: usize,
    },
    World {
        possible_world: i64,
        is_normal_world: bool,
        /// World number hidden for logics without possible worlds.
        suppress_label: bool,
    },
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderNode {
    pub id: NodeId,
    pub display_text: String,
    pub meta: NodeMeta,
}

impl RenderNode {
    pub const fn depth(&self) -> usize {
        match self.meta {
            NodeMeta::Proof { depth, .. } => depth,
            _ => 0,
        }
    }

    /// Text as drawn, with structural markers applied.
    pub fn label(&self) -> String {
        match &self.meta {
            NodeMeta::Proof {
                is_contradictory: true,
                ..
            } => format!("{} ✗", self.display_text),
            NodeMeta::World {
                possible_world,
                is_normal_world,
                suppress_label: false,
            } => {
                let marker = if *is_normal_world { "" } else { "*" };
                if self.display_text.is_empty() {
                    format!("{possible_world}{marker}")
                } else {
                    format!("{possible_world}{marker}\n{}", self.display_text)
                }
            }
            _ => self.display_text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub label: String,
}

/// Nodes and edges handed to a drawing surface. Replaced wholesale on every
/// new result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderModel {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
}

impl RenderModel {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Targets of the edges leaving `id`, in edge order.
    pub fn successors<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a RenderEdge> {
        self.edges.iter().filter(move |edge| edge.source == *id)
    }
}
