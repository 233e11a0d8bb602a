//! Hover-preview and pinned selection over a proof tree render model.
//!
//! Selecting a node N colors N itself, the node that contradicts it, the
//! node that spawned it and every other node spawned by the same spawner.
//! Cross-links are resolved through an id → index table built once per
//! model; ids compare by numeric value.

use std::collections::HashMap;

use super::{NodeMeta, RenderModel};
use crate::engine::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Neutral,
    HoverPreview(NodeId),
    Pinned(NodeId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HighlightColor {
    #[default]
    Neutral,
    Selected,
    Contradicted,
    Origin,
    Sibling,
}

#[derive(Debug, Clone)]
struct Links {
    spawner: Option<NodeId>,
    contrarian: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct HighlightEngine {
    ids: Vec<NodeId>,
    links: Vec<Links>,
    index: HashMap<NodeId, usize>,
    colors: Vec<HighlightColor>,
    selection: Selection,
}

impl Default for HighlightEngine {
    fn default() -> Self {
        Self::new(&RenderModel::default())
    }
}

impl HighlightEngine {
    pub fn new(model: &RenderModel) -> Self {
        let mut ids = Vec::with_capacity(model.nodes.len());
        let mut links = Vec::with_capacity(model.nodes.len());
        let mut index = HashMap::with_capacity(model.nodes.len());

        for (i, node) in model.nodes.iter().enumerate() {
            let (spawner, contrarian) = match &node.meta {
                NodeMeta::Proof {
                    spawner,
                    contrarian,
                    ..
                } => (spawner.clone(), contrarian.clone()),
                _ => (None, None),
            };
            index.entry(node.id.clone()).or_insert(i);
            ids.push(node.id.clone());
            links.push(Links {
                spawner,
                contrarian,
            });
        }

        Self {
            colors: vec![HighlightColor::Neutral; ids.len()],
            ids,
            links,
            index,
            selection: Selection::Neutral,
        }
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn is_pinned(&self) -> bool {
        matches!(self.selection, Selection::Pinned(_))
    }

    /// Color of the node at `index` in model order.
    pub fn color_at(&self, index: usize) -> HighlightColor {
        self.colors.get(index).copied().unwrap_or_default()
    }

    pub fn color_of(&self, id: &NodeId) -> HighlightColor {
        self.index
            .get(id)
            .map_or(HighlightColor::Neutral, |&i| self.colors[i])
    }

    /// Index in model order of the selected or previewed node.
    pub fn focused_index(&self) -> Option<usize> {
        match &self.selection {
            Selection::Neutral => None,
            Selection::HoverPreview(id) | Selection::Pinned(id) => self.index.get(id).copied(),
        }
    }

    pub fn pointer_enter(&mut self, id: &NodeId) {
        if self.is_pinned() {
            return;
        }
        self.apply(id);
        self.selection = Selection::HoverPreview(id.clone());
    }

    pub fn pointer_leave(&mut self) {
        if self.is_pinned() {
            return;
        }
        self.reset();
        self.selection = Selection::Neutral;
    }

    /// Pin `id`. Hover stays disabled until the canvas is tapped.
    pub fn tap_node(&mut self, id: &NodeId) {
        self.apply(id);
        self.selection = Selection::Pinned(id.clone());
    }

    pub fn tap_canvas(&mut self) {
        self.reset();
        self.selection = Selection::Neutral;
    }

    fn reset(&mut self) {
        self.colors.fill(HighlightColor::Neutral);
    }

    fn apply(&mut self, id: &NodeId) {
        self.reset();
        let Some(&selected) = self.index.get(id) else {
            return;
        };

        self.colors[selected] = HighlightColor::Selected;
        let Links {
            spawner,
            contrarian,
        } = self.links[selected].clone();

        if let Some(&i) = contrarian.as_ref().and_then(|c| self.index.get(c)) {
            self.colors[i] = HighlightColor::Contradicted;
        }

        let Some(spawner) = spawner else {
            return;
        };
        if let Some(&i) = self.index.get(&spawner) {
            self.colors[i] = HighlightColor::Origin;
        }
        for i in 0..self.ids.len() {
            if i != selected && self.links[i].spawner.as_ref() == Some(&spawner) {
                self.colors[i] = HighlightColor::Sibling;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_model::RenderNode;

    fn node(id: &str, spawner: Option<&str>, contrarian: Option<&str>) -> RenderNode {
        RenderNode {
            id: NodeId::from(id),
            display_text: id.to_string(),
            meta: NodeMeta::Proof {
                is_contradictory: false,
                spawner: spawner.map(NodeId::from),
                contrarian: contrarian.map(NodeId::from),
                depth: 0,
            },
        }
    }

    /// S spawned A and C; B contradicts A; D is unrelated.
    fn engine() -> HighlightEngine {
        HighlightEngine::new(&RenderModel {
            nodes: vec![
                node("S", None, None),
                node("A", Some("S"), Some("B")),
                node("B", None, None),
                node("C", Some("S"), None),
                node("D", None, None),
            ],
            edges: vec![],
        })
    }

    fn colors(engine: &HighlightEngine) -> Vec<HighlightColor> {
        (0..5).map(|i| engine.color_at(i)).collect()
    }

    #[test]
    fn test_exact_highlight_set() {
        use HighlightColor as H;
        let mut engine = engine();
        engine.tap_node(&NodeId::from("A"));
        assert_eq!(
            colors(&engine),
            [H::Origin, H::Selected, H::Contradicted, H::Sibling, H::Neutral]
        );
    }

    #[test]
    fn test_no_residue_after_selecting_unrelated_node() {
        use HighlightColor as H;
        let mut engine = engine();
        engine.tap_node(&NodeId::from("A"));
        engine.tap_node(&NodeId::from("D"));
        assert_eq!(
            colors(&engine),
            [H::Neutral, H::Neutral, H::Neutral, H::Neutral, H::Selected]
        );
    }

    #[test]
    fn test_pinned_selection_ignores_hover() {
        let mut engine = engine();
        engine.tap_node(&NodeId::from("A"));
        engine.pointer_enter(&NodeId::from("D"));
        engine.pointer_leave();

        assert_eq!(engine.selection(), &Selection::Pinned(NodeId::from("A")));
        assert_eq!(engine.color_of(&NodeId::from("A")), HighlightColor::Selected);
    }

    #[test]
    fn test_tap_canvas_clears_and_reenables_hover() {
        let mut engine = engine();
        engine.tap_node(&NodeId::from("A"));
        engine.tap_canvas();
        assert!(colors(&engine).iter().all(|c| *c == HighlightColor::Neutral));
        assert_eq!(engine.selection(), &Selection::Neutral);

        engine.pointer_enter(&NodeId::from("C"));
        assert_eq!(engine.selection(), &Selection::HoverPreview(NodeId::from("C")));
        assert_eq!(engine.color_of(&NodeId::from("A")), HighlightColor::Sibling);

        engine.pointer_leave();
        assert_eq!(engine.focused_index(), None);
        assert!(colors(&engine).iter().all(|c| *c == HighlightColor::Neutral));
    }

    #[test]
    fn test_links_match_numeric_and_string_ids() {
        let model = RenderModel {
            nodes: vec![
                RenderNode {
                    id: NodeId::Number(1),
                    display_text: String::new(),
                    meta: NodeMeta::Plain,
                },
                node("2", Some("1"), None),
            ],
            edges: vec![],
        };
        let mut engine = HighlightEngine::new(&model);
        engine.tap_node(&NodeId::Number(2));
        assert_eq!(engine.color_at(0), HighlightColor::Origin);
        assert_eq!(engine.color_at(1), HighlightColor::Selected);
    }

    #[test]
    fn test_dangling_links_are_ignored() {
        let mut engine = HighlightEngine::new(&RenderModel {
            nodes: vec![node("A", Some("gone"), Some("missing"))],
            edges: vec![],
        });
        engine.tap_node(&NodeId::from("A"));
        assert_eq!(engine.color_at(0), HighlightColor::Selected);

        engine.tap_node(&NodeId::from("unknown"));
        assert_eq!(engine.color_at(0), HighlightColor::Neutral);
    }
}
