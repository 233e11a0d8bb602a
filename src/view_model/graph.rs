//! Modality graph and countermodel → render models.

use super::{NodeMeta, RenderEdge, RenderModel, RenderNode};
use crate::{
    engine::{protocol::GraphVertex, Countermodel, Graph, NodeId},
    logic::should_suppress_world_labels,
};

/// Countermodel size used by the shuffle control when the current minimum is
/// anything but 3.
pub const SHUFFLE_SMALL: u32 = 3;
pub const SHUFFLE_LARGE: u32 = 4;

fn edges(vertices: &[GraphVertex]) -> Vec<RenderEdge> {
    vertices
        .iter()
        .map(|vertex| RenderEdge {
            source: vertex.from.clone(),
            target: vertex.to.clone(),
            label: vertex.tags.join(","),
        })
        .collect()
}

/// Logics without possible worlds get an empty model.
pub fn modality_graph_model(graph: &Graph, logic: &str) -> RenderModel {
    if should_suppress_world_labels(logic) {
        return RenderModel::default();
    }

    RenderModel {
        nodes: graph
            .nodes
            .iter()
            .map(|node| RenderNode {
                id: NodeId::Text(node.clone()),
                display_text: node.clone(),
                meta: NodeMeta::Plain,
            })
            .collect(),
        edges: edges(&graph.vertices),
    }
}

/// One node per world; the display text lists `atom : value` per atomic in
/// document order. Unknown values render as `null`.
pub fn countermodel_model(countermodel: &Countermodel, logic: &str) -> RenderModel {
    let suppress_label = should_suppress_world_labels(logic);

    RenderModel {
        nodes: countermodel
            .nodes
            .iter()
            .map(|node| {
                let atoms: Vec<String> = node
                    .atomics
                    .0
                    .iter()
                    .map(|(name, value)| match value {
                        Some(value) => format!("{name} : {value}"),
                        None => format!("{name} : null"),
                    })
                    .collect();
                RenderNode {
                    id: NodeId::Number(node.possible_world),
                    display_text: atoms.join("\n"),
                    meta: NodeMeta::World {
                        possible_world: node.possible_world,
                        is_normal_world: node.is_normal_world,
                        suppress_label,
                    },
                }
            })
            .collect(),
        edges: edges(&countermodel.vertices),
    }
}

/// The shuffle control only applies to countermodels searched independently
/// of the modality graph.
pub fn can_shuffle(countermodel: Option<&Countermodel>) -> bool {
    countermodel.is_some_and(|cm| !cm.was_built_from_modality_graph)
}

/// Alternates between the two shuffle sizes.
pub const fn next_shuffle_size(current_min: Option<u32>) -> u32 {
    match current_min {
        Some(SHUFFLE_SMALL) => SHUFFLE_LARGE,
        _ => SHUFFLE_SMALL,
    }
}
