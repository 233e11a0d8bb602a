//! Proof tree → flat render model.

use super::{NodeMeta, RenderEdge, RenderModel, RenderNode};
use crate::engine::ProofTreeNode;

/// Flatten a proof tree in pre-order (left, middle, right).
///
/// A tree of N nodes yields N nodes and N−1 parent→child edges. The traversal
/// keeps its own stack, so tree depth is bounded by memory, not the call
/// stack.
pub fn flatten(root: &ProofTreeNode) -> RenderModel {
    let mut model = RenderModel::default();
    let mut stack: Vec<(&ProofTreeNode, Option<&ProofTreeNode>, usize)> = vec![(root, None, 0)];

    while let Some((node, parent, depth)) = stack.pop() {
        if let Some(parent) = parent {
            model.edges.push(RenderEdge {
                source: parent.id.clone(),
                target: node.id.clone(),
                label: String::new(),
            });
        }

        model.nodes.push(RenderNode {
            id: node.id.clone(),
            display_text: node.formula.clone(),
            meta: NodeMeta::Proof {
                is_contradictory: node.is_contradictory,
                spawner: node.spawner_node_id.clone(),
                contrarian: node.contrarian_node_id.clone(),
                depth,
            },
        });

        let children: Vec<&ProofTreeNode> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push((child, Some(node), depth + 1));
        }
    }

    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NodeId;

    fn branch(id: i64, formula: &str, left: ProofTreeNode, right: ProofTreeNode) -> ProofTreeNode {
        ProofTreeNode {
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
            ..ProofTreeNode::leaf(id, formula)
        }
    }

    #[test]
    fn test_single_node() {
        let model = flatten(&ProofTreeNode::leaf(1, "¬q"));
        assert_eq!(model.nodes.len(), 1);
        assert!(model.edges.is_empty());
    }

    #[test]
    fn test_pre_order_left_middle_right() {
        let mut root = branch(
            1,
            "a",
            branch(2, "b", ProofTreeNode::leaf(3, "c"), ProofTreeNode::leaf(4, "d")),
            ProofTreeNode::leaf(6, "f"),
        );
        root.middle = Some(Box::new(ProofTreeNode::leaf(5, "e")));

        let model = flatten(&root);
        let order: Vec<&str> = model.nodes.iter().map(|n| n.display_text.as_str()).collect();
        assert_eq!(order, ["a", "b", "c", "d", "e", "f"]);
        assert_eq!(model.edges.len(), 5);

        let depths: Vec<usize> = model.nodes.iter().map(RenderNode::depth).collect();
        assert_eq!(depths, [0, 1, 2, 2, 1, 1]);
        assert!(model.edges.iter().all(|e| e.target != NodeId::Number(1)));
    }

    #[test]
    fn test_cross_links_are_copied_verbatim() {
        let mut leaf = ProofTreeNode::leaf(2, "p");
        leaf.is_contradictory = true;
        leaf.spawner_node_id = Some(NodeId::from("1"));
        leaf.contrarian_node_id = Some(NodeId::Number(99));
        let root = ProofTreeNode {
            left: Some(Box::new(leaf)),
            ..ProofTreeNode::leaf(1, "¬p")
        };

        let model = flatten(&root);
        assert_eq!(
            model.nodes[1].meta,
            NodeMeta::Proof {
                is_contradictory: true,
                spawner: Some(NodeId::from("1")),
                contrarian: Some(NodeId::Number(99)),
                depth: 1,
            }
        );
        assert_eq!(model.nodes[1].label(), "p ✗");
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut node = ProofTreeNode::leaf(0, "end");
        for id in 1..50_000 {
            node = ProofTreeNode {
                left: Some(Box::new(node)),
                ..ProofTreeNode::leaf(id, "step")
            };
        }

        let model = flatten(&node);
        assert_eq!(model.nodes.len(), 50_000);
        assert_eq!(model.edges.len(), 49_999);

        // Box drop is recursive; unwind the chain by hand.
        let mut next = node.left.take();
        while let Some(mut child) = next {
            next = child.left.take();
        }
    }
}
