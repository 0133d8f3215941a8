// src/resolve/index.rs

//! Reference index: the inverse of `depends` for every node.

use std::collections::{BTreeSet, HashMap};

use crate::resolve::node::Node;
use crate::types::NodeId;

/// A node plus the ids of the nodes that list it in their `depends`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedNode {
    pub node: Node,
    pub referenced_by: BTreeSet<NodeId>,
}

impl ExtendedNode {
    pub fn id(&self) -> &str {
        &self.node.id
    }

    pub fn after(&self) -> Option<&str> {
        self.node.after.as_deref()
    }
}

/// Arena of extended nodes, kept in id order, with id -> slot lookup.
///
/// Built once per resolution; the input nodes are cloned, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    nodes: Vec<ExtendedNode>,
    slots: HashMap<NodeId, usize>,
}

impl ReferenceIndex {
    /// Build the index over an already normalized node set.
    pub fn build(nodes: &[Node]) -> Self {
        let mut sorted: Vec<ExtendedNode> = nodes
            .iter()
            .map(|n| ExtendedNode {
                node: n.clone(),
                referenced_by: BTreeSet::new(),
            })
            .collect();
        sorted.sort_by(|a, b| a.node.id.cmp(&b.node.id));

        let slots: HashMap<NodeId, usize> = sorted
            .iter()
            .enumerate()
            .map(|(i, n)| (n.node.id.clone(), i))
            .collect();

        // Second pass: for every `depends` edge X -> dep, record X on dep.
        let edges: Vec<(usize, NodeId)> = sorted
            .iter()
            .flat_map(|n| {
                n.node
                    .depends
                    .iter()
                    .filter_map(|dep| slots.get(dep).map(|&slot| (slot, n.node.id.clone())))
                    .collect::<Vec<_>>()
            })
            .collect();
        for (slot, referrer) in edges {
            sorted[slot].referenced_by.insert(referrer);
        }

        Self {
            nodes: sorted,
            slots,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ExtendedNode> {
        self.slots.get(id).map(|&slot| &self.nodes[slot])
    }

    /// All nodes, in id order.
    pub fn nodes(&self) -> &[ExtendedNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Convenience wrapper returning the extended nodes directly.
pub fn build_index(nodes: &[Node]) -> Vec<ExtendedNode> {
    ReferenceIndex::build(nodes).nodes
}
