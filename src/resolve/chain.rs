// src/resolve/chain.rs

//! Chain builder.
//!
//! A chain is a run of nodes that executes back to back because each node
//! prefers to follow the one before it. Nodes are folded in one at a time:
//! first they try to attach to an existing chain (head or tail extension),
//! then the touched chain is merged with others for as long as a merge
//! applies. Every merge removes one chain, so the loop terminates.
//!
//! Chain building never fails. A preference cycle simply leaves the chains
//! fragmented and the path enumerator reports it.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::resolve::index::{ExtendedNode, ReferenceIndex};
use crate::types::NodeId;

/// Ordered, non-empty run of nodes.
///
/// Derived sets are cached as unions over the children so that merges do
/// not need to go back to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    ids: Vec<NodeId>,
    members: BTreeSet<NodeId>,
    /// Union of every child's `depends`, internal ids included.
    depends: BTreeSet<NodeId>,
    /// Union of every child's `referenced_by`, internal ids included.
    referenced_by: BTreeSet<NodeId>,
    /// The id the first child prefers to follow, if any.
    head: Option<NodeId>,
}

impl Chain {
    pub fn singleton(node: &ExtendedNode) -> Self {
        Self {
            ids: vec![node.node.id.clone()],
            members: BTreeSet::from([node.node.id.clone()]),
            depends: node.node.depends.iter().cloned().collect(),
            referenced_by: node.referenced_by.clone(),
            head: node.node.after.clone(),
        }
    }

    /// Execution order within the chain.
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    /// Node this chain is waiting to be preceded by.
    pub fn head(&self) -> Option<&str> {
        self.head.as_deref()
    }

    /// Most recently appended node.
    pub fn tail(&self) -> &str {
        // Chains are never empty.
        self.ids.last().map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Dependencies of any child that live outside the chain.
    ///
    /// This includes the first child's `after` when its preferred
    /// predecessor sits in another chain.
    pub fn external_dependencies(&self) -> BTreeSet<&str> {
        self.depends
            .iter()
            .map(String::as_str)
            .filter(|d| !self.members.contains(*d))
            .collect()
    }

    /// Nodes outside the chain that depend on one of its children.
    pub fn referenced_by(&self) -> BTreeSet<&str> {
        self.referenced_by
            .iter()
            .map(String::as_str)
            .filter(|r| !self.members.contains(*r))
            .collect()
    }

    /// `front` followed by `back`, as one chain.
    fn splice(mut front: Chain, back: Chain) -> Chain {
        front.ids.extend(back.ids);
        front.members.extend(back.members);
        front.depends.extend(back.depends);
        front.referenced_by.extend(back.referenced_by);
        front
    }
}

/// `back` wants to follow `front` directly and no child of `front` depends
/// on a child of `back`.
fn linked(front: &Chain, back: &Chain) -> bool {
    back.head() == Some(front.tail()) && front.depends.is_disjoint(&back.members)
}

/// Head extension lifted to chains: `front` is pulled in before `back`.
///
/// Only allowed when nothing outside `back` needs `front`, and `front`
/// does not bring in dependencies `back` would not wait for anyway.
fn can_prepend(front: &Chain, back: &Chain) -> bool {
    if !linked(front, back) {
        return false;
    }

    let only_referenced_by_back = front
        .referenced_by()
        .iter()
        .all(|r| back.contains(r));
    if !only_referenced_by_back {
        return false;
    }

    let back_external = back.external_dependencies();
    let mut front_external = front.external_dependencies();
    if let Some(head) = front.head() {
        front_external.remove(head);
    }

    back_external.is_empty() || front_external.is_subset(&back_external)
}

/// Tail extension lifted to chains: `back` is appended to `front`.
///
/// `back` must not need anything `front` has not already waited for.
fn can_append(front: &Chain, back: &Chain) -> bool {
    if !linked(front, back) {
        return false;
    }

    let front_external = front.external_dependencies();
    back.external_dependencies()
        .iter()
        .all(|d| front.contains(d) || front_external.contains(d))
}

fn can_merge(front: &Chain, back: &Chain) -> bool {
    can_prepend(front, back) || can_append(front, back)
}

/// Partition the indexed nodes into chains.
///
/// Nodes are folded in id order and chains keep their creation order, so
/// the partition only depends on the node set, not on the input ordering.
pub fn build_chains(index: &ReferenceIndex) -> Vec<Chain> {
    let mut chains: Vec<Chain> = Vec::new();

    for node in index.nodes() {
        let touched = insert_node(&mut chains, node);
        merge_chains(&mut chains, touched);
    }

    debug!(
        nodes = index.len(),
        chains = chains.len(),
        "chain building complete"
    );
    for chain in &chains {
        trace!(ids = ?chain.ids(), head = ?chain.head(), "chain");
    }

    chains
}

/// Attach `node` to an existing chain if possible, otherwise start a new
/// one. Returns the index of the chain that now holds the node.
fn insert_node(chains: &mut Vec<Chain>, node: &ExtendedNode) -> usize {
    let single = Chain::singleton(node);

    for i in 0..chains.len() {
        if chains[i].head() == Some(node.id()) && can_prepend(&single, &chains[i]) {
            trace!(node = %node.id(), chain = ?chains[i].ids(), "head extension");
            let back = chains.remove(i);
            chains.insert(i, Chain::splice(single, back));
            return i;
        }

        if node.after() == Some(chains[i].tail()) && can_append(&chains[i], &single) {
            trace!(node = %node.id(), chain = ?chains[i].ids(), "tail extension");
            let front = chains.remove(i);
            chains.insert(i, Chain::splice(front, single));
            return i;
        }
    }

    trace!(node = %node.id(), head = ?node.after(), "new chain");
    chains.push(single);
    chains.len() - 1
}

/// Merge the chain at `touched` with others until no merge applies.
fn merge_chains(chains: &mut Vec<Chain>, mut touched: usize) {
    loop {
        let pair = chains.iter().enumerate().find_map(|(i, other)| {
            if i == touched {
                None
            } else if can_merge(&chains[touched], other) {
                Some((touched, i))
            } else if can_merge(other, &chains[touched]) {
                Some((i, touched))
            } else {
                None
            }
        });

        let Some((front_at, back_at)) = pair else {
            return;
        };

        let keep_at = front_at.min(back_at);
        let (front, back) = if front_at > back_at {
            let front = chains.remove(front_at);
            let back = chains.remove(back_at);
            (front, back)
        } else {
            let back = chains.remove(back_at);
            let front = chains.remove(front_at);
            (front, back)
        };

        debug!(front = ?front.ids(), back = ?back.ids(), "merging chains");
        chains.insert(keep_at, Chain::splice(front, back));
        touched = keep_at;
    }
}
