// src/resolve/tree.rs

//! Preference tree: which nodes want to follow a given root, directly or
//! transitively, through their `after` links.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::resolve::node::Node;
use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: NodeId,
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceTree {
    pub root: TreeNode,
    /// Every id reached from the root, root included.
    pub fulfilled: BTreeSet<NodeId>,
    /// Dependencies of tree members that the tree itself does not provide.
    pub external: BTreeSet<NodeId>,
}

impl PreferenceTree {
    /// Walk `after` links forward from `root`.
    ///
    /// `nodes` should be normalized so that single dependencies already
    /// carry their implied `after`. Children are visited in id order and a
    /// node is only expanded once, so preference cycles terminate.
    pub fn build(nodes: &[Node], root: &str) -> Self {
        let mut followers: BTreeMap<&str, Vec<&Node>> = BTreeMap::new();
        for node in nodes {
            if let Some(ref after) = node.after {
                followers.entry(after.as_str()).or_default().push(node);
            }
        }
        for list in followers.values_mut() {
            list.sort_by(|a, b| a.id.cmp(&b.id));
        }

        let mut fulfilled = BTreeSet::new();
        let tree = expand(root, &followers, &mut fulfilled);

        let external = nodes
            .iter()
            .filter(|n| fulfilled.contains(&n.id))
            .flat_map(|n| n.depends.iter())
            .filter(|d| !fulfilled.contains(*d))
            .cloned()
            .collect();

        Self {
            root: tree,
            fulfilled,
            external,
        }
    }

    /// Render in the style of the `tree` utility, followed by the external
    /// dependencies and the ids the tree fulfils.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PreferenceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.root.id)?;
        render_children(&self.root.children, "", f)?;
        for ext in &self.external {
            writeln!(f, "{ext} (external)")?;
        }
        for id in &self.fulfilled {
            writeln!(f, "{id} (fulfilled)")?;
        }
        Ok(())
    }
}

fn expand(
    id: &str,
    followers: &BTreeMap<&str, Vec<&Node>>,
    visited: &mut BTreeSet<NodeId>,
) -> TreeNode {
    if !visited.insert(id.to_string()) {
        return TreeNode {
            id: id.to_string(),
            children: Vec::new(),
        };
    }

    let mut children = Vec::new();
    for follower in followers.get(id).into_iter().flatten() {
        if visited.contains(&follower.id) {
            continue;
        }
        children.push(expand(&follower.id, followers, visited));
    }

    TreeNode {
        id: id.to_string(),
        children,
    }
}

fn render_children(children: &[TreeNode], prefix: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (idx, child) in children.iter().enumerate() {
        let last = idx == children.len() - 1;
        let connector = if last { "└── " } else { "├── " };
        writeln!(f, "{prefix}{connector}{}", child.id)?;
        let extension = if last { "    " } else { "│   " };
        render_children(&child.children, &format!("{prefix}{extension}"), f)?;
    }
    Ok(())
}
