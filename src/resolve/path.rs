// src/resolve/path.rs

//! Resolution path enumeration.
//!
//! A path is an ordering of every chain such that each chain's external
//! dependencies are already placed when the chain itself is placed. The
//! enumerator is a depth-first search over eligible chains with an explicit
//! stack, yielding complete paths lazily in a canonical order (chains are
//! tried in their list order at every depth).

use std::collections::{BTreeSet, HashSet};

use crate::resolve::chain::Chain;
use crate::types::NodeId;

/// One candidate total order of chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPath<'a> {
    chains: Vec<&'a Chain>,
}

impl<'a> ResolutionPath<'a> {
    pub fn chains(&self) -> &[&'a Chain] {
        &self.chains
    }

    /// Flattened execution order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.chains
            .iter()
            .flat_map(|c| c.ids().iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

/// Lazy iterator over every valid [`ResolutionPath`].
///
/// Whether a partial placement can be completed depends only on the set of
/// chains placed so far, not on their order. Sets whose subtree produced no
/// complete path are remembered in `dead` and never entered again, so an
/// unsatisfiable chain list costs at most one visit per reachable set.
#[derive(Debug)]
pub struct ResolutionPaths<'a> {
    chains: &'a [Chain],
    external: Vec<BTreeSet<&'a str>>,
    used: Vec<bool>,
    placed: Vec<usize>,
    /// `frames[d]` is the next chain index to try at depth `d`.
    frames: Vec<usize>,
    /// `productive[d]` is set once a complete path was found below depth `d`.
    productive: Vec<bool>,
    dead: HashSet<Vec<bool>>,
    available: HashSet<&'a str>,
    done: bool,
}

impl<'a> ResolutionPaths<'a> {
    pub fn new(chains: &'a [Chain]) -> Self {
        Self {
            chains,
            external: chains.iter().map(Chain::external_dependencies).collect(),
            used: vec![false; chains.len()],
            placed: Vec::with_capacity(chains.len()),
            frames: vec![0],
            productive: vec![false],
            dead: HashSet::new(),
            available: HashSet::new(),
            done: false,
        }
    }

    fn eligible(&mut self, i: usize) -> bool {
        if self.used[i] || !self.external[i].iter().all(|d| self.available.contains(d)) {
            return false;
        }

        self.used[i] = true;
        let known_dead = self.dead.contains(&self.used);
        self.used[i] = false;
        !known_dead
    }

    fn place(&mut self, i: usize) {
        let chains = self.chains;
        self.used[i] = true;
        self.placed.push(i);
        self.available
            .extend(chains[i].ids().iter().map(String::as_str));
        self.frames.push(0);
        self.productive.push(false);
    }

    /// Drop the current depth and unplace the chain that led to it.
    /// Returns `false` once the search is exhausted.
    fn backtrack(&mut self) -> bool {
        self.frames.pop();
        let productive = self.productive.pop().unwrap_or(false);
        match self.placed.pop() {
            Some(i) => {
                if !productive {
                    self.dead.insert(self.used.clone());
                }
                self.used[i] = false;
                for id in self.chains[i].ids() {
                    self.available.remove(id.as_str());
                }
                true
            }
            None => {
                self.done = true;
                false
            }
        }
    }
}

impl<'a> Iterator for ResolutionPaths<'a> {
    type Item = ResolutionPath<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let depth = self.placed.len();

            if depth == self.chains.len() {
                let chains = self.chains;
                let path = ResolutionPath {
                    chains: self.placed.iter().map(|&i| &chains[i]).collect(),
                };
                self.productive.iter_mut().for_each(|p| *p = true);
                self.backtrack();
                return Some(path);
            }

            let mut next = None;
            for i in self.frames[depth]..self.chains.len() {
                if self.eligible(i) {
                    next = Some(i);
                    break;
                }
            }

            match next {
                Some(i) => {
                    self.frames[depth] = i + 1;
                    self.place(i);
                }
                // Dead end or exhausted at this depth.
                None => {
                    if !self.backtrack() {
                        return None;
                    }
                }
            }
        }
        None
    }
}

/// Every ordering of `chains` that respects their external dependencies.
pub fn enumerate_paths(chains: &[Chain]) -> ResolutionPaths<'_> {
    ResolutionPaths::new(chains)
}
