// src/resolve/score.rs

//! Path scoring and selection.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::resolve::path::ResolutionPath;
use crate::types::{NodeId, ScorePolicy};

/// Comparable score of a resolution path; higher is better.
///
/// Fields compare in declaration order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathScore {
    /// Nodes whose `after` immediately precedes them in the flattened order.
    pub honored: usize,
    /// Weighted position of referenced chains: a chain that others depend
    /// on scores more the earlier it is placed.
    pub eagerness: usize,
}

/// Score a path under the given policy.
///
/// `Lexical` scores every path equally, leaving the choice to the
/// tie-break in [`select_best`].
pub fn score(path: &ResolutionPath<'_>, policy: ScorePolicy) -> PathScore {
    if policy == ScorePolicy::Lexical {
        return PathScore::default();
    }

    let chains = path.chains();
    let count = chains.len();

    // Inside a chain every node follows its `after` by construction.
    let within: usize = chains.iter().map(|c| c.len() - 1).sum();
    let across = chains
        .windows(2)
        .filter(|pair| pair[1].head() == Some(pair[0].tail()))
        .count();

    let eagerness = chains
        .iter()
        .enumerate()
        .map(|(pos, c)| (count - 1 - pos) * c.referenced_by().len())
        .sum();

    PathScore {
        honored: within + across,
        eagerness,
    }
}

/// Winner of a path selection, with search statistics.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub path: ResolutionPath<'a>,
    pub score: PathScore,
    pub order: Vec<NodeId>,
    /// Number of complete paths examined.
    pub considered: usize,
    /// Whether the search stopped at `max_paths` before being exhaustive.
    pub truncated: bool,
}

/// Pick the best path: maximum score, then the lexicographically smallest
/// flattened order. The result does not depend on enumeration order.
///
/// At most `max_paths` paths are pulled from `paths`. Returns `None` when
/// the iterator yields nothing.
pub fn select_best<'a, I>(
    paths: I,
    policy: ScorePolicy,
    max_paths: Option<usize>,
) -> Option<Selection<'a>>
where
    I: IntoIterator<Item = ResolutionPath<'a>>,
{
    let mut best: Option<Selection<'a>> = None;
    let mut considered = 0usize;
    let mut paths = paths.into_iter();

    loop {
        if max_paths.is_some_and(|limit| considered >= limit) {
            let more = paths.next().is_some();
            if more {
                warn!(
                    limit = considered,
                    "resolution path limit reached; picking best of the paths seen so far"
                );
            }
            if let Some(sel) = best.as_mut() {
                sel.truncated = more;
            }
            break;
        }

        let Some(path) = paths.next() else {
            break;
        };
        considered += 1;

        let candidate_score = score(&path, policy);
        let replace = match best {
            None => true,
            Some(ref current) => match candidate_score.cmp(&current.score) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => path.ids() < current.order,
            },
        };

        if replace {
            let order = path.ids();
            best = Some(Selection {
                path,
                score: candidate_score,
                order,
                considered,
                truncated: false,
            });
        }
    }

    if let Some(sel) = best.as_mut() {
        sel.considered = considered;
        debug!(
            considered,
            score = ?sel.score,
            order = ?sel.order,
            "selected resolution path"
        );
    }

    best
}
