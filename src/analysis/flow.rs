//! Flow chain extraction.
//!
//! A flow is a maximal path of prerequisite -> dependent edges. Flows are
//! discovered by walking the dependency graph depth-first from its roots,
//! with the current path acting as the visited set. A node already on the
//! path is never entered again, so a cycle ends the chain at the node that
//! would close it. Sibling branches get their own path and may revisit the
//! same nodes.
//!
//! Each chain's index in the result is its color index. Steps are 1-based
//! positions from the chain head; when a task or edge shows up in several
//! chains the lowest step (and lowest color) wins.

use std::collections::{BTreeMap, HashSet};

use crate::core::graph::DependencyGraph;
use crate::core::task::{Task, TaskId};
use crate::{bflog_debug, bflog_trace};

/// A task-level dependency edge, `prerequisite -> dependent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub prerequisite: TaskId,
    pub dependent: TaskId,
}

impl EdgeKey {
    pub fn new(prerequisite: TaskId, dependent: TaskId) -> Self {
        Self {
            prerequisite,
            dependent,
        }
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.prerequisite, self.dependent)
    }
}

/// Chains and the step/color placement derived from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowChains {
    /// Deduplicated chains in discovery order. Index = color index.
    pub chains: Vec<Vec<TaskId>>,
    pub edge_steps: BTreeMap<EdgeKey, usize>,
    pub edge_colors: BTreeMap<EdgeKey, usize>,
    /// Lowest 1-based position of each task over every chain containing it.
    pub task_steps: BTreeMap<TaskId, usize>,
    /// Lowest color among the chains that give a task its step.
    pub task_colors: BTreeMap<TaskId, usize>,
}

impl FlowChains {
    pub fn edge_step(&self, prerequisite: TaskId, dependent: TaskId) -> Option<usize> {
        self.edge_steps
            .get(&EdgeKey::new(prerequisite, dependent))
            .copied()
    }

    pub fn edge_color(&self, prerequisite: TaskId, dependent: TaskId) -> Option<usize> {
        self.edge_colors
            .get(&EdgeKey::new(prerequisite, dependent))
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

/// Extract flow chains from a task snapshot.
pub fn extract_chains(tasks: &[Task]) -> FlowChains {
    chains_in(&DependencyGraph::build(tasks))
}

/// Same as [`extract_chains`] over an already built graph.
pub fn chains_in(graph: &DependencyGraph<'_>) -> FlowChains {
    let mut walked = Vec::new();
    for root in graph.roots() {
        walk_from(graph, root, &mut walked);
    }

    let mut chains = dedup(walked);
    if chains.is_empty() {
        chains = graph
            .dependencies()
            .into_iter()
            .map(|(prereq, dependent)| vec![prereq, dependent])
            .collect();
        if !chains.is_empty() {
            bflog_debug!(
                "no chains walked, using {} direct dependency pairs",
                chains.len()
            );
        }
    }

    let flows = place(chains);
    bflog_debug!(
        "flow chains: {} chains over {} tasks",
        flows.chains.len(),
        flows.task_steps.len()
    );
    flows
}

/// Depth-first walk from `root`, pushing every maximal path of length >= 2.
///
/// Uses an explicit stack of `(node, next dependent index)` so long chains
/// do not grow the call stack.
fn walk_from(graph: &DependencyGraph<'_>, root: TaskId, chains: &mut Vec<Vec<TaskId>>) {
    let mut stack: Vec<(TaskId, usize)> = vec![(root, 0)];
    let mut on_path: HashSet<TaskId> = HashSet::from([root]);

    while let Some(&(node, cursor)) = stack.last() {
        let next = graph
            .dependents(&node)
            .iter()
            .enumerate()
            .skip(cursor)
            .find(|(_, dep)| !on_path.contains(*dep))
            .map(|(index, dep)| (index, *dep));

        match next {
            Some((index, child)) => {
                if let Some(top) = stack.last_mut() {
                    top.1 = index + 1;
                }
                stack.push((child, 0));
                on_path.insert(child);

                let exhausted = graph
                    .dependents(&child)
                    .iter()
                    .all(|dep| on_path.contains(dep));
                if exhausted {
                    let chain: Vec<TaskId> = stack.iter().map(|(id, _)| *id).collect();
                    bflog_trace!("chain from {}: {} tasks", root, chain.len());
                    chains.push(chain);
                }
            }
            None => {
                stack.pop();
                on_path.remove(&node);
            }
        }
    }
}

/// Drop exact duplicate chains, keeping first occurrences in order.
fn dedup(chains: Vec<Vec<TaskId>>) -> Vec<Vec<TaskId>> {
    let mut seen: HashSet<Vec<TaskId>> = HashSet::with_capacity(chains.len());
    chains
        .into_iter()
        .filter(|chain| seen.insert(chain.clone()))
        .collect()
}

fn place(chains: Vec<Vec<TaskId>>) -> FlowChains {
    let mut flows = FlowChains::default();

    for (color, chain) in chains.iter().enumerate() {
        for (index, &task) in chain.iter().enumerate() {
            let step = index + 1;
            match flows.task_steps.get(&task) {
                Some(&best) if best <= step => {}
                _ => {
                    flows.task_steps.insert(task, step);
                    flows.task_colors.insert(task, color);
                }
            }

            if index == 0 {
                continue;
            }
            let key = EdgeKey::new(chain[index - 1], task);
            flows
                .edge_steps
                .entry(key)
                .and_modify(|s| *s = (*s).min(index))
                .or_insert(index);
            flows
                .edge_colors
                .entry(key)
                .and_modify(|c| *c = (*c).min(color))
                .or_insert(color);
        }
    }

    flows.chains = chains;
    flows
}
