//! Derived blocked state for tasks and blocks.
//!
//! A task is blocked when it is still open and its immediate prerequisite
//! is not done. Only the immediate prerequisite counts: a task whose
//! prerequisite is done is unblocked even if something further upstream
//! is still open.

use std::collections::{BTreeMap, BTreeSet};

use crate::bflog_debug;
use crate::core::block::{Block, BlockId};
use crate::core::graph::DependencyGraph;
use crate::core::task::{Task, TaskId};

/// Ids of open tasks whose immediate prerequisite is not done.
pub fn compute_blocked_tasks(tasks: &[Task]) -> BTreeSet<TaskId> {
    blocked_in(&DependencyGraph::build(tasks))
}

/// Same as [`compute_blocked_tasks`] over an already built graph.
pub fn blocked_in(graph: &DependencyGraph<'_>) -> BTreeSet<TaskId> {
    let blocked: BTreeSet<TaskId> = graph
        .tasks()
        .filter(|task| task.status.is_open())
        .filter(|task| {
            graph
                .prerequisite(&task.id)
                .is_some_and(|prereq| !prereq.is_done())
        })
        .map(|task| task.id)
        .collect();
    bflog_debug!(
        "blocked tasks: {} of {}",
        blocked.len(),
        graph.task_count()
    );
    blocked
}

/// Per-block flag: does the block own at least one blocked task.
pub fn compute_blocked_blocks(blocks: &[Block], tasks: &[Task]) -> BTreeMap<BlockId, bool> {
    let graph = DependencyGraph::build(tasks);
    rollup(blocks, graph.tasks(), &blocked_in(&graph))
}

/// Roll an already computed blocked set up to blocks.
///
/// `tasks` should come from the same [`DependencyGraph`] that produced
/// `blocked`, so a shadowed duplicate id cannot flag its own block. Every
/// block in `blocks` gets an entry; blocked tasks whose block is not in
/// `blocks` are ignored.
pub fn rollup<'a>(
    blocks: &[Block],
    tasks: impl IntoIterator<Item = &'a Task>,
    blocked: &BTreeSet<TaskId>,
) -> BTreeMap<BlockId, bool> {
    let mut flags: BTreeMap<BlockId, bool> = blocks.iter().map(|b| (b.id, false)).collect();
    for task in tasks.into_iter().filter(|t| blocked.contains(&t.id)) {
        if let Some(flag) = flags.get_mut(&task.block_id) {
            *flag = true;
        }
    }
    flags
}
