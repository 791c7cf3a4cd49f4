//! Dependency and flow analysis over a board snapshot.
//!
//! Every pass is a pure function of its input. [`analyze`] runs them in
//! order over one [`Snapshot`]:
//!
//! 1. [`blocking`]: open tasks waiting on an unfinished prerequisite, and
//!    which blocks contain one.
//! 2. [`flow`]: chains of dependent tasks with per-task step and color.
//! 3. [`edges`]: manual and inferred block edges, routed with
//!    [`crate::geometry`].
//!
//! The canvas, list, and flow views all read from the same [`Analysis`].

pub mod blocking;
pub mod edges;
pub mod flow;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::bflog_debug;
use crate::core::block::BlockId;
use crate::core::graph::DependencyGraph;
use crate::core::snapshot::Snapshot;
use crate::core::task::TaskId;
use crate::geometry::CardSize;

pub use blocking::{compute_blocked_blocks, compute_blocked_tasks};
pub use edges::{project_edges, EdgeKind, PathGeometry, VisualEdge, VisualEdgeId};
pub use flow::{extract_chains, EdgeKey, FlowChains};

/// One task as it appears inside a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStep {
    pub task_id: TaskId,
    /// 1-based position within this flow.
    pub step: usize,
    pub blocked: bool,
}

/// A chain laid out for the list and flow views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSummary {
    pub color_index: usize,
    pub steps: Vec<FlowStep>,
}

/// Everything derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub blocked_task_ids: BTreeSet<TaskId>,
    pub blocked_block_ids: BTreeMap<BlockId, bool>,
    pub chains: Vec<Vec<TaskId>>,
    pub task_step: BTreeMap<TaskId, usize>,
    pub task_color: BTreeMap<TaskId, usize>,
    pub flows: Vec<FlowSummary>,
    pub visual_edges: Vec<VisualEdge>,
}

impl Analysis {
    pub fn is_blocked(&self, task: TaskId) -> bool {
        self.blocked_task_ids.contains(&task)
    }

    pub fn block_is_blocked(&self, block: BlockId) -> bool {
        self.blocked_block_ids.get(&block).copied().unwrap_or(false)
    }
}

/// Run every pass over `snapshot`.
pub fn analyze(snapshot: &Snapshot, card: CardSize) -> Analysis {
    let graph = DependencyGraph::build(&snapshot.tasks);

    let blocked = blocking::blocked_in(&graph);
    let blocked_blocks = blocking::rollup(&snapshot.blocks, graph.tasks(), &blocked);
    let flows = flow::chains_in(&graph);
    let visual_edges = project_edges(
        &snapshot.manual_edges,
        &graph,
        &flows,
        &snapshot.positions(),
        card,
    );

    bflog_debug!(
        "analysis: tasks={}, blocked={}, chains={}, edges={}",
        graph.task_count(),
        blocked.len(),
        flows.chains.len(),
        visual_edges.len()
    );

    Analysis {
        flows: summarize(&flows, &blocked),
        blocked_task_ids: blocked,
        blocked_block_ids: blocked_blocks,
        chains: flows.chains,
        task_step: flows.task_steps,
        task_color: flows.task_colors,
        visual_edges,
    }
}

/// Flow view rows, one per chain in color order.
pub fn summarize(flows: &FlowChains, blocked: &BTreeSet<TaskId>) -> Vec<FlowSummary> {
    flows
        .chains
        .iter()
        .enumerate()
        .map(|(color_index, chain)| FlowSummary {
            color_index,
            steps: chain
                .iter()
                .enumerate()
                .map(|(index, &task_id)| FlowStep {
                    task_id,
                    step: index + 1,
                    blocked: blocked.contains(&task_id),
                })
                .collect(),
        })
        .collect()
}
