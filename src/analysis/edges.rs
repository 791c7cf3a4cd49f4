//! Block-level edges: manual edges plus edges inferred from cross-block
//! task dependencies, routed between block cards.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::analysis::flow::FlowChains;
use crate::bflog_debug;
use crate::core::block::{BlockId, Position};
use crate::core::edge::{EdgeId, ManualEdge};
use crate::core::graph::DependencyGraph;
use crate::geometry::{anchor_point, build_curve, choose_sides, CardSize, CubicCurve, Point, Side};

/// Where a visual edge comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Manual,
    Inferred,
}

/// Stable identity of a visual edge.
///
/// Inferred edges are keyed by their ordered block pair, so identical
/// input always yields the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualEdgeId {
    Manual(EdgeId),
    Inferred { source: BlockId, target: BlockId },
}

impl std::fmt::Display for VisualEdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisualEdgeId::Manual(id) => write!(f, "manual-{}", id),
            VisualEdgeId::Inferred { source, target } => {
                write!(f, "inferred-{}-{}", source, target)
            }
        }
    }
}

impl Serialize for VisualEdgeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A block-to-block edge before routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEdge {
    pub id: VisualEdgeId,
    pub source: BlockId,
    pub target: BlockId,
    pub kind: EdgeKind,
    pub step: Option<usize>,
    pub color_index: Option<usize>,
}

/// Routed connector between two cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathGeometry {
    pub source_side: Side,
    pub target_side: Side,
    pub curve: CubicCurve,
    /// SVG path data for `curve`.
    pub svg: String,
}

/// An edge ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEdge {
    pub id: VisualEdgeId,
    pub source_block_id: BlockId,
    pub target_block_id: BlockId,
    pub kind: EdgeKind,
    pub step: Option<usize>,
    pub color_index: Option<usize>,
    pub path_geometry: PathGeometry,
    pub midpoint: Point,
}

/// Manual edges followed by inferred edges, unrouted.
///
/// A cross-block task dependency `prerequisite -> dependent` maps onto the
/// block pair `(prerequisite block, dependent block)`. Pairs already covered
/// by a manual edge in the same direction are skipped. All dependencies on
/// one pair merge into a single edge carrying the lowest step and color.
/// Dependencies missing from every chain count as step 1.
pub fn infer_block_edges(
    manual_edges: &[ManualEdge],
    graph: &DependencyGraph<'_>,
    flows: &FlowChains,
) -> Vec<BlockEdge> {
    let mut edges: Vec<BlockEdge> = manual_edges
        .iter()
        .map(|edge| BlockEdge {
            id: VisualEdgeId::Manual(edge.id),
            source: edge.source,
            target: edge.target,
            kind: EdgeKind::Manual,
            step: None,
            color_index: None,
        })
        .collect();

    let mut inferred: Vec<BlockEdge> = Vec::new();
    let mut by_pair: HashMap<(BlockId, BlockId), usize> = HashMap::new();

    for (prereq_id, dependent_id) in graph.dependencies() {
        let (Some(prereq), Some(dependent)) = (graph.task(&prereq_id), graph.task(&dependent_id))
        else {
            continue;
        };
        let (source, target) = (prereq.block_id, dependent.block_id);
        if source == target {
            continue;
        }
        if manual_edges.iter().any(|edge| edge.connects(source, target)) {
            continue;
        }

        let step = flows.edge_step(prereq_id, dependent_id).unwrap_or(1);
        let color = flows.edge_color(prereq_id, dependent_id);

        match by_pair.get(&(source, target)) {
            Some(&slot) => {
                let edge = &mut inferred[slot];
                edge.step = edge.step.map(|s| s.min(step)).or(Some(step));
                edge.color_index = match (edge.color_index, color) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
            }
            None => {
                by_pair.insert((source, target), inferred.len());
                inferred.push(BlockEdge {
                    id: VisualEdgeId::Inferred { source, target },
                    source,
                    target,
                    kind: EdgeKind::Inferred,
                    step: Some(step),
                    color_index: color,
                });
            }
        }
    }

    bflog_debug!(
        "block edges: {} manual, {} inferred",
        edges.len(),
        inferred.len()
    );
    edges.extend(inferred);
    edges
}

/// Route one edge between two card positions.
pub fn route(source: Position, target: Position, card: CardSize) -> (PathGeometry, Point) {
    let (source_side, target_side) = choose_sides(source, target, card);
    let start = anchor_point(source, card, source_side);
    let end = anchor_point(target, card, target_side);
    let curve = build_curve(start, end, source_side);
    let midpoint = curve.midpoint();
    (
        PathGeometry {
            source_side,
            target_side,
            svg: curve.to_svg_path(),
            curve,
        },
        midpoint,
    )
}

/// Attach geometry to each edge. Edges touching an unknown block are dropped.
pub fn route_edges(
    edges: Vec<BlockEdge>,
    positions: &HashMap<BlockId, Position>,
    card: CardSize,
) -> Vec<VisualEdge> {
    edges
        .into_iter()
        .filter_map(|edge| {
            let (Some(&source), Some(&target)) =
                (positions.get(&edge.source), positions.get(&edge.target))
            else {
                bflog_debug!("dropping edge {}: endpoint block not on board", edge.id);
                return None;
            };
            let (path_geometry, midpoint) = route(source, target, card);
            Some(VisualEdge {
                id: edge.id,
                source_block_id: edge.source,
                target_block_id: edge.target,
                kind: edge.kind,
                step: edge.step,
                color_index: edge.color_index,
                path_geometry,
                midpoint,
            })
        })
        .collect()
}

/// Full projection: infer block edges from `graph` and route them.
pub fn project_edges(
    manual_edges: &[ManualEdge],
    graph: &DependencyGraph<'_>,
    flows: &FlowChains,
    positions: &HashMap<BlockId, Position>,
    card: CardSize,
) -> Vec<VisualEdge> {
    route_edges(infer_block_edges(manual_edges, graph, flows), positions, card)
}
