//! Persisted block-to-block relations drawn by hand.

use serde::{Deserialize, Serialize};

use crate::core::block::BlockId;

/// Identifier of a manual edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub i64);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of relation a manual edge expresses. There is only one today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    #[default]
    DependsOn,
}

/// A user-created directed edge between two blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEdge {
    pub id: EdgeId,
    #[serde(alias = "sourceBlockId")]
    pub source: BlockId,
    #[serde(alias = "targetBlockId")]
    pub target: BlockId,
    #[serde(default)]
    pub relation: RelationKind,
}

impl ManualEdge {
    pub fn new(id: i64, source: impl Into<BlockId>, target: impl Into<BlockId>) -> Self {
        Self {
            id: EdgeId(id),
            source: source.into(),
            target: target.into(),
            relation: RelationKind::DependsOn,
        }
    }

    /// True when this edge connects exactly `source -> target`.
    pub fn connects(&self, source: BlockId, target: BlockId) -> bool {
        self.source == source && self.target == target
    }
}
