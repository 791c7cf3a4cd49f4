//! Blocks: positioned rectangular cards grouping tasks on the board.

use serde::{Deserialize, Serialize};

/// Identifier of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub i64);

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BlockId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Top-left corner of a block in board coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A business area on the board.
///
/// Every block shares the same card size, so only its position is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub position: Position,
}

impl Block {
    pub fn new(id: impl Into<BlockId>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            position: Position::new(x, y),
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }
}
