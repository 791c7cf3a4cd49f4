//! Immutable board snapshot handed to the analysis passes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::block::{Block, BlockId, Position};
use crate::core::edge::ManualEdge;
use crate::core::task::Task;
use crate::{bflog_debug, Error, Result};

/// Tasks, blocks, and manual edges as persisted at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, alias = "manualEdges")]
    pub manual_edges: Vec<ManualEdge>,
}

impl Snapshot {
    pub fn new(tasks: Vec<Task>, blocks: Vec<Block>, manual_edges: Vec<ManualEdge>) -> Self {
        Self {
            tasks,
            blocks,
            manual_edges,
        }
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::SnapshotNotFound(path.to_path_buf()));
        }
        let snapshot: Self = serde_json::from_str(&fs::read_to_string(path)?)?;
        bflog_debug!(
            "Snapshot loaded from {}: tasks={}, blocks={}, manual_edges={}",
            path.display(),
            snapshot.tasks.len(),
            snapshot.blocks.len(),
            snapshot.manual_edges.len()
        );
        Ok(snapshot)
    }

    /// Lookup of block positions by id. Later duplicates are ignored.
    pub fn positions(&self) -> HashMap<BlockId, Position> {
        let mut positions = HashMap::with_capacity(self.blocks.len());
        for block in &self.blocks {
            positions.entry(block.id).or_insert(block.position);
        }
        positions
    }
}
