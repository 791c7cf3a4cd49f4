//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - Building tasks and blocks tersely
//! - Predefined board layouts
//! - Writing snapshots to temporary files

use std::path::PathBuf;

use tempfile::TempDir;

use blockflow::core::{Block, ManualEdge, Snapshot, Task, TaskId, TaskStatus};

/// A `todo` task in `block`.
pub fn task(id: i64, block: i64) -> Task {
    Task::new(id, block).with_title(&format!("task {}", id))
}

/// A `todo` task in `block` depending on `prereq`.
pub fn dependent(id: i64, block: i64, prereq: i64) -> Task {
    task(id, block).depending_on(prereq)
}

pub fn done(task: Task) -> Task {
    task.with_status(TaskStatus::Done)
}

pub fn ids(raw: &[i64]) -> Vec<TaskId> {
    raw.iter().map(|&id| TaskId(id)).collect()
}

/// Three blocks in a row, 400px apart: Sales (1), Ops (2), Finance (3).
pub fn row_of_blocks() -> Vec<Block> {
    vec![
        Block::new(1, 0.0, 0.0).with_label("Sales"),
        Block::new(2, 400.0, 0.0).with_label("Ops"),
        Block::new(3, 800.0, 0.0).with_label("Finance"),
    ]
}

/// A small but realistic board:
///
/// - Sales: 1 (done) <- 2 <- 4 (Ops)
/// - Sales: 1 <- 3 (Ops) <- 5 (Finance)
/// - Ops: 6 depends on itself, 7 depends on a deleted task
/// - manual edge Finance -> Sales
pub fn sample_board() -> Snapshot {
    Snapshot::new(
        vec![
            done(task(1, 1)),
            dependent(2, 1, 1).with_order(1),
            dependent(3, 2, 1).with_order(2),
            dependent(4, 2, 2),
            dependent(5, 3, 3),
            dependent(6, 2, 6),
            dependent(7, 2, 999),
        ],
        row_of_blocks(),
        vec![ManualEdge::new(1, 3, 1)],
    )
}

/// A snapshot written to a temporary directory.
pub struct SnapshotFile {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl SnapshotFile {
    pub fn write(snapshot: &Snapshot) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("board.json");
        let json = serde_json::to_string_pretty(snapshot).expect("Failed to serialize snapshot");
        std::fs::write(&path, json).expect("Failed to write snapshot");
        Self { temp_dir, path }
    }
}
