//! Core domain models: tasks, blocks, manual edges, and the snapshot
//! that bundles them, plus the validated dependency graph over tasks.

pub mod block;
pub mod edge;
pub mod graph;
pub mod snapshot;
pub mod task;

pub use block::{Block, BlockId, Position};
pub use edge::{EdgeId, ManualEdge, RelationKind};
pub use graph::DependencyGraph;
pub use snapshot::Snapshot;
pub use task::{Task, TaskId, TaskStatus};
