//! Dependency and flow analysis for block boards.
//!
//! A board is a set of positioned blocks, each holding tasks that may
//! depend on one other task. This crate derives, from an immutable
//! [`Snapshot`], which tasks are blocked, the chains of dependent tasks,
//! and the block-to-block edges to draw with their connector geometry.

pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod geometry;
pub mod log;

pub use crate::analysis::{analyze, Analysis};
pub use crate::core::{Block, BlockId, ManualEdge, Snapshot, Task, TaskId, TaskStatus};
pub use error::{Error, Result};
