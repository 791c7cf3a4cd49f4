//! Task data model.
//!
//! Tasks are the units of work tracked inside a block. Each task may
//! point at a single prerequisite task through `depends_on`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::block::BlockId;

/// Identifier of a task, as assigned by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Task status in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    /// Set by the user; unrelated to the derived blocked set.
    Blocked,
    Done,
}

impl TaskStatus {
    /// Every status except `Done` counts as open work.
    pub fn is_open(&self) -> bool {
        !matches!(self, TaskStatus::Done)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "todo"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Blocked => write!(f, "blocked"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

/// A single task belonging to one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Owning block. Fixed at creation.
    #[serde(alias = "blockId")]
    pub block_id: BlockId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// The single prerequisite task, if any. May be dangling or point at
    /// the task itself; readers must go through [`Task::prerequisite`] or
    /// the dependency graph, which treat both as absent.
    #[serde(default, alias = "dependsOnTaskId")]
    pub depends_on: Option<TaskId>,
    /// Sibling ordering key; only used for tie-breaking.
    #[serde(default)]
    pub order: i64,
    #[serde(default = "epoch", alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Task {
    /// Create a `todo` task with no prerequisite.
    pub fn new(id: impl Into<TaskId>, block_id: impl Into<BlockId>) -> Self {
        Self {
            id: id.into(),
            block_id: block_id.into(),
            title: String::new(),
            status: TaskStatus::Todo,
            depends_on: None,
            order: 0,
            updated_at: epoch(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn depending_on(mut self, prerequisite: impl Into<TaskId>) -> Self {
        self.depends_on = Some(prerequisite.into());
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// The prerequisite pointer with self-references filtered out.
    ///
    /// Existence of the target is not checked here.
    pub fn prerequisite(&self) -> Option<TaskId> {
        self.depends_on.filter(|dep| *dep != self.id)
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}
