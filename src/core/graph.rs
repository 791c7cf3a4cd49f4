//! Task dependency graph built from single prerequisite pointers.
//!
//! Every task becomes a node. Each valid `depends_on` pointer becomes one
//! edge directed from the prerequisite to its dependent. Pointers to the
//! task itself or to an unknown id are dropped here, so every pass built on
//! top of this graph sees the same cleaned view. Cycles are kept as-is;
//! traversals are responsible for terminating on them.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::core::task::{Task, TaskId};
use crate::{bflog_debug, bflog_warn};

/// Read-only dependency view over a task snapshot.
pub struct DependencyGraph<'a> {
    /// Edges run prerequisite -> dependent.
    graph: DiGraph<&'a Task, ()>,
    task_index: HashMap<TaskId, NodeIndex>,
    /// Dependents per node, in traversal order.
    dependents: Vec<Vec<TaskId>>,
}

impl<'a> DependencyGraph<'a> {
    /// Build the graph from a task snapshot.
    ///
    /// Duplicate ids keep their FIRST occurrence; later tasks with the same
    /// id are left out of the graph entirely and every pass built on it
    /// ignores them. This is deliberate: a plain id map would keep the last
    /// one, but then the earlier task's snapshot position would decide
    /// sibling order for data it no longer carries.
    pub fn build(tasks: &'a [Task]) -> Self {
        let mut graph = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut task_index = HashMap::with_capacity(tasks.len());

        for task in tasks {
            if task_index.contains_key(&task.id) {
                bflog_warn!("duplicate task id {} ignored", task.id);
                continue;
            }
            let index = graph.add_node(task);
            task_index.insert(task.id, index);
        }

        let mut dag = Self {
            graph,
            task_index,
            dependents: Vec::new(),
        };

        let mut edges = Vec::new();
        for index in dag.graph.node_indices() {
            let task = dag.graph[index];
            let Some(dep) = task.depends_on else {
                continue;
            };
            if dep == task.id {
                bflog_warn!("task {} depends on itself, ignoring", task.id);
                continue;
            }
            match dag.task_index.get(&dep) {
                Some(&prereq) => edges.push((prereq, index)),
                None => bflog_warn!("task {} depends on unknown task {}, ignoring", task.id, dep),
            }
        }
        for (prereq, dependent) in edges {
            dag.graph.add_edge(prereq, dependent, ());
        }

        dag.dependents = dag
            .graph
            .node_indices()
            .map(|index| dag.sorted_dependents(index))
            .collect();
        dag
    }

    /// Dependents ordered by `(order, updated_at)`, then snapshot position.
    fn sorted_dependents(&self, index: NodeIndex) -> Vec<TaskId> {
        let mut nodes: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(index, Direction::Outgoing)
            .collect();
        nodes.sort_by(|a, b| {
            let (ta, tb) = (self.graph[*a], self.graph[*b]);
            ta.order
                .cmp(&tb.order)
                .then(ta.updated_at.cmp(&tb.updated_at))
                .then(a.index().cmp(&b.index()))
        });
        nodes.into_iter().map(|n| self.graph[n].id).collect()
    }

    /// Get a task by its ID.
    pub fn task(&self, id: &TaskId) -> Option<&'a Task> {
        self.task_index.get(id).map(|&index| self.graph[index])
    }

    /// All tasks in snapshot order.
    pub fn tasks(&self) -> impl Iterator<Item = &'a Task> + '_ {
        self.graph.node_indices().map(move |index| self.graph[index])
    }

    /// The validated prerequisite of a task: existing and not itself.
    pub fn prerequisite(&self, id: &TaskId) -> Option<&'a Task> {
        let index = self.task_index.get(id)?;
        self.graph
            .neighbors_directed(*index, Direction::Incoming)
            .next()
            .map(|prereq| self.graph[prereq])
    }

    /// Tasks that name `id` as their prerequisite, in traversal order.
    pub fn dependents(&self, id: &TaskId) -> &[TaskId] {
        self.task_index
            .get(id)
            .and_then(|index| self.dependents.get(index.index()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of valid prerequisites: always 0 or 1.
    pub fn indegree(&self, id: &TaskId) -> usize {
        self.task_index
            .get(id)
            .map(|&index| {
                self.graph
                    .neighbors_directed(index, Direction::Incoming)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Every valid `(prerequisite, dependent)` pair, ordered by dependent
    /// snapshot position.
    pub fn dependencies(&self) -> Vec<(TaskId, TaskId)> {
        self.graph
            .node_indices()
            .filter_map(|index| {
                let dependent = self.graph[index];
                self.prerequisite(&dependent.id)
                    .map(|prereq| (prereq.id, dependent.id))
            })
            .collect()
    }

    /// Traversal roots: tasks with no prerequisite that have dependents.
    ///
    /// When the dependency set is made only of cycles there are none, and
    /// every task with dependents is returned instead.
    pub fn roots(&self) -> Vec<TaskId> {
        let starts: Vec<TaskId> = self
            .tasks()
            .filter(|task| !self.dependents(&task.id).is_empty())
            .map(|task| task.id)
            .collect();

        let roots: Vec<TaskId> = starts
            .iter()
            .copied()
            .filter(|id| self.indegree(id) == 0)
            .collect();

        if roots.is_empty() && !starts.is_empty() {
            bflog_debug!(
                "no acyclic roots among {} tasks, falling back to every task with dependents",
                starts.len()
            );
            return starts;
        }
        roots
    }

    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl std::fmt::Debug for DependencyGraph<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("tasks", &self.task_count())
            .field("dependencies", &self.dependency_count())
            .finish()
    }
}
