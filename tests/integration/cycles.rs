//! Malformed and cyclic dependency input.
//!
//! The writer side never prevents cycles or dangling pointers, so every
//! pass must terminate with bounded output on them.

use std::collections::HashSet;

use blockflow::analysis::{analyze, compute_blocked_tasks, extract_chains};
use blockflow::core::{Snapshot, TaskId};
use blockflow::geometry::CardSize;

use crate::fixtures::{dependent, ids, row_of_blocks, task};

/// Given A -> B -> C -> A (each depends on the next)
/// When chains are extracted
/// Then extraction terminates with chains of at most 3 distinct tasks
#[test]
fn test_three_cycle_is_bounded() {
    let tasks = vec![dependent(1, 1, 2), dependent(2, 1, 3), dependent(3, 1, 1)];
    let flows = extract_chains(&tasks);

    assert!(!flows.chains.is_empty());
    for chain in &flows.chains {
        assert!(chain.len() >= 2 && chain.len() <= 3);
        let unique: HashSet<&TaskId> = chain.iter().collect();
        assert_eq!(unique.len(), chain.len(), "repeated task in {:?}", chain);
    }
}

/// Given a two-task cycle spanning two blocks
/// Then both tasks are blocked and both directions get an inferred edge
#[test]
fn test_cross_block_two_cycle() {
    let snapshot = Snapshot::new(
        vec![dependent(1, 1, 2), dependent(2, 2, 1)],
        row_of_blocks(),
        vec![],
    );
    let analysis = analyze(&snapshot, CardSize::default());

    assert_eq!(analysis.blocked_task_ids.len(), 2);
    assert_eq!(analysis.chains, vec![ids(&[1, 2]), ids(&[2, 1])]);
    assert_eq!(analysis.visual_edges.len(), 2);
}

/// Given a long cycle
/// Then every chain is a rotation covering the whole cycle
#[test]
fn test_long_cycle_rotations() {
    let n = 50;
    let tasks: Vec<_> = (1..=n)
        .map(|id| dependent(id, 1, if id == n { 1 } else { id + 1 }))
        .collect();
    let flows = extract_chains(&tasks);

    assert_eq!(flows.chains.len(), n as usize);
    assert!(flows.chains.iter().all(|c| c.len() == n as usize));
    assert!(flows.task_steps.values().all(|&step| step == 1));
}

/// Given a very long acyclic chain
/// Then extraction does not overflow and yields one chain
#[test]
fn test_deep_chain() {
    let n = 20_000;
    let mut tasks = vec![task(1, 1)];
    tasks.extend((2..=n).map(|id| dependent(id, 1, id - 1)));
    let flows = extract_chains(&tasks);

    assert_eq!(flows.chains.len(), 1);
    assert_eq!(flows.chains[0].len(), n as usize);
    assert_eq!(flows.task_steps[&TaskId(n)], n as usize);
}

/// Given only self-references and dangling pointers
/// Then nothing is blocked, no chains, no edges
#[test]
fn test_only_invalid_pointers() {
    let snapshot = Snapshot::new(
        vec![dependent(1, 1, 1), dependent(2, 2, 404), dependent(3, 3, 3)],
        row_of_blocks(),
        vec![],
    );
    let analysis = analyze(&snapshot, CardSize::default());

    assert!(compute_blocked_tasks(&snapshot.tasks).is_empty());
    assert!(analysis.blocked_task_ids.is_empty());
    assert!(analysis.chains.is_empty());
    assert!(analysis.task_step.is_empty());
    assert!(analysis.visual_edges.is_empty());
}

/// Given duplicate task ids in the snapshot
/// Then the first occurrence wins and analysis still completes
#[test]
fn test_duplicate_task_ids() {
    let tasks = vec![task(1, 1), dependent(2, 1, 1), dependent(2, 1, 2)];
    let flows = extract_chains(&tasks);
    assert_eq!(flows.chains, vec![ids(&[1, 2])]);
}
