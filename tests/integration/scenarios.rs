//! End-to-end board scenarios through `analyze`.

use blockflow::analysis::{analyze, EdgeKind};
use blockflow::core::{BlockId, Snapshot, TaskId, TaskStatus};
use blockflow::geometry::CardSize;

use crate::fixtures::{dependent, done, ids, row_of_blocks, sample_board, task};

/// Given task 2 depending on open task 1
/// When the board is analyzed
/// Then 2 is blocked, one chain [1, 2] exists and steps are 1 and 2
#[test]
fn test_simple_dependency_scenario() {
    let snapshot = Snapshot::new(vec![task(1, 1), dependent(2, 1, 1)], row_of_blocks(), vec![]);
    let analysis = analyze(&snapshot, CardSize::default());

    assert_eq!(analysis.blocked_task_ids.iter().copied().collect::<Vec<_>>(), ids(&[2]));
    assert_eq!(analysis.chains, vec![ids(&[1, 2])]);
    assert_eq!(analysis.task_step[&TaskId(1)], 1);
    assert_eq!(analysis.task_step[&TaskId(2)], 2);
    assert!(analysis.block_is_blocked(BlockId(1)));
    assert!(!analysis.block_is_blocked(BlockId(2)));
}

/// Given the same board with task 1 done
/// Then nothing is blocked but the chain is still reported
#[test]
fn test_done_prerequisite_scenario() {
    let snapshot = Snapshot::new(
        vec![done(task(1, 1)), dependent(2, 1, 1)],
        row_of_blocks(),
        vec![],
    );
    let analysis = analyze(&snapshot, CardSize::default());

    assert!(analysis.blocked_task_ids.is_empty());
    assert_eq!(analysis.chains, vec![ids(&[1, 2])]);
    assert!(analysis.blocked_block_ids.values().all(|blocked| !blocked));
}

/// Given B and C both depending on A in one block
/// Then two chains with distinct colors, A at step 1, and no block edges
#[test]
fn test_fan_out_scenario() {
    let snapshot = Snapshot::new(
        vec![task(1, 1), dependent(2, 1, 1), dependent(3, 1, 1)],
        row_of_blocks(),
        vec![],
    );
    let analysis = analyze(&snapshot, CardSize::default());

    assert_eq!(analysis.chains, vec![ids(&[1, 2]), ids(&[1, 3])]);
    assert_ne!(analysis.flows[0].color_index, analysis.flows[1].color_index);
    assert_eq!(analysis.task_step[&TaskId(1)], 1);
    assert_eq!(analysis.task_color[&TaskId(2)], 0);
    assert_eq!(analysis.task_color[&TaskId(3)], 1);
    assert!(analysis.visual_edges.is_empty());
}

/// Given the sample board
/// Then blocked, chains, steps, and edges agree with each other
#[test]
fn test_sample_board() {
    let analysis = analyze(&sample_board(), CardSize::default());

    // 1 is done, so 2 and 3 are free; 4 and 5 wait on open prerequisites.
    assert_eq!(
        analysis.blocked_task_ids.iter().copied().collect::<Vec<_>>(),
        ids(&[4, 5])
    );
    assert!(!analysis.block_is_blocked(BlockId(1)));
    assert!(analysis.block_is_blocked(BlockId(2)));
    assert!(analysis.block_is_blocked(BlockId(3)));

    assert_eq!(analysis.chains, vec![ids(&[1, 2, 4]), ids(&[1, 3, 5])]);
    assert_eq!(analysis.task_step[&TaskId(5)], 3);
    assert!(!analysis.task_step.contains_key(&TaskId(6)));
    assert!(!analysis.task_step.contains_key(&TaskId(7)));

    let kinds: Vec<(EdgeKind, i64, i64)> = analysis
        .visual_edges
        .iter()
        .map(|e| (e.kind, e.source_block_id.0, e.target_block_id.0))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (EdgeKind::Manual, 3, 1),
            (EdgeKind::Inferred, 1, 2),
            (EdgeKind::Inferred, 2, 3),
        ]
    );

    // Sales -> Ops carries both 2 -> 4 (step 2) and 1 -> 3 (step 1).
    assert_eq!(analysis.visual_edges[1].step, Some(1));
    assert_eq!(analysis.visual_edges[1].color_index, Some(0));
    assert_eq!(analysis.visual_edges[2].step, Some(2));
    assert_eq!(analysis.visual_edges[2].color_index, Some(1));
}

/// Given an unchanged snapshot analyzed twice
/// Then the serialized output is byte-identical
#[test]
fn test_analysis_is_idempotent() {
    let snapshot = sample_board();
    let first = serde_json::to_string(&analyze(&snapshot, CardSize::default())).unwrap();
    let second = serde_json::to_string(&analyze(&snapshot, CardSize::default())).unwrap();
    assert_eq!(first, second);
}

/// Given every open status on a dependent task
/// Then each is blocked while its prerequisite is open
#[test]
fn test_all_open_statuses_block() {
    for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Blocked] {
        let snapshot = Snapshot::new(
            vec![task(1, 1), dependent(2, 1, 1).with_status(status)],
            vec![],
            vec![],
        );
        let analysis = analyze(&snapshot, CardSize::default());
        assert!(analysis.is_blocked(TaskId(2)), "{} should be blocked", status);
    }
}
