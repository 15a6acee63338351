// Integration tests for the path counter

use gridpaths::counter::{self, count_paths, CounterError, GridConfig, PathCounter, Traversal};
use gridpaths::grid::Cell;
use gridpaths::snapshot::{SnapshotKind, Step};
use std::collections::BTreeMap;
use std::time::Duration;

fn binomial(n: u64, k: u64) -> u64 {
    let mut result: u128 = 1;
    for i in 0..k {
        result = result * (n - i) as u128 / (i + 1) as u128;
    }
    result as u64
}

fn collect_steps(size: usize) -> (Vec<Step>, u64) {
    let mut steps = Vec::new();
    let total = counter::run(size, Duration::from_millis(1), |step| steps.push(step.clone()))
        .expect("valid grid size");
    (steps, total)
}

#[test]
fn test_known_counts() {
    assert_eq!(count_paths(1), Ok(1));
    assert_eq!(count_paths(2), Ok(2));
    assert_eq!(count_paths(3), Ok(6));
    assert_eq!(count_paths(5), Ok(70));
}

#[test]
fn test_counts_match_central_binomial() {
    for n in 1..=12u64 {
        let expected = binomial(2 * (n - 1), n - 1);
        assert_eq!(count_paths(n as usize), Ok(expected), "grid size {}", n);
    }
}

#[test]
fn test_largest_grid_fits_in_u64() {
    assert_eq!(count_paths(34), Ok(7_219_428_434_016_265_740));
}

#[test]
fn test_invalid_size_rejected_before_traversal() {
    let mut emitted = 0;
    let result = counter::run(0, Duration::ZERO, |_| emitted += 1);
    assert!(matches!(
        result,
        Err(CounterError::GridSizeOutOfRange { size: 0, .. })
    ));
    assert_eq!(emitted, 0);
    assert!(count_paths(35).is_err());
}

#[test]
fn test_two_by_two_end_to_end() {
    let (steps, total) = collect_steps(2);
    assert_eq!(total, 2);

    // Cells enter the stack in order (0,0), (0,1), (1,1), then (1,0)
    let mut entered = Vec::new();
    for step in &steps {
        if let Some(&top) = step.snapshot.stack.last() {
            if !entered.contains(&top) {
                entered.push(top);
            }
        }
    }
    assert_eq!(
        entered,
        vec![
            Cell::new(0, 0),
            Cell::new(0, 1),
            Cell::new(1, 1),
            Cell::new(1, 0)
        ]
    );

    let last = steps.last().unwrap();
    let expected: BTreeMap<Cell, u64> = [
        (Cell::new(0, 0), 2),
        (Cell::new(0, 1), 1),
        (Cell::new(1, 0), 1),
        (Cell::new(1, 1), 1),
    ]
    .into_iter()
    .collect();
    assert_eq!(last.snapshot.answers, expected);

    // (1,0) reaches the goal through the memo, so it settles only once
    let settled = steps
        .iter()
        .filter(|s| s.kind() == SnapshotKind::Settled)
        .count();
    assert_eq!(settled, 1);
    assert_eq!(last.snapshot.memo_hits, 1);
}

#[test]
fn test_every_cell_visited_once() {
    for size in 1..=6 {
        let (steps, _) = collect_steps(size);
        let last = steps.last().unwrap();
        assert_eq!(last.snapshot.visited.len(), size * size);
        assert_eq!(last.snapshot.answers.len(), size * size);

        let visits = steps
            .iter()
            .filter(|s| matches!(s.kind(), SnapshotKind::Visiting | SnapshotKind::Settled))
            .count();
        assert_eq!(visits, size * size);
    }
}

#[test]
fn test_visited_only_grows() {
    let (steps, _) = collect_steps(4);
    for pair in steps.windows(2) {
        assert!(pair[0].snapshot.visited.is_subset(&pair[1].snapshot.visited));
    }
}

#[test]
fn test_memo_entries_never_change() {
    let config = GridConfig::new(5, Duration::ZERO).unwrap();
    let mut traversal = Traversal::new(config);
    let mut seen = traversal.context().memo().clone();
    assert!(seen.is_empty());

    while traversal.next().is_some() {
        let memo = traversal.context().memo();
        for (cell, value) in &seen {
            assert_eq!(memo.get(cell), Some(value), "memo for {} changed", cell);
        }
        seen = memo.clone();
    }
    assert_eq!(seen.len(), 25);
    assert_eq!(seen.get(&Cell::new(0, 0)), Some(&70));
}

#[test]
fn test_stack_empty_before_and_after() {
    let config = GridConfig::new(4, Duration::ZERO).unwrap();
    let mut traversal = Traversal::new(config);
    assert!(traversal.context().stack().is_empty());
    assert_eq!(traversal.run_to_end(), 20);
    assert!(traversal.context().stack().is_empty());
}

#[test]
fn test_stack_is_a_monotone_path_from_origin() {
    let (steps, _) = collect_steps(4);
    for step in &steps {
        let stack = &step.snapshot.stack;
        if let Some(first) = stack.first() {
            assert_eq!(*first, Cell::new(0, 0));
        }
        for pair in stack.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let is_right = b.row == a.row && b.col == a.col + 1;
            let is_down = b.col == a.col && b.row == a.row + 1;
            assert!(is_right || is_down, "{} -> {} is not a move", a, b);
        }
    }
}

#[test]
fn test_contributing_empty_between_finalizations() {
    let (steps, _) = collect_steps(4);
    for step in &steps {
        match step.kind() {
            SnapshotKind::ContributingShown | SnapshotKind::Resolved => {
                assert!(!step.snapshot.contributing.is_empty());
                assert!(step.snapshot.contributing.len() <= 2);
            }
            _ => assert!(
                step.snapshot.contributing.is_empty(),
                "contributing set leaked into {:?}",
                step.kind()
            ),
        }
    }
}

#[test]
fn test_pauses_follow_step_delay() {
    let (steps, _) = collect_steps(3);
    let delay = Duration::from_millis(1);
    for step in &steps {
        let expected = match step.kind() {
            SnapshotKind::Visiting | SnapshotKind::Settled => delay,
            SnapshotKind::Totaled | SnapshotKind::Resolved => delay * 2,
            SnapshotKind::ContributingShown => delay * 4,
            SnapshotKind::Cleanup => Duration::ZERO,
        };
        assert_eq!(step.pause, expected);
    }
}

#[test]
fn test_longest_delay_runs_to_completion() {
    let mut longest = Duration::ZERO;
    let total = counter::run(2, Duration::MAX, |step| longest = longest.max(step.pause))
        .expect("valid grid size");
    assert_eq!(total, 2);
    assert_eq!(longest, Duration::MAX);
}

#[test]
fn test_counter_records_history() {
    let mut counter = PathCounter::new(GridConfig::new(3, Duration::ZERO).unwrap());
    let mut emitted = 0;
    let total = counter.run(|_| emitted += 1);
    assert_eq!(total, 6);
    assert_eq!(counter.total(), Some(6));
    assert_eq!(counter.history().len(), emitted);
    assert!(counter.history_error().is_none());
    assert!(!counter.is_running());
}

#[test]
fn test_history_limit_does_not_stop_run() {
    let config = GridConfig::new(4, Duration::ZERO).unwrap();
    let mut counter = PathCounter::with_history_limit(config, 4096);
    let mut emitted = 0;
    let total = counter.run(|_| emitted += 1);

    assert_eq!(total, 20);
    assert!(counter.history().len() < emitted);
    assert_eq!(counter.history().memory_limit(), 4096);
    assert!(counter.history().memory_usage() <= 4096);
    assert!(matches!(
        counter.history_error(),
        Some(CounterError::SnapshotLimitExceeded { .. })
    ));
}

#[test]
fn test_snapshot_json_shape() {
    let (steps, _) = collect_steps(2);
    let json = serde_json::to_value(&steps.last().unwrap().snapshot).unwrap();

    assert_eq!(json["kind"], "cleanup");
    assert_eq!(json["grid_size"], 2);
    assert_eq!(json["current_cell"], "0,0");
    assert!(json["updating_cell"].is_null());
    assert_eq!(json["answers"]["0,0"], 2);
    assert_eq!(json["answers"]["1,1"], 1);
    assert_eq!(json["visited"].as_array().unwrap().len(), 4);
    assert!(json["stack"].as_array().unwrap().is_empty());
}
