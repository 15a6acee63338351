// Generation-tagged cancellation of suspended runs

use gridpaths::counter::{Advance, GridConfig, PathCounter};
use std::time::Duration;

fn counter(size: usize) -> PathCounter {
    PathCounter::new(GridConfig::new(size, Duration::from_millis(300)).unwrap())
}

fn step(counter: &mut PathCounter, generation: gridpaths::counter::Generation) {
    assert!(matches!(counter.resume(generation), Advance::Step(_)));
}

#[test]
fn test_idle_before_start() {
    let mut counter = counter(3);
    let generation = counter.generation();
    assert_eq!(counter.resume(generation), Advance::Idle);
    assert!(counter.history().is_empty());
}

#[test]
fn test_stale_resume_after_restart_is_noop() {
    let mut counter = counter(4);
    let old = counter.start();
    for _ in 0..5 {
        step(&mut counter, old);
    }

    let new = counter.start();
    assert_ne!(old, new);
    assert!(counter.history().is_empty());

    // The old run's pending continuation fires after the reset
    assert_eq!(counter.resume(old), Advance::Stale);
    assert!(counter.history().is_empty());
    assert!(counter.latest().is_none());

    step(&mut counter, new);
    let first = counter.latest().unwrap();
    assert_eq!(first.visited.len(), 1);
    assert_eq!(first.stack.len(), 1);

    // Interleaving stale resumptions never moves the new run
    for _ in 0..10 {
        assert_eq!(counter.resume(old), Advance::Stale);
    }
    assert_eq!(counter.history().len(), 1);
}

#[test]
fn test_reset_cancels_without_starting() {
    let mut counter = counter(3);
    let generation = counter.start();
    step(&mut counter, generation);
    counter.reset();

    assert_eq!(counter.resume(generation), Advance::Stale);
    assert!(!counter.is_running());
    assert_eq!(counter.resume(counter.generation()), Advance::Idle);
}

#[test]
fn test_configure_cancels_active_run() {
    let mut counter = counter(3);
    let generation = counter.start();
    step(&mut counter, generation);

    counter.configure(GridConfig::new(2, Duration::from_millis(100)).unwrap());
    assert_eq!(counter.resume(generation), Advance::Stale);
    assert!(counter.history().is_empty());
    assert_eq!(counter.config().grid_size(), 2);

    assert_eq!(counter.run(|_| {}), 2);
}

#[test]
fn test_generations_distinct_across_counters() {
    let mut a = counter(2);
    let mut b = counter(2);
    let ga = a.start();
    let gb = b.start();
    assert_ne!(ga, gb);
    assert_eq!(b.resume(ga), Advance::Stale);
    assert_eq!(a.resume(gb), Advance::Stale);
}

#[test]
fn test_finished_is_sticky() {
    let mut counter = counter(2);
    let generation = counter.start();
    let total = loop {
        match counter.resume(generation) {
            Advance::Step(_) => {}
            Advance::Finished(total) => break total,
            other => panic!("unexpected {:?}", other),
        }
    };
    assert_eq!(total, 2);
    assert_eq!(counter.resume(generation), Advance::Finished(2));
}
