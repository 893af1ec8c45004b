//! Readers on several threads share one published snapshot.

mod support;

use std::sync::{Arc, Barrier};
use std::thread;

use support::assigner_harness::{numeric, AssignerHarness};
use test_log::test;

#[test]
fn concurrent_first_reads_compute_once() {
    let harness = Arc::new(AssignerHarness::new(
        vec![vec![numeric("A"), numeric("B")], vec![numeric("C")]],
        10,
    ));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let harness = Arc::clone(&harness);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                harness.assigner.snapshot()
            })
        })
        .collect();

    let snapshots: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("reader thread panicked"))
        .collect();

    // The writer lock lets exactly one reader compute; the rest reuse it.
    for snapshot in &snapshots {
        assert!(Arc::ptr_eq(snapshot, &snapshots[0]));
        assert_eq!(snapshot.generation, 1);
    }
}

#[test]
fn readers_never_see_a_partial_snapshot() {
    let harness = Arc::new(AssignerHarness::new(vec![vec![numeric("A")]], 10));
    harness.assigner.notify_feeds_changed();

    let writer = {
        let harness = Arc::clone(&harness);
        thread::spawn(move || {
            for i in 0..50 {
                let rows = (0..=i % 4)
                    .map(|r| vec![numeric(&format!("R{r}-a")), numeric(&format!("R{r}-b"))])
                    .collect();
                harness.replace_rows(rows);
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let harness = Arc::clone(&harness);
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = harness.assigner.snapshot();
                    let assigned: usize = snapshot.plan.subplots.iter().map(|s| s.len()).sum();
                    assert_eq!(assigned, snapshot.plan.visible.len());
                    assert_eq!(snapshot.plan.components.len(), snapshot.plan.visible.len());
                }
            })
        })
        .collect();

    writer.join().expect("writer thread panicked");
    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
    assert_eq!(harness.assigner.subplot_count(), 2);
}
