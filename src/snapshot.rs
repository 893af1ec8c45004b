// src/snapshot.rs

//! The published result of a recomputation and the slot it lives in.
//!
//! A `PlotSnapshot` bundles everything derived from one walk of the
//! hierarchy. It is built completely by the writer and then swapped into the
//! `SnapshotSlot` in one step, so a reader on any thread sees either the
//! previous snapshot or the new one.

use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use crate::assignment::AssignmentPlan;
use crate::capability::FeedFilterProvider;
use crate::choices::ChoiceSets;
use crate::consensus::resolve_filter_consensus;
use crate::feed::FeedDescriptor;
use crate::hierarchy::Matrix;

/// Everything derived from one hierarchy walk.
#[derive(Debug, Clone, Default)]
pub struct PlotSnapshot {
    /// Increases by one with every publication; 0 is never published.
    pub generation: u64,
    pub plan: AssignmentPlan,
    pub choices: ChoiceSets,
    pub filter: Option<Arc<dyn FeedFilterProvider>>,
}

impl PlotSnapshot {
    pub fn compute(matrix: &Matrix, capacity: usize, generation: u64) -> Self {
        let plan = AssignmentPlan::build(matrix, capacity);
        let choices = ChoiceSets::aggregate(matrix, capacity);
        let filter = resolve_filter_consensus(&plan.components);
        PlotSnapshot {
            generation,
            plan,
            choices,
            filter,
        }
    }

    pub fn visible_feeds(&self) -> &[Arc<FeedDescriptor>] {
        &self.plan.visible
    }

    pub fn has_feeds(&self) -> bool {
        self.plan.has_feeds()
    }
}

/// Single-slot holder for the current snapshot.
///
/// Reads take the slot lock only long enough to clone the `Arc`. Writers are
/// serialized by a separate lock so recomputation never runs twice at once.
#[derive(Debug, Default)]
pub struct SnapshotSlot {
    current: RwLock<Option<Arc<PlotSnapshot>>>,
    writer: Mutex<u64>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The published snapshot, if any recomputation has happened.
    pub fn load(&self) -> Option<Arc<PlotSnapshot>> {
        self.current.read().clone()
    }

    /// Returns the published snapshot if it has feeds; otherwise recomputes
    /// with `compute` and publishes the result.
    ///
    /// Concurrent callers that find the slot empty wait for one another; a
    /// caller that waited while another published returns that snapshot
    /// instead of computing again.
    pub fn get_or_recompute<F>(&self, compute: F) -> Arc<PlotSnapshot>
    where
        F: FnOnce(u64) -> PlotSnapshot,
    {
        let seen = match self.load() {
            Some(snapshot) if snapshot.has_feeds() => return snapshot,
            Some(snapshot) => snapshot.generation,
            None => 0,
        };

        let mut generation = self.writer.lock();
        if *generation != seen {
            if let Some(snapshot) = self.load() {
                debug!(
                    "Snapshot {} published while waiting; skipping recompute.",
                    snapshot.generation
                );
                return snapshot;
            }
        }
        self.publish_locked(&mut generation, compute)
    }

    /// Recomputes unconditionally and publishes the result.
    pub fn recompute<F>(&self, compute: F) -> Arc<PlotSnapshot>
    where
        F: FnOnce(u64) -> PlotSnapshot,
    {
        let mut generation = self.writer.lock();
        self.publish_locked(&mut generation, compute)
    }

    fn publish_locked<F>(&self, generation: &mut u64, compute: F) -> Arc<PlotSnapshot>
    where
        F: FnOnce(u64) -> PlotSnapshot,
    {
        // Keep the counter equal to the published generation if compute unwinds.
        let next = *generation + 1;
        let snapshot = Arc::new(compute(next));
        *self.current.write() = Some(snapshot.clone());
        *generation = next;
        info!(
            "Published snapshot {}: {} subplot(s), {} visible feed(s).",
            snapshot.generation,
            snapshot.plan.subplot_count(),
            snapshot.visible_feeds().len()
        );
        snapshot
    }
}
