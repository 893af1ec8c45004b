// src/assigner.rs

//! `FeedAssigner` is the entry point hosts talk to.
//!
//! It owns the root component, the resolver that turns the root into rows,
//! the view properties that pick the grouping, and the snapshot slot. All
//! derived state (plan, choices, filter consensus) is recomputed together and
//! published as one `PlotSnapshot`.

use log::debug;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use crate::capability::{FeedFilterProvider, SourceCell};
use crate::config::{PlotConfig, CONFIG};
use crate::feed::{FeedDescriptor, FeedInfo};
use crate::hierarchy::{HierarchyResolver, ViewProperties};
use crate::partition::partition;
use crate::snapshot::{PlotSnapshot, SnapshotSlot};
use crate::surface::RenderSurface;

/// Errors returned by `FeedAssigner`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignError {
    /// Subplot assignment was requested before any plan was computed.
    #[error("no assignment plan has been computed yet")]
    NotReady,
}

pub struct FeedAssigner {
    root: Arc<dyn SourceCell>,
    resolver: Arc<dyn HierarchyResolver>,
    view: RwLock<ViewProperties>,
    config: PlotConfig,
    slot: SnapshotSlot,
}

impl FeedAssigner {
    /// Creates an assigner using the global plot configuration.
    pub fn new(
        root: Arc<dyn SourceCell>,
        resolver: Arc<dyn HierarchyResolver>,
        view: ViewProperties,
    ) -> Self {
        Self::with_config(root, resolver, view, CONFIG.plot.clone())
    }

    pub fn with_config(
        root: Arc<dyn SourceCell>,
        resolver: Arc<dyn HierarchyResolver>,
        view: ViewProperties,
        config: PlotConfig,
    ) -> Self {
        FeedAssigner {
            root,
            resolver,
            view: RwLock::new(view),
            config,
            slot: SnapshotSlot::new(),
        }
    }

    /// Changes a view property. Takes effect at the next recomputation.
    pub fn set_view_property(&self, key: impl Into<String>, value: impl Into<String>) {
        self.view.write().set(key, value);
    }

    fn use_ordinal_position(&self) -> bool {
        self.view
            .read()
            .flag_or_true(&self.config.group_by_ordinal_position_key)
    }

    fn compute(&self, generation: u64) -> PlotSnapshot {
        let use_ordinal_position = self.use_ordinal_position();
        let matrix = self
            .resolver
            .resolve_matrix(self.root.as_ref(), use_ordinal_position);
        debug!(
            "Resolved matrix with {} row(s) (ordinal grouping: {}).",
            matrix.len(),
            use_ordinal_position
        );
        PlotSnapshot::compute(&matrix, self.config.max_items_per_plot, generation)
    }

    /// The published snapshot, recomputing first if it has no feeds.
    pub fn snapshot(&self) -> Arc<PlotSnapshot> {
        self.slot.get_or_recompute(|generation| self.compute(generation))
    }

    /// The published snapshot without triggering a recomputation.
    pub fn published(&self) -> Option<Arc<PlotSnapshot>> {
        self.slot.load()
    }

    /// Recomputes all derived state from the current hierarchy.
    pub fn notify_feeds_changed(&self) {
        self.slot.recompute(|generation| self.compute(generation));
    }

    pub fn visible_feeds(&self) -> Vec<Arc<FeedDescriptor>> {
        self.snapshot().visible_feeds().to_vec()
    }

    pub fn predictive_feeds(&self) -> Vec<Arc<FeedDescriptor>> {
        self.snapshot().plan.predictive.clone()
    }

    pub fn time_system_choices(&self) -> Vec<String> {
        self.snapshot().choices.time_systems.iter().cloned().collect()
    }

    /// The first available time system, if any.
    pub fn default_time_system(&self) -> Option<String> {
        self.snapshot()
            .choices
            .default_time_system()
            .map(str::to_owned)
    }

    pub fn time_format_choices(&self) -> Vec<String> {
        self.snapshot().choices.time_formats.iter().cloned().collect()
    }

    pub fn feed_info_choices(&self) -> HashSet<FeedInfo> {
        self.snapshot().choices.feed_infos.clone()
    }

    /// The filter shared by every assigned component, as of the last
    /// recomputation.
    pub fn filter_consensus(&self) -> Option<Arc<dyn FeedFilterProvider>> {
        self.published().and_then(|snapshot| snapshot.filter.clone())
    }

    pub fn subplot_count(&self) -> usize {
        self.published()
            .map_or(0, |snapshot| snapshot.plan.subplot_count())
    }

    pub fn has_feeds(&self) -> bool {
        self.published().is_some_and(|snapshot| snapshot.has_feeds())
    }

    /// Drives `surface` from the current plan.
    ///
    /// Returns the number of calls made on the surface, or `NotReady` if no
    /// plan has been computed yet.
    pub fn assign_to_subplots(&self, surface: &mut dyn RenderSurface) -> Result<usize, AssignError> {
        let snapshot = self.published().ok_or(AssignError::NotReady)?;
        Ok(partition(
            &snapshot.plan,
            self.root.as_ref(),
            surface,
            &self.config,
        ))
    }
}
