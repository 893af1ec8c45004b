// src/assignment.rs

//! Builds the assignment plan: which feeds go onto which subplot.
//!
//! Each row of the matrix becomes one subplot. Within a row, the
//! capacity-bounded cells are classified and only plottable feeds are kept,
//! in row order. The builder is pure; publishing the result is left to the
//! snapshot layer.

use indexmap::IndexMap;
use log::{debug, trace};
use std::sync::Arc;

use crate::capability::SourceCell;
use crate::capacity::capacity_bounded;
use crate::feed::{plottable_feed, FeedDescriptor};
use crate::hierarchy::Matrix;

/// The feeds kept for one row.
#[derive(Debug, Clone, Default)]
pub struct SubplotAssignment {
    pub row: usize,
    pub feeds: Vec<Arc<FeedDescriptor>>,
}

impl SubplotAssignment {
    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    pub fn subscription_ids(&self) -> impl Iterator<Item = &str> {
        self.feeds.iter().map(|f| f.subscription_id.as_str())
    }
}

/// Bidirectional lookup between kept feeds and the cells they came from.
///
/// Keyed by subscription id. The first cell to contribute a feed owns it;
/// later occurrences of the same id do not rebind it.
#[derive(Debug, Clone, Default)]
pub struct ComponentFeedMap {
    by_feed: IndexMap<String, (Arc<FeedDescriptor>, Arc<dyn SourceCell>)>,
    by_component: IndexMap<String, (Arc<dyn SourceCell>, Vec<String>)>,
}

impl ComponentFeedMap {
    pub fn insert(&mut self, feed: Arc<FeedDescriptor>, component: Arc<dyn SourceCell>) {
        if self.by_feed.contains_key(&feed.subscription_id) {
            trace!(
                "Feed '{}' already mapped; keeping first owner.",
                feed.subscription_id
            );
            return;
        }
        self.by_component
            .entry(component.id().to_string())
            .or_insert_with(|| (component.clone(), Vec::new()))
            .1
            .push(feed.subscription_id.clone());
        self.by_feed
            .insert(feed.subscription_id.clone(), (feed, component));
    }

    pub fn component_for(&self, subscription_id: &str) -> Option<&Arc<dyn SourceCell>> {
        self.by_feed.get(subscription_id).map(|(_, c)| c)
    }

    pub fn feeds_for(&self, component_id: &str) -> &[String] {
        self.by_component
            .get(component_id)
            .map(|(_, feeds)| feeds.as_slice())
            .unwrap_or(&[])
    }

    /// Every mapped feed, in first-insertion order.
    pub fn feeds(&self) -> Vec<Arc<FeedDescriptor>> {
        self.by_feed.values().map(|(f, _)| f.clone()).collect()
    }

    /// Each distinct component once, in first-insertion order.
    pub fn components(&self) -> impl Iterator<Item = &Arc<dyn SourceCell>> {
        self.by_component.values().map(|(c, _)| c)
    }

    pub fn len(&self) -> usize {
        self.by_feed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_feed.is_empty()
    }
}

/// The complete per-row assignment.
#[derive(Debug, Clone, Default)]
pub struct AssignmentPlan {
    pub subplots: Vec<SubplotAssignment>,
    /// Every kept feed in assignment order.
    pub visible: Vec<Arc<FeedDescriptor>>,
    pub predictive: Vec<Arc<FeedDescriptor>>,
    pub components: ComponentFeedMap,
}

impl AssignmentPlan {
    /// Builds the plan for `matrix`, keeping at most `capacity` cells per row.
    pub fn build(matrix: &Matrix, capacity: usize) -> Self {
        let mut plan = AssignmentPlan::default();

        for (row_index, row) in matrix.iter().enumerate() {
            let mut subplot = SubplotAssignment {
                row: row_index,
                feeds: Vec::new(),
            };

            for cell in capacity_bounded(row, capacity) {
                let Some(feed) = plottable_feed(cell.as_ref()) else {
                    trace!("Row {}: cell '{}' has no plottable feed.", row_index, cell.id());
                    continue;
                };
                if feed.is_prediction {
                    plan.predictive.push(feed.clone());
                }
                plan.visible.push(feed.clone());
                plan.components.insert(feed.clone(), cell.clone());
                subplot.feeds.push(feed);
            }

            debug!("Row {}: {} feed(s) assigned.", row_index, subplot.len());
            plan.subplots.push(subplot);
        }

        plan
    }

    pub fn subplot_count(&self) -> usize {
        self.subplots.len()
    }

    pub fn has_feeds(&self) -> bool {
        !self.visible.is_empty()
    }
}
