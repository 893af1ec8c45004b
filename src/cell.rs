// src/cell.rs

//! In-memory implementations of the capability traits.
//!
//! `StaticCell` is a source cell whose capabilities are fixed at construction
//! time. It backs the JSON hierarchy manifest and the tests; real hosts are
//! expected to implement `SourceCell` on their own component types.

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::capability::{FeedFilterProvider, FeedInfoProvider, PlotAugmentation, SourceCell};
use crate::feed::{FeedDescriptor, FeedInfo};

#[derive(Debug, Clone)]
pub struct StaticCell {
    id: String,
    display_name: String,
    primary: Option<Arc<FeedDescriptor>>,
    secondary: Vec<Arc<FeedDescriptor>>,
    feed_info: Option<Arc<dyn FeedInfoProvider>>,
    filter: Option<Arc<dyn FeedFilterProvider>>,
    augmentation: Option<Arc<dyn PlotAugmentation>>,
}

impl StaticCell {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        StaticCell {
            display_name: id.clone(),
            id,
            primary: None,
            secondary: Vec::new(),
            feed_info: None,
            filter: None,
            augmentation: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Sets the primary feed. The descriptor is stamped with this cell as its
    /// owner unless it already names one.
    pub fn with_feed(mut self, feed: FeedDescriptor) -> Self {
        self.primary = Some(Arc::new(self.stamp_owner(feed)));
        self
    }

    /// Adds a feed that is only visible through `feeds()`.
    pub fn with_secondary_feed(mut self, feed: FeedDescriptor) -> Self {
        let feed = self.stamp_owner(feed);
        self.secondary.push(Arc::new(feed));
        self
    }

    pub fn with_feed_info(mut self, provider: Arc<dyn FeedInfoProvider>) -> Self {
        self.feed_info = Some(provider);
        self
    }

    pub fn with_filter(mut self, filter: Arc<dyn FeedFilterProvider>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_augmentation(mut self, augmentation: Arc<dyn PlotAugmentation>) -> Self {
        self.augmentation = Some(augmentation);
        self
    }

    pub fn into_shared(self) -> Arc<dyn SourceCell> {
        Arc::new(self)
    }

    fn stamp_owner(&self, feed: FeedDescriptor) -> FeedDescriptor {
        if feed.owner_id.is_empty() {
            feed.owned_by(self.id.clone())
        } else {
            feed
        }
    }
}

impl SourceCell for StaticCell {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn feed(&self) -> Option<Arc<FeedDescriptor>> {
        self.primary.clone()
    }

    fn feeds(&self) -> Vec<Arc<FeedDescriptor>> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .cloned()
            .collect()
    }

    fn feed_info_provider(&self) -> Option<Arc<dyn FeedInfoProvider>> {
        self.feed_info.clone()
    }

    fn filter_provider(&self) -> Option<Arc<dyn FeedFilterProvider>> {
        self.filter.clone()
    }

    fn augmentation(&self) -> Option<Arc<dyn PlotAugmentation>> {
        self.augmentation.clone()
    }
}

/// A filter identified only by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFilter {
    id: String,
}

impl NamedFilter {
    pub fn new(id: impl Into<String>) -> Self {
        NamedFilter { id: id.into() }
    }

    pub fn shared(id: impl Into<String>) -> Arc<dyn FeedFilterProvider> {
        Arc::new(Self::new(id))
    }
}

impl FeedFilterProvider for NamedFilter {
    fn filter_id(&self) -> &str {
        &self.id
    }
}

/// Feed info looked up by subscription id.
#[derive(Debug, Clone, Default)]
pub struct FeedInfoTable {
    entries: IndexMap<String, FeedInfo>,
}

impl FeedInfoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, subscription_id: impl Into<String>, info: FeedInfo) -> Self {
        self.entries.insert(subscription_id.into(), info);
        self
    }

    pub fn into_shared(self) -> Arc<dyn FeedInfoProvider> {
        Arc::new(self)
    }
}

impl FeedInfoProvider for FeedInfoTable {
    fn feed_info(&self, feed: &FeedDescriptor) -> Option<FeedInfo> {
        self.entries.get(&feed.subscription_id).cloned()
    }
}

/// Augmentation that remembers the feeds it was handed.
#[derive(Debug, Default)]
pub struct RecordingAugmentation {
    name: String,
    received: Mutex<Vec<Vec<String>>>,
}

impl RecordingAugmentation {
    pub fn new(name: impl Into<String>) -> Self {
        RecordingAugmentation {
            name: name.into(),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Subscription ids received by each `set_feeds` call, in call order.
    pub fn received(&self) -> Vec<Vec<String>> {
        self.received.lock().clone()
    }
}

impl PlotAugmentation for RecordingAugmentation {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_feeds(&self, feeds: &[Arc<FeedDescriptor>]) {
        let ids = feeds.iter().map(|f| f.subscription_id.clone()).collect();
        self.received.lock().push(ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn feeds_lists_primary_first() {
        let cell = StaticCell::new("c")
            .with_secondary_feed(FeedDescriptor::new("extra"))
            .with_feed(FeedDescriptor::new("main"));
        let ids: Vec<_> = cell.feeds().iter().map(|f| f.subscription_id.clone()).collect();
        assert_eq!(ids, vec!["main", "extra"]);
    }

    #[test]
    fn feeds_are_stamped_with_owner() {
        let cell = StaticCell::new("owner")
            .with_feed(FeedDescriptor::new("a"))
            .with_secondary_feed(FeedDescriptor::new("b").owned_by("elsewhere"));
        let feeds = cell.feeds();
        assert_eq!(feeds[0].owner_id, "owner");
        assert_eq!(feeds[1].owner_id, "elsewhere");
    }

    #[test]
    fn named_filters_compare_by_id() {
        let a = NamedFilter::shared("limit");
        let b = NamedFilter::shared("limit");
        let c = NamedFilter::shared("other");
        assert!(*a == *b);
        assert!(*a != *c);
    }

    #[test]
    fn filter_description_defaults_to_id() {
        assert_eq!(NamedFilter::shared("limit").description(), "limit");
    }
}
