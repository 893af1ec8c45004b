// src/capability.rs

//! Capability traits exposed by source cells.
//!
//! The hierarchy hands us opaque cells. Each cell declares which capabilities
//! it supports by overriding the corresponding lookup on `SourceCell`; the
//! defaults report "absent", which the rest of the crate treats as "no
//! contribution" rather than as an error.

use std::fmt::Debug;
use std::sync::Arc;

use crate::feed::{FeedDescriptor, FeedInfo};

/// An opaque node of the source hierarchy.
pub trait SourceCell: Debug + Send + Sync {
    /// Stable identity of the cell.
    fn id(&self) -> &str;

    /// Human-readable name, used when building legend entries.
    fn display_name(&self) -> &str {
        self.id()
    }

    /// The primary feed of this cell, used for assignment and for the
    /// time-system / time-format choices.
    fn feed(&self) -> Option<Arc<FeedDescriptor>> {
        None
    }

    /// Every feed this cell can produce. Used by the feed-info pass.
    fn feeds(&self) -> Vec<Arc<FeedDescriptor>> {
        self.feed().into_iter().collect()
    }

    fn feed_info_provider(&self) -> Option<Arc<dyn FeedInfoProvider>> {
        None
    }

    fn filter_provider(&self) -> Option<Arc<dyn FeedFilterProvider>> {
        None
    }

    fn augmentation(&self) -> Option<Arc<dyn PlotAugmentation>> {
        None
    }
}

/// Reports auxiliary information about feeds.
pub trait FeedInfoProvider: Debug + Send + Sync {
    fn feed_info(&self, feed: &FeedDescriptor) -> Option<FeedInfo>;
}

/// A filtering capability shared by the components feeding a plot.
///
/// Two providers are considered equal when their `filter_id`s match.
pub trait FeedFilterProvider: Debug + Send + Sync {
    fn filter_id(&self) -> &str;

    /// Short description suitable for a filter editor title.
    fn description(&self) -> &str {
        self.filter_id()
    }
}

impl PartialEq for dyn FeedFilterProvider {
    fn eq(&self, other: &Self) -> bool {
        self.filter_id() == other.filter_id()
    }
}

/// Extra plot decoration supplied by the root component.
///
/// Implementations are shared across threads and use interior mutability
/// for the feed list they receive.
pub trait PlotAugmentation: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Receives every feed that ended up on the plot.
    fn set_feeds(&self, feeds: &[Arc<FeedDescriptor>]);
}
