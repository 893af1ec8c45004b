// src/feed.rs

//! Feed descriptors and the feed classifier.
//!
//! A `FeedDescriptor` is the resolved, immutable description of one data feed
//! as exposed by a source cell. Descriptors are shared as `Arc<FeedDescriptor>`
//! so the assignment plan, the predictive subset and the published snapshot
//! can all point at the same value without copying it.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::capability::SourceCell;

/// The value type carried by a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedType {
    /// Integer or floating point samples.
    #[default]
    Numeric,
    /// Textual samples. Never plotted.
    String,
    /// Anything else the source reports (enumerations, raw words, ...).
    Other,
}

/// Resolved description of a single feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDescriptor {
    /// Subscription id; this is the feed's identity.
    pub subscription_id: String,
    #[serde(default)]
    pub feed_type: FeedType,
    /// True when the feed carries forecast values rather than measurements.
    #[serde(default)]
    pub is_prediction: bool,
    pub canonical_name: String,
    pub legend_text: String,
    #[serde(default)]
    pub time_systems: Vec<String>,
    #[serde(default)]
    pub time_formats: Vec<String>,
    /// Id of the source cell that owns this feed.
    #[serde(default)]
    pub owner_id: String,
}

impl FeedDescriptor {
    /// Creates a numeric, non-predictive descriptor whose canonical name and
    /// legend text both default to the subscription id.
    pub fn new(subscription_id: impl Into<String>) -> Self {
        let subscription_id = subscription_id.into();
        FeedDescriptor {
            canonical_name: subscription_id.clone(),
            legend_text: subscription_id.clone(),
            subscription_id,
            feed_type: FeedType::Numeric,
            is_prediction: false,
            time_systems: Vec::new(),
            time_formats: Vec::new(),
            owner_id: String::new(),
        }
    }

    pub fn with_type(mut self, feed_type: FeedType) -> Self {
        self.feed_type = feed_type;
        self
    }

    pub fn with_prediction(mut self, is_prediction: bool) -> Self {
        self.is_prediction = is_prediction;
        self
    }

    pub fn with_names(mut self, canonical: impl Into<String>, legend: impl Into<String>) -> Self {
        self.canonical_name = canonical.into();
        self.legend_text = legend.into();
        self
    }

    pub fn with_time_systems<I, S>(mut self, systems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_systems = systems.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_time_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn owned_by(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    /// A descriptor is plottable unless it carries textual samples.
    pub fn is_plottable(&self) -> bool {
        self.feed_type != FeedType::String
    }

    /// Name shown next to the series: canonical name when long names are
    /// requested, legend text otherwise.
    pub fn display_name(&self, use_long_names: bool) -> &str {
        if use_long_names {
            &self.canonical_name
        } else {
            &self.legend_text
        }
    }
}

/// A metadata record a feed-info provider can report for a feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedInfo {
    pub name: String,
    #[serde(default)]
    pub units: Option<String>,
}

impl FeedInfo {
    pub fn new(name: impl Into<String>, units: Option<&str>) -> Self {
        FeedInfo {
            name: name.into(),
            units: units.map(str::to_owned),
        }
    }
}

/// Returns the cell's primary feed descriptor, if any.
pub fn primary_feed(cell: &dyn SourceCell) -> Option<Arc<FeedDescriptor>> {
    cell.feed()
}

/// Returns the cell's primary feed descriptor only if it can be plotted.
pub fn plottable_feed(cell: &dyn SourceCell) -> Option<Arc<FeedDescriptor>> {
    primary_feed(cell).filter(|feed| feed.is_plottable())
}
