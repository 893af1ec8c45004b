// src/manifest.rs

//! JSON description of a hierarchy, for the demo binary and tests.
//!
//! ```json
//! {
//!   "root": { "id": "plot", "augmentation": "limit-lines" },
//!   "rows": [
//!     [ { "id": "cell-1", "feed": { "subscription_id": "PUI-1", ... } } ]
//!   ]
//! }
//! ```
//!
//! `rows_by_child` is optional; when present it is what the resolver returns
//! while ordinal-position grouping is switched off.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::capability::SourceCell;
use crate::cell::{FeedInfoTable, NamedFilter, RecordingAugmentation, StaticCell};
use crate::feed::{FeedDescriptor, FeedInfo};
use crate::hierarchy::{FixedMatrix, HierarchyResolver, Matrix, SwappableMatrix};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyManifest {
    pub root: RootManifest,
    pub rows: Vec<Vec<CellManifest>>,
    pub rows_by_child: Option<Vec<Vec<CellManifest>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RootManifest {
    pub id: String,
    /// Name of a recording augmentation to attach to the root.
    pub augmentation: Option<String>,
}

impl Default for RootManifest {
    fn default() -> Self {
        RootManifest {
            id: "root".to_string(),
            augmentation: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellManifest {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub feed: Option<FeedDescriptor>,
    #[serde(default)]
    pub secondary_feeds: Vec<FeedDescriptor>,
    /// Feed info keyed by subscription id.
    #[serde(default)]
    pub feed_info: Option<IndexMap<String, FeedInfo>>,
    #[serde(default)]
    pub filter: Option<String>,
}

impl CellManifest {
    fn build(&self) -> Arc<dyn SourceCell> {
        let mut cell = StaticCell::new(self.id.clone());
        if let Some(name) = &self.display_name {
            cell = cell.with_display_name(name.clone());
        }
        if let Some(feed) = &self.feed {
            cell = cell.with_feed(feed.clone());
        }
        for feed in &self.secondary_feeds {
            cell = cell.with_secondary_feed(feed.clone());
        }
        if let Some(entries) = &self.feed_info {
            let table = entries
                .iter()
                .fold(FeedInfoTable::new(), |table, (id, info)| {
                    table.insert(id.clone(), info.clone())
                });
            cell = cell.with_feed_info(table.into_shared());
        }
        if let Some(filter) = &self.filter {
            cell = cell.with_filter(NamedFilter::shared(filter.clone()));
        }
        cell.into_shared()
    }
}

/// Live objects built from a manifest.
pub struct BuiltHierarchy {
    pub root: Arc<dyn SourceCell>,
    pub resolver: Arc<dyn HierarchyResolver>,
    pub augmentation: Option<Arc<RecordingAugmentation>>,
}

impl HierarchyManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read hierarchy manifest {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse hierarchy manifest {}", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn build(&self) -> BuiltHierarchy {
        let augmentation = self
            .root
            .augmentation
            .as_ref()
            .map(|name| Arc::new(RecordingAugmentation::new(name.clone())));

        let mut root = StaticCell::new(self.root.id.clone());
        if let Some(augmentation) = &augmentation {
            root = root.with_augmentation(augmentation.clone());
        }

        let ordinal = build_rows(&self.rows);
        let resolver: Arc<dyn HierarchyResolver> = match &self.rows_by_child {
            Some(by_child) => Arc::new(SwappableMatrix::new(ordinal, build_rows(by_child))),
            None => Arc::new(FixedMatrix::new(ordinal)),
        };

        BuiltHierarchy {
            root: root.into_shared(),
            resolver,
            augmentation,
        }
    }
}

fn build_rows(rows: &[Vec<CellManifest>]) -> Matrix {
    rows.iter()
        .map(|row| row.iter().map(CellManifest::build).collect())
        .collect()
}
