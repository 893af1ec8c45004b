// src/hierarchy.rs

//! The source hierarchy as seen by the assigner: an ordered list of rows,
//! each an ordered list of cells. Resolving the hierarchy is the job of a
//! `HierarchyResolver`; this module only defines the shape and a couple of
//! simple resolvers.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::capability::SourceCell;

/// One prospective subplot.
pub type Row = Vec<Arc<dyn SourceCell>>;

/// Every prospective subplot, in display order.
pub type Matrix = Vec<Row>;

/// Turns a root component into the rows to plot.
pub trait HierarchyResolver: Send + Sync {
    /// `use_ordinal_position` selects grouping by ordinal position within
    /// each child rather than by child.
    fn resolve_matrix(&self, root: &dyn SourceCell, use_ordinal_position: bool) -> Matrix;
}

/// A resolver that always returns the same rows.
#[derive(Debug, Clone, Default)]
pub struct FixedMatrix {
    rows: Matrix,
}

impl FixedMatrix {
    pub fn new(rows: Matrix) -> Self {
        FixedMatrix { rows }
    }
}

impl HierarchyResolver for FixedMatrix {
    fn resolve_matrix(&self, _root: &dyn SourceCell, _use_ordinal_position: bool) -> Matrix {
        self.rows.clone()
    }
}

/// A resolver whose rows can be replaced at runtime, for hosts that edit the
/// hierarchy and then call `notify_feeds_changed`.
#[derive(Debug, Default)]
pub struct SwappableMatrix {
    ordinal: RwLock<Matrix>,
    by_child: RwLock<Matrix>,
}

impl SwappableMatrix {
    pub fn new(ordinal: Matrix, by_child: Matrix) -> Self {
        SwappableMatrix {
            ordinal: RwLock::new(ordinal),
            by_child: RwLock::new(by_child),
        }
    }

    pub fn replace(&self, ordinal: Matrix, by_child: Matrix) {
        *self.ordinal.write() = ordinal;
        *self.by_child.write() = by_child;
    }
}

impl HierarchyResolver for SwappableMatrix {
    fn resolve_matrix(&self, _root: &dyn SourceCell, use_ordinal_position: bool) -> Matrix {
        if use_ordinal_position {
            self.ordinal.read().clone()
        } else {
            self.by_child.read().clone()
        }
    }
}

/// String-valued view configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewProperties {
    values: HashMap<String, String>,
}

impl ViewProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Absent or empty means true; otherwise only a case-insensitive "true"
    /// is true.
    pub fn flag_or_true(&self, key: &str) -> bool {
        match self.get(key) {
            None => true,
            Some(v) if v.is_empty() => true,
            Some(v) => v.eq_ignore_ascii_case("true"),
        }
    }
}
