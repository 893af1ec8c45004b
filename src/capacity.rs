// src/capacity.rs

//! The per-row capacity rule.
//!
//! Only the first `capacity` cells of a row take part in anything derived
//! from that row. Assignment and every choice-aggregation pass go through
//! `capacity_bounded`, so they all see the same row prefix.

use std::sync::Arc;

use crate::capability::SourceCell;
use crate::hierarchy::Matrix;

/// Yields at most the first `capacity` cells of `row`, in row order.
pub fn capacity_bounded(
    row: &[Arc<dyn SourceCell>],
    capacity: usize,
) -> impl Iterator<Item = &Arc<dyn SourceCell>> + '_ {
    row.iter().take(capacity)
}

/// Every capacity-bounded cell of the matrix, rows in order.
pub fn bounded_cells(
    matrix: &Matrix,
    capacity: usize,
) -> impl Iterator<Item = &Arc<dyn SourceCell>> + '_ {
    matrix
        .iter()
        .flat_map(move |row| capacity_bounded(row, capacity))
}
