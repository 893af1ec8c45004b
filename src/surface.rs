// src/surface.rs

//! The rendering surface the partitioner drives.
//!
//! The surface itself lives outside this crate. We only need to add series
//! to subplots, attach an augmentation to a subplot, and read two display
//! settings. Partitioning produces a list of `SurfaceCall`s first and replays
//! them afterwards, which keeps the strategies pure and lets tests compare
//! call lists directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::capability::{PlotAugmentation, SourceCell};

/// How the plot's non-value axis is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrientation {
    /// Time on one axis, one subplot per row.
    #[default]
    ValueAxis,
    /// Time is not an axis; every row shares a single plot whose other axis
    /// is the row's first feed.
    TimeAsSharedAxis,
}

/// Legend information for a series, derived from its owning component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub component_id: String,
    pub text: String,
}

impl LegendEntry {
    pub fn for_component(component: &dyn SourceCell) -> Self {
        LegendEntry {
            component_id: component.id().to_string(),
            text: component.display_name().to_string(),
        }
    }
}

/// What accompanies a series id when it is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesLabel {
    DisplayName(String),
    Legend(LegendEntry),
}

impl fmt::Display for SeriesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesLabel::DisplayName(name) => f.write_str(name),
            SeriesLabel::Legend(entry) => write!(f, "{} [{}]", entry.text, entry.component_id),
        }
    }
}

/// Target of the partitioner.
pub trait RenderSurface {
    fn add_series(&mut self, subplot: usize, id: &str, label: SeriesLabel);

    fn set_augmentation(&mut self, subplot: usize, augmentation: Arc<dyn PlotAugmentation>);

    fn axis_orientation(&self) -> AxisOrientation;

    /// Whether series are labelled with canonical names instead of legend text.
    fn use_long_names(&self) -> bool;
}

/// One call to make on a `RenderSurface`.
#[derive(Debug, Clone)]
pub enum SurfaceCall {
    AddSeries {
        subplot: usize,
        id: String,
        label: SeriesLabel,
    },
    SetAugmentation {
        subplot: usize,
        augmentation: Arc<dyn PlotAugmentation>,
    },
}

impl SurfaceCall {
    pub fn apply(self, surface: &mut dyn RenderSurface) {
        match self {
            SurfaceCall::AddSeries { subplot, id, label } => {
                surface.add_series(subplot, &id, label)
            }
            SurfaceCall::SetAugmentation {
                subplot,
                augmentation,
            } => surface.set_augmentation(subplot, augmentation),
        }
    }
}

impl PartialEq for SurfaceCall {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                SurfaceCall::AddSeries { subplot, id, label },
                SurfaceCall::AddSeries {
                    subplot: o_subplot,
                    id: o_id,
                    label: o_label,
                },
            ) => subplot == o_subplot && id == o_id && label == o_label,
            (
                SurfaceCall::SetAugmentation {
                    subplot,
                    augmentation,
                },
                SurfaceCall::SetAugmentation {
                    subplot: o_subplot,
                    augmentation: o_augmentation,
                },
            ) => subplot == o_subplot && Arc::ptr_eq(augmentation, o_augmentation),
            _ => false,
        }
    }
}

/// Replays `calls` onto `surface` in order.
pub fn replay(calls: Vec<SurfaceCall>, surface: &mut dyn RenderSurface) {
    for call in calls {
        call.apply(surface);
    }
}
