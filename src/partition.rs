// src/partition.rs

//! Turns an assignment plan into calls on the rendering surface.
//!
//! Two strategies exist and exactly one runs per pass:
//!
//! * value axis: one subplot per row, each kept feed added to its row's
//!   subplot, with single-feed subplots receiving the root augmentation;
//! * time as shared axis: everything lands on subplot 0, each row's first
//!   feed acting as the independent variable for the others in that row,
//!   with a single emission budget shared by all rows.

use log::{debug, trace};
use std::sync::Arc;

use crate::assignment::AssignmentPlan;
use crate::capability::{PlotAugmentation, SourceCell};
use crate::config::PlotConfig;
use crate::surface::{replay, AxisOrientation, LegendEntry, RenderSurface, SeriesLabel, SurfaceCall};

/// The strategy chosen for one partitioning pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisMode {
    ValueAxis { use_long_names: bool },
    TimeAsSharedAxis { separator: String },
}

impl AxisMode {
    pub fn select(surface: &dyn RenderSurface, config: &PlotConfig) -> Self {
        match surface.axis_orientation() {
            AxisOrientation::ValueAxis => AxisMode::ValueAxis {
                use_long_names: surface.use_long_names(),
            },
            AxisOrientation::TimeAsSharedAxis => AxisMode::TimeAsSharedAxis {
                separator: config.non_time_feed_separator.clone(),
            },
        }
    }
}

/// Calls for the value-axis strategy. Rows are already capacity-bounded by
/// the builder.
pub fn value_axis_calls(
    plan: &AssignmentPlan,
    augmentation: Option<&Arc<dyn PlotAugmentation>>,
    use_long_names: bool,
) -> Vec<SurfaceCall> {
    let mut calls = Vec::new();

    for subplot in &plan.subplots {
        for feed in &subplot.feeds {
            calls.push(SurfaceCall::AddSeries {
                subplot: subplot.row,
                id: feed.subscription_id.clone(),
                label: SeriesLabel::DisplayName(feed.display_name(use_long_names).to_string()),
            });
        }

        if subplot.len() == 1 {
            if let Some(augmentation) = augmentation {
                calls.push(SurfaceCall::SetAugmentation {
                    subplot: subplot.row,
                    augmentation: augmentation.clone(),
                });
            }
        }
    }

    calls
}

/// Calls for the shared-axis strategy.
///
/// Within a row, the first feed is emitted under its own id and every later
/// feed as `first + separator + id`. At most `capacity` series are emitted
/// over the whole plan.
pub fn time_axis_calls(plan: &AssignmentPlan, separator: &str, capacity: usize) -> Vec<SurfaceCall> {
    let mut calls = Vec::new();

    'rows: for subplot in &plan.subplots {
        let mut independent: Option<&str> = None;
        for feed in &subplot.feeds {
            if calls.len() >= capacity {
                trace!("Shared-axis budget of {} reached.", capacity);
                break 'rows;
            }
            let id = match independent {
                None => {
                    independent = Some(feed.subscription_id.as_str());
                    feed.subscription_id.clone()
                }
                Some(anchor) => format!("{anchor}{separator}{}", feed.subscription_id),
            };
            let legend = match plan.components.component_for(&feed.subscription_id) {
                Some(component) => LegendEntry::for_component(component.as_ref()),
                None => LegendEntry {
                    component_id: feed.owner_id.clone(),
                    text: feed.legend_text.clone(),
                },
            };
            calls.push(SurfaceCall::AddSeries {
                subplot: 0,
                id,
                label: SeriesLabel::Legend(legend),
            });
        }
    }

    calls
}

/// Runs the selected strategy for `plan` against `surface`.
///
/// Returns the number of calls made on the surface.
pub fn partition(
    plan: &AssignmentPlan,
    root: &dyn SourceCell,
    surface: &mut dyn RenderSurface,
    config: &PlotConfig,
) -> usize {
    let mode = AxisMode::select(surface, config);
    debug!(
        "Partitioning {} subplot(s) in {:?} mode.",
        plan.subplot_count(),
        mode
    );

    let calls = match mode {
        AxisMode::ValueAxis { use_long_names } => {
            let augmentation = root.augmentation();
            if let Some(augmentation) = &augmentation {
                augmentation.set_feeds(&plan.components.feeds());
            }
            value_axis_calls(plan, augmentation.as_ref(), use_long_names)
        }
        AxisMode::TimeAsSharedAxis { separator } => {
            time_axis_calls(plan, &separator, config.max_items_per_plot)
        }
    };

    let count = calls.len();
    replay(calls, surface);
    count
}
