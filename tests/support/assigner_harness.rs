//! Test harness for driving a `FeedAssigner` end to end.
//!
//! Rows are described with small helper constructors and served through a
//! `SwappableMatrix`, so tests can edit the hierarchy and then notify the
//! assigner. `RecordingSurface` captures every call the partitioner makes.

use std::sync::Arc;

use plot_feeds::cell::{NamedFilter, RecordingAugmentation, StaticCell};
use plot_feeds::hierarchy::SwappableMatrix;
use plot_feeds::{
    AxisOrientation, FeedAssigner, FeedDescriptor, FeedType, Matrix, PlotAugmentation, PlotConfig,
    RenderSurface, SeriesLabel, SourceCell, SurfaceCall, ViewProperties,
};

pub struct AssignerHarness {
    pub assigner: FeedAssigner,
    pub matrix: Arc<SwappableMatrix>,
    pub augmentation: Arc<RecordingAugmentation>,
}

impl AssignerHarness {
    /// Harness whose rows are the same for both groupings.
    pub fn new(rows: Matrix, capacity: usize) -> Self {
        Self::with_groupings(rows.clone(), rows, capacity)
    }

    pub fn with_groupings(ordinal: Matrix, by_child: Matrix, capacity: usize) -> Self {
        let matrix = Arc::new(SwappableMatrix::new(ordinal, by_child));
        let augmentation = Arc::new(RecordingAugmentation::new("limit-lines"));
        let root = StaticCell::new("root")
            .with_augmentation(augmentation.clone())
            .into_shared();
        let config = PlotConfig {
            max_items_per_plot: capacity,
            ..PlotConfig::default()
        };
        let assigner = FeedAssigner::with_config(root, matrix.clone(), ViewProperties::new(), config);
        AssignerHarness {
            assigner,
            matrix,
            augmentation,
        }
    }

    /// Replaces the rows (both groupings) and notifies the assigner.
    pub fn replace_rows(&self, rows: Matrix) {
        self.matrix.replace(rows.clone(), rows);
        self.assigner.notify_feeds_changed();
    }

    pub fn visible_ids(&self) -> Vec<String> {
        ids(&self.assigner.visible_feeds())
    }

    pub fn subplot_ids(&self) -> Vec<Vec<String>> {
        self.assigner
            .snapshot()
            .plan
            .subplots
            .iter()
            .map(|s| s.subscription_ids().map(str::to_owned).collect())
            .collect()
    }
}

pub fn ids(feeds: &[Arc<FeedDescriptor>]) -> Vec<String> {
    feeds.iter().map(|f| f.subscription_id.clone()).collect()
}

pub fn numeric(id: &str) -> Arc<dyn SourceCell> {
    StaticCell::new(id)
        .with_feed(FeedDescriptor::new(id).with_time_systems(["GMT"]))
        .into_shared()
}

pub fn textual(id: &str, time_systems: &[&str]) -> Arc<dyn SourceCell> {
    StaticCell::new(id)
        .with_feed(
            FeedDescriptor::new(id)
                .with_type(FeedType::String)
                .with_time_systems(time_systems.iter().copied()),
        )
        .into_shared()
}

pub fn predicted(id: &str) -> Arc<dyn SourceCell> {
    StaticCell::new(id)
        .with_feed(FeedDescriptor::new(id).with_prediction(true))
        .into_shared()
}

pub fn filtered(id: &str, filter: &str) -> Arc<dyn SourceCell> {
    StaticCell::new(id)
        .with_feed(FeedDescriptor::new(id))
        .with_filter(NamedFilter::shared(filter))
        .into_shared()
}

/// A surface that records every call.
#[derive(Default)]
pub struct RecordingSurface {
    pub orientation: AxisOrientation,
    pub long_names: bool,
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn shared_axis() -> Self {
        RecordingSurface {
            orientation: AxisOrientation::TimeAsSharedAxis,
            ..Self::default()
        }
    }

    pub fn series(&self) -> Vec<(usize, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::AddSeries { subplot, id, .. } => Some((*subplot, id.clone())),
                SurfaceCall::SetAugmentation { .. } => None,
            })
            .collect()
    }

    pub fn augmented_subplots(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::SetAugmentation { subplot, .. } => Some(*subplot),
                SurfaceCall::AddSeries { .. } => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn add_series(&mut self, subplot: usize, id: &str, label: SeriesLabel) {
        self.calls.push(SurfaceCall::AddSeries {
            subplot,
            id: id.to_string(),
            label,
        });
    }

    fn set_augmentation(&mut self, subplot: usize, augmentation: Arc<dyn PlotAugmentation>) {
        self.calls.push(SurfaceCall::SetAugmentation {
            subplot,
            augmentation,
        });
    }

    fn axis_orientation(&self) -> AxisOrientation {
        self.orientation
    }

    fn use_long_names(&self) -> bool {
        self.long_names
    }
}
