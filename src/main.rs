// src/main.rs

//! Demo driver: loads a hierarchy manifest, assigns its feeds and replays the
//! plan onto a logging surface in both axis modes.

use plot_feeds::{
    config::CONFIG,
    manifest::HierarchyManifest,
    AssignError, AxisOrientation, FeedAssigner, PlotAugmentation, RenderSurface, SeriesLabel,
    ViewProperties,
};

use anyhow::Context;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

const BUILTIN_MANIFEST: &str = include_str!("../demos/sample_hierarchy.json");

/// A surface that logs every call it receives.
struct LoggingSurface {
    orientation: AxisOrientation,
    long_names: bool,
    series: usize,
}

impl LoggingSurface {
    fn new(orientation: AxisOrientation, long_names: bool) -> Self {
        LoggingSurface {
            orientation,
            long_names,
            series: 0,
        }
    }
}

impl RenderSurface for LoggingSurface {
    fn add_series(&mut self, subplot: usize, id: &str, label: SeriesLabel) {
        self.series += 1;
        info!("  subplot {}: add series '{}' ({})", subplot, id, label);
    }

    fn set_augmentation(&mut self, subplot: usize, augmentation: Arc<dyn PlotAugmentation>) {
        info!("  subplot {}: augmentation '{}'", subplot, augmentation.name());
    }

    fn axis_orientation(&self) -> AxisOrientation {
        self.orientation
    }

    fn use_long_names(&self) -> bool {
        self.long_names
    }
}

fn main() -> anyhow::Result<()> {
    // Default filter comes from the config unless RUST_LOG is set.
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(CONFIG.logging.default_filter.as_str()),
    )
    .format_timestamp_micros()
    .init();

    info!("Starting plot-feeds demo...");
    info!(
        "Plot configuration: {} item(s) per plot, separator '{}'.",
        CONFIG.plot.max_items_per_plot, CONFIG.plot.non_time_feed_separator
    );

    let manifest = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => HierarchyManifest::load(&path)?,
        None => {
            info!("No manifest given; using the built-in sample hierarchy.");
            HierarchyManifest::from_json_str(BUILTIN_MANIFEST)
                .context("Failed to parse built-in sample hierarchy")?
        }
    };
    let built = manifest.build();
    let assigner = FeedAssigner::new(built.root.clone(), built.resolver.clone(), ViewProperties::new());

    // Nothing has been computed yet, so assignment must be refused.
    let mut surface = LoggingSurface::new(AxisOrientation::ValueAxis, false);
    match assigner.assign_to_subplots(&mut surface) {
        Err(AssignError::NotReady) => info!("Assignment before first read refused as expected."),
        Ok(count) => warn!("Assignment ran before any recomputation ({} calls).", count),
    }

    let visible = assigner.visible_feeds();
    info!(
        "{} subplot(s), {} visible feed(s), {} predictive.",
        assigner.subplot_count(),
        visible.len(),
        assigner.predictive_feeds().len()
    );
    info!("Time systems: {:?}", assigner.time_system_choices());
    info!("Default time system: {:?}", assigner.default_time_system());
    info!("Time formats: {:?}", assigner.time_format_choices());
    info!("Feed info: {:?}", assigner.feed_info_choices());
    info!(
        "Filter consensus: {}",
        assigner
            .filter_consensus()
            .map_or_else(|| "none".to_string(), |f| f.description().to_string())
    );

    for (orientation, long_names) in [
        (AxisOrientation::ValueAxis, false),
        (AxisOrientation::ValueAxis, true),
        (AxisOrientation::TimeAsSharedAxis, false),
    ] {
        info!("Assigning in {:?} mode (long names: {}):", orientation, long_names);
        let mut surface = LoggingSurface::new(orientation, long_names);
        let calls = assigner.assign_to_subplots(&mut surface)?;
        info!("  {} call(s), {} series.", calls, surface.series);
    }

    if let Some(augmentation) = &built.augmentation {
        info!(
            "Augmentation '{}' received feeds {:?}.",
            augmentation.name(),
            augmentation.received()
        );
    }

    info!("plot-feeds demo finished.");
    Ok(())
}
