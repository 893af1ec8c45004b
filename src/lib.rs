//! Plot feed assignment.
//!
//! Takes a hierarchy of source cells arranged in rows and works out which
//! feeds go onto which subplot, which time systems, time formats and feed-info
//! records the plot can offer, and whether all plotted components share one
//! filter. The result is published as an immutable snapshot that any thread
//! can read, and can be replayed onto a rendering surface in either of two
//! axis modes.

pub mod assigner;
pub mod assignment;
pub mod capability;
pub mod capacity;
pub mod cell;
pub mod choices;
pub mod config;
pub mod consensus;
pub mod feed;
pub mod hierarchy;
pub mod manifest;
pub mod partition;
pub mod snapshot;
pub mod surface;

pub use assigner::{AssignError, FeedAssigner};
pub use assignment::{AssignmentPlan, ComponentFeedMap, SubplotAssignment};
pub use capability::{FeedFilterProvider, FeedInfoProvider, PlotAugmentation, SourceCell};
pub use config::{Config, PlotConfig, CONFIG};
pub use feed::{FeedDescriptor, FeedInfo, FeedType};
pub use hierarchy::{HierarchyResolver, Matrix, Row, ViewProperties};
pub use snapshot::PlotSnapshot;
pub use surface::{AxisOrientation, LegendEntry, RenderSurface, SeriesLabel, SurfaceCall};
