// src/choices.rs

//! Aggregates the metadata choices offered by a plot: time systems, time
//! formats and feed-info records.
//!
//! Aggregation walks the same capacity-bounded prefix of each row as the
//! assignment builder, but does not apply the textual-feed filter: a string
//! feed that will never be plotted still contributes its time systems and
//! formats here.

use indexmap::IndexSet;
use log::{debug, trace};
use std::collections::HashSet;

use crate::capacity::bounded_cells;
use crate::feed::{primary_feed, FeedDescriptor, FeedInfo};
use crate::hierarchy::Matrix;

/// Metadata choices derived from one matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceSets {
    pub time_systems: IndexSet<String>,
    pub time_formats: IndexSet<String>,
    pub feed_infos: HashSet<FeedInfo>,
}

impl ChoiceSets {
    pub fn aggregate(matrix: &Matrix, capacity: usize) -> Self {
        let sets = ChoiceSets {
            time_systems: aggregate_time_systems(matrix, capacity),
            time_formats: aggregate_time_formats(matrix, capacity),
            feed_infos: aggregate_feed_infos(matrix, capacity),
        };
        debug!(
            "Aggregated {} time system(s), {} time format(s), {} feed info record(s).",
            sets.time_systems.len(),
            sets.time_formats.len(),
            sets.feed_infos.len()
        );
        sets
    }

    /// The first time system seen, if any.
    pub fn default_time_system(&self) -> Option<&str> {
        self.time_systems.first().map(String::as_str)
    }
}

/// Time systems of every bounded cell with a primary feed, first-seen order.
pub fn aggregate_time_systems(matrix: &Matrix, capacity: usize) -> IndexSet<String> {
    collect_feed_strings(matrix, capacity, |feed| &feed.time_systems)
}

/// Time formats of every bounded cell with a primary feed, first-seen order.
pub fn aggregate_time_formats(matrix: &Matrix, capacity: usize) -> IndexSet<String> {
    collect_feed_strings(matrix, capacity, |feed| &feed.time_formats)
}

/// Feed info for every feed of every bounded cell that has a feed-info
/// provider.
pub fn aggregate_feed_infos(matrix: &Matrix, capacity: usize) -> HashSet<FeedInfo> {
    let mut choices = HashSet::new();
    for cell in bounded_cells(matrix, capacity) {
        let Some(provider) = cell.feed_info_provider() else {
            continue;
        };
        for feed in cell.feeds() {
            if let Some(info) = provider.feed_info(&feed) {
                choices.insert(info);
            }
        }
    }
    choices
}

fn collect_feed_strings<F>(matrix: &Matrix, capacity: usize, extract: F) -> IndexSet<String>
where
    F: Fn(&FeedDescriptor) -> &Vec<String>,
{
    let mut choices = IndexSet::new();
    for cell in bounded_cells(matrix, capacity) {
        if let Some(feed) = primary_feed(cell.as_ref()) {
            for value in extract(feed.as_ref()) {
                if choices.insert(value.clone()) {
                    trace!("New choice '{}' from '{}'.", value, cell.id());
                }
            }
        }
    }
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::SourceCell;
    use crate::cell::{FeedInfoTable, StaticCell};
    use crate::feed::FeedType;
    use std::sync::Arc;
    use test_log::test;

    fn cell(id: &str, systems: &[&str], formats: &[&str]) -> Arc<dyn SourceCell> {
        StaticCell::new(id)
            .with_feed(
                FeedDescriptor::new(id)
                    .with_time_systems(systems.iter().copied())
                    .with_time_formats(formats.iter().copied()),
            )
            .into_shared()
    }

    #[test]
    fn time_systems_keep_first_seen_order() {
        let matrix = vec![
            vec![cell("a", &["GMT", "SCLK"], &[]), cell("b", &["ERT", "GMT"], &[])],
            vec![cell("c", &["SCLK", "MET"], &[])],
        ];
        let systems: Vec<_> = aggregate_time_systems(&matrix, 10).into_iter().collect();
        assert_eq!(systems, vec!["GMT", "SCLK", "ERT", "MET"]);
    }

    #[test]
    fn cells_past_capacity_contribute_nothing() {
        let matrix = vec![vec![
            cell("a", &["GMT"], &["DOY"]),
            cell("b", &["SCLK"], &["ISO"]),
        ]];
        let sets = ChoiceSets::aggregate(&matrix, 1);
        assert_eq!(sets.time_systems.iter().collect::<Vec<_>>(), vec!["GMT"]);
        assert_eq!(sets.time_formats.iter().collect::<Vec<_>>(), vec!["DOY"]);
        assert_eq!(sets.default_time_system(), Some("GMT"));
    }

    #[test]
    fn time_formats_keep_first_seen_order() {
        let matrix = vec![
            vec![cell("a", &[], &["ISO", "DOY"]), cell("b", &[], &["SCLK", "ISO"])],
            vec![cell("c", &[], &["DOY", "MET"])],
        ];
        let formats: Vec<_> = aggregate_time_formats(&matrix, 10).into_iter().collect();
        assert_eq!(formats, vec!["ISO", "DOY", "SCLK", "MET"]);
    }

    #[test]
    fn feed_info_past_capacity_is_ignored() {
        let info_cell = |id: &str, name: &str| {
            StaticCell::new(id)
                .with_feed(FeedDescriptor::new(id))
                .with_feed_info(
                    FeedInfoTable::new()
                        .insert(id, FeedInfo::new(name, None))
                        .into_shared(),
                )
                .into_shared()
        };
        let matrix = vec![
            vec![info_cell("a", "Kept"), info_cell("b", "Dropped")],
            vec![info_cell("c", "Also kept")],
        ];

        let infos = aggregate_feed_infos(&matrix, 1);
        assert_eq!(infos.len(), 2);
        assert!(infos.contains(&FeedInfo::new("Kept", None)));
        assert!(infos.contains(&FeedInfo::new("Also kept", None)));
        assert!(!infos.contains(&FeedInfo::new("Dropped", None)));
    }

    #[test]
    fn textual_feeds_still_contribute_choices() {
        let text = StaticCell::new("t")
            .with_feed(
                FeedDescriptor::new("t")
                    .with_type(FeedType::String)
                    .with_time_systems(["ERT"])
                    .with_time_formats(["HH:mm"]),
            )
            .into_shared();
        let matrix = vec![vec![text]];
        let sets = ChoiceSets::aggregate(&matrix, 3);
        assert!(sets.time_systems.contains("ERT"));
        assert!(sets.time_formats.contains("HH:mm"));
    }

    #[test]
    fn feed_info_covers_every_feed_of_the_cell() {
        let table = FeedInfoTable::new()
            .insert("main", FeedInfo::new("Voltage", Some("V")))
            .insert("aux", FeedInfo::new("Voltage", Some("mV")))
            .into_shared();
        let with_provider = StaticCell::new("c")
            .with_feed(FeedDescriptor::new("main"))
            .with_secondary_feed(FeedDescriptor::new("aux").with_type(FeedType::String))
            .with_secondary_feed(FeedDescriptor::new("unknown"))
            .with_feed_info(table)
            .into_shared();
        let without_provider = cell("plain", &["GMT"], &[]);

        let infos = aggregate_feed_infos(&vec![vec![with_provider, without_provider]], 5);
        assert_eq!(infos.len(), 2);
        assert!(infos.contains(&FeedInfo::new("Voltage", Some("V"))));
        assert!(infos.contains(&FeedInfo::new("Voltage", Some("mV"))));
    }

    #[test]
    fn empty_matrix_has_no_default_time_system() {
        let sets = ChoiceSets::aggregate(&Vec::new(), 10);
        assert_eq!(sets, ChoiceSets::default());
        assert_eq!(sets.default_time_system(), None);
    }
}
