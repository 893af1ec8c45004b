// src/consensus.rs

//! Resolves the filter shared by every component on the plot.

use log::debug;
use std::sync::Arc;

use crate::assignment::ComponentFeedMap;
use crate::capability::FeedFilterProvider;

/// Returns the filter every mapped component agrees on.
///
/// `None` when the map is empty, when any component has no filter, or when
/// two components expose different filters.
pub fn resolve_filter_consensus(
    components: &ComponentFeedMap,
) -> Option<Arc<dyn FeedFilterProvider>> {
    let mut shared: Option<Arc<dyn FeedFilterProvider>> = None;

    for component in components.components() {
        let Some(filter) = component.filter_provider() else {
            debug!("Component '{}' has no filter; no consensus.", component.id());
            return None;
        };
        match &shared {
            Some(current) if **current != *filter => {
                debug!(
                    "Filter '{}' on '{}' disagrees with '{}'; no consensus.",
                    filter.filter_id(),
                    component.id(),
                    current.filter_id()
                );
                return None;
            }
            Some(_) => {}
            None => shared = Some(filter),
        }
    }

    shared
}
