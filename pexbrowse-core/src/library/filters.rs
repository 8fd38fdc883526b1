//! Per-dimension enablement derived from the query state.
//!
//! Filters only apply while a free-text search is active, and the colour
//! filter additionally only applies to photos.

use pexbrowse_model::{FilterDimension, MediaType};

use super::query::QueryState;

/// Whether a filter dimension can be set for this media type and query.
pub fn is_enabled(
    dimension: FilterDimension,
    has_query: bool,
    media_type: MediaType,
) -> bool {
    match dimension {
        FilterDimension::Color => has_query && media_type == MediaType::Photo,
        FilterDimension::Orientation
        | FilterDimension::Size
        | FilterDimension::Locale => has_query,
    }
}

/// One filter dimension as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControl {
    /// Which filter this control drives
    pub dimension: FilterDimension,
    /// Empty when unset
    pub value: String,
    /// False when the dimension does not apply right now
    pub enabled: bool,
}

/// One [`FilterControl`] per dimension, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterControls {
    controls: [FilterControl; 4],
}

impl FilterControls {
    /// Build the controls for the current query state.
    pub fn derive(state: &QueryState) -> Self {
        let controls = FilterDimension::ALL.map(|dimension| FilterControl {
            dimension,
            value: state.filters().value(dimension),
            enabled: is_enabled(dimension, state.has_query(), state.media_type()),
        });
        Self { controls }
    }

    /// Control for one dimension.
    pub fn get(&self, dimension: FilterDimension) -> &FilterControl {
        // ALL order matches the array layout
        &self.controls[dimension as usize]
    }

    /// Whether the user may set this dimension right now.
    pub fn is_enabled(&self, dimension: FilterDimension) -> bool {
        self.get(dimension).enabled
    }

    /// True when any filter carries a value.
    pub fn any_active(&self) -> bool {
        self.controls.iter().any(|control| !control.value.is_empty())
    }

    /// Controls in display order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterControl> {
        self.controls.iter()
    }
}

impl Default for FilterControls {
    fn default() -> Self {
        Self::derive(&QueryState::default())
    }
}
