//! Canonical query parameters and the invariants that tie them together.

use pexbrowse_model::{
    ColorFilter, FilterDimension, FilterSetting, Locale, MediaType,
    Orientation, SizeFilter,
};

/// Current value of each filter dimension; `None` is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Filters {
    pub orientation: Option<Orientation>,
    /// Photos only
    pub color: Option<ColorFilter>,
    pub size: Option<SizeFilter>,
    pub locale: Option<Locale>,
}

impl Filters {
    /// True when no filter carries a value.
    pub fn is_empty(&self) -> bool {
        self.orientation.is_none()
            && self.color.is_none()
            && self.size.is_none()
            && self.locale.is_none()
    }

    /// String form of a dimension's value, empty when unset.
    pub fn value(&self, dimension: FilterDimension) -> String {
        let value = match dimension {
            FilterDimension::Orientation => {
                self.orientation.map(|v| v.to_string())
            }
            FilterDimension::Color => self.color.as_ref().map(|v| v.to_string()),
            FilterDimension::Size => self.size.map(|v| v.to_string()),
            FilterDimension::Locale => self.locale.map(|v| v.to_string()),
        };
        value.unwrap_or_default()
    }

    /// Returns whether the value changed.
    fn apply(&mut self, setting: FilterSetting) -> bool {
        fn replace<T: PartialEq>(slot: &mut Option<T>, value: Option<T>) -> bool {
            if *slot == value {
                return false;
            }
            *slot = value;
            true
        }

        match setting {
            FilterSetting::Orientation(v) => replace(&mut self.orientation, v),
            FilterSetting::Color(v) => replace(&mut self.color, v),
            FilterSetting::Size(v) => replace(&mut self.size, v),
            FilterSetting::Locale(v) => replace(&mut self.locale, v),
        }
    }
}

/// Single source of truth for what the library fetches.
///
/// Setters enforce the coupling rules and report whether anything changed:
/// any change to the media type, search text or a filter returns to page 1;
/// switching to video drops the colour filter; clearing the search text
/// clears every filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    media_type: MediaType,
    search_query: String,
    page: u32,
    filters: Filters,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            media_type: MediaType::Photo,
            search_query: String::new(),
            page: 1,
            filters: Filters::default(),
        }
    }
}

impl QueryState {
    /// Fresh state on page 1 with no filters.
    pub fn new(media_type: MediaType, search_query: &str) -> Self {
        let mut state = Self {
            media_type,
            ..Self::default()
        };
        state.set_search_query(search_query);
        state
    }

    /// Media type being browsed.
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// The trimmed search text, empty when browsing a feed.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Whether a free-text search is active.
    pub fn has_query(&self) -> bool {
        !self.search_query.is_empty()
    }

    /// Current page, 1-based.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Filter values currently set.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Whitespace-only text counts as no search.
    pub fn set_search_query(&mut self, query: &str) -> bool {
        let query = if query.trim().is_empty() { "" } else { query };
        if self.search_query == query {
            return false;
        }

        self.search_query = query.to_string();
        if self.search_query.is_empty() {
            self.filters = Filters::default();
        }
        self.page = 1;
        true
    }

    /// Returns whether the state changed. Clears filters the new type does not support.
    pub fn set_media_type(&mut self, media_type: MediaType) -> bool {
        if self.media_type == media_type {
            return false;
        }

        self.media_type = media_type;
        if media_type == MediaType::Video {
            self.filters.color = None;
        }
        self.page = 1;
        true
    }

    /// Returns whether the state changed. Refused while the dimension is disabled.
    pub fn set_filter(&mut self, setting: FilterSetting) -> bool {
        let changed = self.filters.apply(setting);
        if changed {
            self.page = 1;
        }
        changed
    }

    /// Reset every filter and return to page 1.
    pub fn clear_filters(&mut self) -> bool {
        let changed = !self.filters.is_empty() || self.page != 1;
        self.filters = Filters::default();
        self.page = 1;
        changed
    }

    /// Pages are 1-based; 0 is treated as 1.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }
}

/// Index of the first item on `page`.
pub fn offset(page: u32, per_page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(per_page)
}

/// Number of pages needed for `total_results`; 0 when there are none.
pub fn total_pages(total_results: u64, per_page: u32) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total_results.div_ceil(u64::from(per_page))
}
