use std::sync::Arc;

use pexbrowse_model::{Asset, AssetId, MediaType};

use crate::error::LibraryError;

use super::filters::FilterControls;
use super::options::{Availability, LibraryMode};
use super::query;
use super::scheduler::FetchPhase;

/// Published view of the library, replaced after every message.
#[derive(Debug, Clone, Default)]
pub struct LibrarySnapshot {
    /// Mode the library was opened in
    pub mode: LibraryMode,
    /// Which media types the user can switch between
    pub availability: Availability,
    /// Media type being browsed
    pub media_type: MediaType,
    /// Trimmed query, empty when browsing a feed
    pub search_query: String,
    /// 1-based
    pub page: u32,
    /// Filter controls derived from the query state
    pub filters: FilterControls,
    /// Current result page in upstream relevance order
    pub items: Arc<Vec<Asset>>,
    /// Total reported by the provider for this query
    pub total_results: u64,
    /// Page size sent with each request
    pub items_per_page: u32,
    /// A fetch is in flight or about to be
    pub loading: bool,
    /// Failure of the last fetch, cleared by the next success
    pub error: Option<LibraryError>,
    /// Fetch scheduler state
    pub phase: FetchPhase,
    /// Asset the user or host selected
    pub selected_id: Option<AssetId>,
    /// Outstanding by-id lookups
    pub resolving: usize,
    /// Fetches whose results were applied
    pub fetches_completed: u64,
    /// Handle commands processed so far
    pub commands_applied: u64,
}

impl LibrarySnapshot {
    /// Index of the first item on this page.
    pub fn offset(&self) -> u64 {
        query::offset(self.page, self.items_per_page)
    }

    /// Page count for the current result total; zero when nothing matched.
    pub fn total_pages(&self) -> u64 {
        query::total_pages(self.total_results, self.items_per_page)
    }

    /// Whether another page follows this one.
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    /// No debounce pending, no fetch in flight and no lookup outstanding.
    pub fn is_settled(&self) -> bool {
        self.phase == FetchPhase::Idle && !self.loading && self.resolving == 0
    }

    /// Asset with this id on the current page.
    pub fn find(&self, id: AssetId) -> Option<&Asset> {
        self.items.iter().find(|asset| asset.id() == id)
    }
}
