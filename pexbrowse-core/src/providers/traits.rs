use async_trait::async_trait;
use pexbrowse_model::{
    Asset, AssetId, ColorFilter, Locale, Orientation, Photo, SizeFilter, Video,
};

/// Largest page size the provider accepts.
pub const MAX_PER_PAGE: u32 = 80;

/// Failures talking to a stock-media provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API key not configured")]
    NotConfigured,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limited")]
    RateLimited,

    #[error("Not found")]
    NotFound,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// One page of results, normalized across photo and video endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetPage {
    /// Assets on this page
    pub items: Vec<Asset>,
    /// Total matches across all pages
    pub total_results: u64,
}

impl AssetPage {
    /// Page with no items and a zero total.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Paging {
    /// 1-based
    pub page: u32,
    /// Sent capped at [`MAX_PER_PAGE`]
    pub per_page: u32,
}

impl Paging {
    /// Taken as given; see [`Paging::clamped`].
    pub const fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Page clamped to at least 1, page size clamped to `1..=80`.
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
        }
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(1, 15)
    }
}

/// Options for a photo search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PhotoSearchOptions {
    pub paging: Paging,
    pub orientation: Option<Orientation>,
    pub color: Option<ColorFilter>,
    pub size: Option<SizeFilter>,
    pub locale: Option<Locale>,
}

/// Curated feed options; the provider has no `size`/`locale` here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CuratedPhotoOptions {
    pub paging: Paging,
    pub orientation: Option<Orientation>,
    pub color: Option<ColorFilter>,
}

/// Options for a video search. Videos take no colour filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VideoSearchOptions {
    pub paging: Paging,
    pub orientation: Option<Orientation>,
    pub size: Option<SizeFilter>,
    pub locale: Option<Locale>,
    /// Seconds
    pub min_duration: Option<u32>,
    /// Seconds
    pub max_duration: Option<u32>,
}

/// Options for the popular video feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PopularVideoOptions {
    pub paging: Paging,
    /// Pixels
    pub min_width: Option<u32>,
    /// Pixels
    pub min_height: Option<u32>,
    pub min_duration: Option<u32>,
    pub max_duration: Option<u32>,
}

/// Raw access to a stock-media provider.
///
/// Implementations report every failure as a [`ProviderError`]; turning those
/// into empty results is the [`Gateway`](crate::gateway::Gateway)'s job.
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Free-text photo search
    async fn search_photos(
        &self,
        query: &str,
        options: &PhotoSearchOptions,
    ) -> Result<AssetPage, ProviderError>;

    /// Curated photo feed, no query
    async fn curated_photos(
        &self,
        options: &CuratedPhotoOptions,
    ) -> Result<AssetPage, ProviderError>;

    /// Single photo; [`ProviderError::NotFound`] when it does not exist
    async fn photo(&self, id: AssetId) -> Result<Photo, ProviderError>;

    /// Free-text video search
    async fn search_videos(
        &self,
        query: &str,
        options: &VideoSearchOptions,
    ) -> Result<AssetPage, ProviderError>;

    /// Popular video feed, no query
    async fn popular_videos(
        &self,
        options: &PopularVideoOptions,
    ) -> Result<AssetPage, ProviderError>;

    /// Single video; [`ProviderError::NotFound`] when it does not exist
    async fn video(&self, id: AssetId) -> Result<Video, ProviderError>;

    /// Provider name for diagnostics
    fn name(&self) -> &'static str;
}
