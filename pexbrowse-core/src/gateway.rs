//! Failure-normalizing facade over a [`MediaProvider`].
//!
//! Every operation resolves to a [`Fetched`] value: on failure the value is
//! the empty page (or `None`) and the failure rides alongside after being
//! logged. Callers never see a `Result::Err` from here.

use std::fmt;
use std::sync::Arc;

use pexbrowse_model::{Asset, AssetId, MediaType, Photo, Video};
use tracing::{debug, warn};

use crate::library::FetchPlan;
use crate::providers::{
    AssetPage, CuratedPhotoOptions, MediaProvider, PhotoSearchOptions,
    PopularVideoOptions, ProviderError, VideoSearchOptions,
};

/// Result of a gateway call that never fails outright.
#[derive(Debug)]
pub struct Fetched<T> {
    /// Payload, or its empty form when the call failed
    pub value: T,
    /// Set when the provider call failed and `value` is the fallback
    pub failure: Option<ProviderError>,
}

impl<T> Fetched<T> {
    fn ok(value: T) -> Self {
        Self {
            value,
            failure: None,
        }
    }

    fn failed(value: T, failure: ProviderError) -> Self {
        Self {
            value,
            failure: Some(failure),
        }
    }

    /// True when the call failed and `value` is the empty stand-in.
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Turn back into a plain result, dropping the empty payload on failure.
    pub fn into_result(self) -> Result<T, ProviderError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }
}

/// Failure-normalizing facade over a [`MediaProvider`].
///
/// Provider errors never escape: page calls come back empty and lookups come
/// back `None`, each with the failure attached and logged.
#[derive(Clone)]
pub struct Gateway {
    provider: Arc<dyn MediaProvider>,
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl Gateway {
    /// Wrap a shared provider.
    pub fn new(provider: Arc<dyn MediaProvider>) -> Self {
        Self { provider }
    }

    /// Wrap a concrete provider.
    pub fn from_provider<P: MediaProvider + 'static>(provider: P) -> Self {
        Self::new(Arc::new(provider))
    }

    /// Photo keyword search.
    pub async fn search_photos(
        &self,
        query: &str,
        options: &PhotoSearchOptions,
    ) -> Fetched<AssetPage> {
        let result = self.provider.search_photos(query, options).await;
        normalize_page("search_photos", result)
    }

    /// Curated photo feed, used when there is no query.
    pub async fn curated_photos(
        &self,
        options: &CuratedPhotoOptions,
    ) -> Fetched<AssetPage> {
        let result = self.provider.curated_photos(options).await;
        normalize_page("curated_photos", result)
    }

    /// Single photo; `None` when unknown or on failure.
    pub async fn photo_by_id(&self, id: AssetId) -> Fetched<Option<Photo>> {
        let result = self.provider.photo(id).await;
        normalize_single("photo_by_id", id, result)
    }

    /// Video keyword search.
    pub async fn search_videos(
        &self,
        query: &str,
        options: &VideoSearchOptions,
    ) -> Fetched<AssetPage> {
        let result = self.provider.search_videos(query, options).await;
        normalize_page("search_videos", result)
    }

    /// Popular video feed, used when there is no query.
    pub async fn popular_videos(
        &self,
        options: &PopularVideoOptions,
    ) -> Fetched<AssetPage> {
        let result = self.provider.popular_videos(options).await;
        normalize_page("popular_videos", result)
    }

    /// Single video; `None` when unknown or on failure.
    pub async fn video_by_id(&self, id: AssetId) -> Fetched<Option<Video>> {
        let result = self.provider.video(id).await;
        normalize_single("video_by_id", id, result)
    }

    /// Issue the upstream call a [`FetchPlan`] routes to.
    pub async fn execute(&self, plan: &FetchPlan) -> Fetched<AssetPage> {
        match plan {
            FetchPlan::CuratedPhotos(options) => {
                self.curated_photos(options).await
            }
            FetchPlan::SearchPhotos { query, options } => {
                self.search_photos(query, options).await
            }
            FetchPlan::PopularVideos(options) => {
                self.popular_videos(options).await
            }
            FetchPlan::SearchVideos { query, options } => {
                self.search_videos(query, options).await
            }
        }
    }

    /// By-id lookup dispatched on media type.
    pub async fn asset_by_id(
        &self,
        id: AssetId,
        media_type: MediaType,
    ) -> Fetched<Option<Asset>> {
        match media_type {
            MediaType::Photo => {
                let fetched = self.photo_by_id(id).await;
                Fetched {
                    value: fetched.value.map(Asset::Photo),
                    failure: fetched.failure,
                }
            }
            MediaType::Video => {
                let fetched = self.video_by_id(id).await;
                Fetched {
                    value: fetched.value.map(Asset::Video),
                    failure: fetched.failure,
                }
            }
        }
    }
}

fn normalize_page(
    operation: &'static str,
    result: Result<AssetPage, ProviderError>,
) -> Fetched<AssetPage> {
    match result {
        Ok(page) => {
            debug!(
                operation,
                items = page.items.len(),
                total = page.total_results,
                "provider page received"
            );
            Fetched::ok(page)
        }
        Err(err) => {
            warn!(operation, error = %err, "provider request failed");
            Fetched::failed(AssetPage::empty(), err)
        }
    }
}

fn normalize_single<T>(
    operation: &'static str,
    id: AssetId,
    result: Result<T, ProviderError>,
) -> Fetched<Option<T>> {
    match result {
        Ok(value) => Fetched::ok(Some(value)),
        Err(ProviderError::NotFound) => {
            debug!(operation, asset_id = %id, "asset does not exist upstream");
            Fetched::ok(None)
        }
        Err(err) => {
            warn!(operation, asset_id = %id, error = %err, "provider lookup failed");
            Fetched::failed(None, err)
        }
    }
}
