use pexbrowse_model::MediaType;

use crate::providers::{
    CuratedPhotoOptions, Paging, PhotoSearchOptions, PopularVideoOptions,
    VideoSearchOptions,
};

use super::query::QueryState;

/// The single upstream call a query state routes to.
///
/// Two plans compare equal exactly when they would issue the same request,
/// which is how responses to superseded requests are recognised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FetchPlan {
    /// Photo feed without a query; filters are not sent
    CuratedPhotos(CuratedPhotoOptions),
    /// Photo keyword search with the filters photos support
    SearchPhotos {
        query: String,
        options: PhotoSearchOptions,
    },
    /// Video feed without a query; filters are not sent
    PopularVideos(PopularVideoOptions),
    /// Video keyword search; colour is never sent
    SearchVideos {
        query: String,
        options: VideoSearchOptions,
    },
}

impl FetchPlan {
    /// Route the query state to an endpoint and its options.
    pub fn for_state(state: &QueryState, per_page: u32) -> Self {
        let paging = Paging::new(state.page(), per_page);
        let filters = state.filters();
        let query = state.search_query().trim().to_string();

        match (state.media_type(), state.has_query()) {
            (MediaType::Photo, false) => {
                FetchPlan::CuratedPhotos(CuratedPhotoOptions {
                    paging,
                    ..CuratedPhotoOptions::default()
                })
            }
            (MediaType::Photo, true) => FetchPlan::SearchPhotos {
                query,
                options: PhotoSearchOptions {
                    paging,
                    orientation: filters.orientation,
                    color: filters.color.clone(),
                    size: filters.size,
                    locale: filters.locale,
                },
            },
            (MediaType::Video, false) => {
                FetchPlan::PopularVideos(PopularVideoOptions {
                    paging,
                    ..PopularVideoOptions::default()
                })
            }
            (MediaType::Video, true) => FetchPlan::SearchVideos {
                query,
                options: VideoSearchOptions {
                    paging,
                    orientation: filters.orientation,
                    size: filters.size,
                    locale: filters.locale,
                    ..VideoSearchOptions::default()
                },
            },
        }
    }

    /// Media type the endpoint returns.
    pub fn media_type(&self) -> MediaType {
        match self {
            FetchPlan::CuratedPhotos(_) | FetchPlan::SearchPhotos { .. } => {
                MediaType::Photo
            }
            FetchPlan::PopularVideos(_) | FetchPlan::SearchVideos { .. } => {
                MediaType::Video
            }
        }
    }

    /// Page and page size sent with the request.
    pub fn paging(&self) -> Paging {
        match self {
            FetchPlan::CuratedPhotos(options) => options.paging,
            FetchPlan::SearchPhotos { options, .. } => options.paging,
            FetchPlan::PopularVideos(options) => options.paging,
            FetchPlan::SearchVideos { options, .. } => options.paging,
        }
    }

    /// Endpoint name for logs.
    pub fn endpoint(&self) -> &'static str {
        match self {
            FetchPlan::CuratedPhotos(_) => "curated_photos",
            FetchPlan::SearchPhotos { .. } => "search_photos",
            FetchPlan::PopularVideos(_) => "popular_videos",
            FetchPlan::SearchVideos { .. } => "search_videos",
        }
    }
}
