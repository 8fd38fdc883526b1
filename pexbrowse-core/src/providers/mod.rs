/// HTTP client for the Pexels API.
pub mod pexels;
/// Provider trait, request options and errors.
pub mod traits;

pub use pexels::PexelsProvider;
pub use traits::{
    AssetPage, CuratedPhotoOptions, MAX_PER_PAGE, MediaProvider, Paging,
    PhotoSearchOptions, PopularVideoOptions, ProviderError, VideoSearchOptions,
};
