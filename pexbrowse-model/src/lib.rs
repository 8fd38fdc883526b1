//! Core data model definitions shared across pexbrowse crates.
#![allow(missing_docs)]

pub mod asset;
pub mod error;
pub mod filter_types;
pub mod ids;
pub mod media_type;
pub mod record;
pub mod rendition;

// Intentionally curated re-exports for downstream consumers.
pub use asset::{
    Asset, Photo, PhotoSources, Video, VideoFile, VideoPicture, VideoQuality,
    VideoUser,
};
pub use error::{ModelError, Result as ModelResult};
pub use filter_types::{
    ColorFilter, FilterDimension, FilterSetting, Locale, NamedColor,
    Orientation, SizeFilter,
};
pub use ids::AssetId;
pub use media_type::MediaType;
pub use record::ExternalAssetRecord;
pub use rendition::{PhotoSize, RenditionKey};
