//! Conversion of provider assets into the host's external record.

use std::fmt::Debug;

use pexbrowse_model::{
    Asset, ExternalAssetRecord, MediaType, Photo, PhotoSize, RenditionKey,
    Video, VideoQuality,
};

/// Maps a provider asset into an [`ExternalAssetRecord`].
///
/// Mapping never fails: a missing size or quality falls back to the
/// original image or the best available video file.
pub trait AssetMapper: Send + Sync + Debug {
    /// Record for a photo at the requested size.
    fn map_photo(
        &self,
        photo: &Photo,
        size: PhotoSize,
        include_credits: bool,
    ) -> ExternalAssetRecord;

    /// Record for a video. `None` picks the best file on offer.
    fn map_video(
        &self,
        video: &Video,
        quality: Option<VideoQuality>,
        include_credits: bool,
    ) -> ExternalAssetRecord;

    /// Dispatch on the asset variant. A rendition key that does not fit the
    /// variant is ignored.
    fn map_asset(
        &self,
        asset: &Asset,
        rendition: Option<RenditionKey>,
        include_credits: bool,
    ) -> ExternalAssetRecord {
        match asset {
            Asset::Photo(photo) => {
                let size = rendition
                    .and_then(RenditionKey::photo_size)
                    .unwrap_or_default();
                self.map_photo(photo, size, include_credits)
            }
            Asset::Video(video) => {
                let quality = rendition.and_then(RenditionKey::video_quality);
                self.map_video(video, quality, include_credits)
            }
        }
    }
}

/// Record layout used for Pexels assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct PexelsAssetMapper;

impl PexelsAssetMapper {
    fn credit(kind: &str, author: &str) -> String {
        format!("{kind} by {author} on Pexels")
    }
}

impl AssetMapper for PexelsAssetMapper {
    fn map_photo(
        &self,
        photo: &Photo,
        size: PhotoSize,
        include_credits: bool,
    ) -> ExternalAssetRecord {
        let variant_missing = photo.src.get(size).is_empty();
        let (size, url) = if variant_missing {
            (PhotoSize::Original, photo.src.original.clone())
        } else {
            (size, photo.src.get(size).to_string())
        };
        let (width, height) = size.dimensions(photo.width, photo.height);

        let title = if photo.alt.trim().is_empty() {
            format!("Photo by {}", photo.photographer)
        } else {
            photo.alt.clone()
        };

        let mut description = photo.alt.trim().to_string();
        if include_credits {
            let credit = Self::credit("Photo", &photo.photographer);
            description = if description.is_empty() {
                credit
            } else {
                format!("{description} {credit}")
            };
        }

        let thumbnail = photo.source_url(PhotoSize::Tiny);

        ExternalAssetRecord {
            source_id: photo.id.to_string(),
            kind: MediaType::Photo,
            url,
            width,
            height,
            title,
            description,
            author: photo.photographer.clone(),
            author_url: photo.photographer_url.clone(),
            page_url: photo.url.clone(),
            thumbnail_url: (!thumbnail.is_empty())
                .then(|| thumbnail.to_string()),
            duration_secs: None,
            rendition: size.as_str().to_string(),
        }
    }

    fn map_video(
        &self,
        video: &Video,
        quality: Option<VideoQuality>,
        include_credits: bool,
    ) -> ExternalAssetRecord {
        let file = video.file_for(quality);

        let url = file.map(|f| f.link.clone()).unwrap_or_default();
        let width = file.and_then(|f| f.width).unwrap_or(video.width);
        let height = file.and_then(|f| f.height).unwrap_or(video.height);
        let rendition = file
            .and_then(|f| f.quality)
            .map(|q| q.as_str().to_string())
            .unwrap_or_default();

        let title = format!("Video by {}", video.user.name);
        let description = if include_credits {
            Self::credit("Video", &video.user.name)
        } else {
            String::new()
        };

        ExternalAssetRecord {
            source_id: video.id.to_string(),
            kind: MediaType::Video,
            url,
            width,
            height,
            title,
            description,
            author: video.user.name.clone(),
            author_url: video.user.url.clone(),
            page_url: video.url.clone(),
            thumbnail_url: video.thumbnail_url().map(str::to_string),
            duration_secs: Some(video.duration),
            rendition,
        }
    }
}
