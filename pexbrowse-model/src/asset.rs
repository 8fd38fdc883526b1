//! Provider assets, discriminated once at ingestion.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;
use crate::ids::AssetId;
use crate::media_type::MediaType;
use crate::rendition::PhotoSize;

/// A photo or video returned by the stock-media provider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Asset {
    Photo(Photo),
    Video(Video),
}

impl Asset {
    pub fn id(&self) -> AssetId {
        match self {
            Asset::Photo(photo) => photo.id,
            Asset::Video(video) => video.id,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            Asset::Photo(_) => MediaType::Photo,
            Asset::Video(_) => MediaType::Video,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Asset::Photo(photo) => photo.width,
            Asset::Video(video) => video.width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Asset::Photo(photo) => photo.height,
            Asset::Video(video) => video.height,
        }
    }

    /// Provider page link for the asset.
    pub fn page_url(&self) -> &str {
        match self {
            Asset::Photo(photo) => &photo.url,
            Asset::Video(video) => &video.url,
        }
    }

    /// Name of the photographer or videographer.
    pub fn author(&self) -> &str {
        match self {
            Asset::Photo(photo) => &photo.photographer,
            Asset::Video(video) => &video.user.name,
        }
    }

    pub fn as_photo(&self) -> Option<&Photo> {
        match self {
            Asset::Photo(photo) => Some(photo),
            Asset::Video(_) => None,
        }
    }

    pub fn as_video(&self) -> Option<&Video> {
        match self {
            Asset::Video(video) => Some(video),
            Asset::Photo(_) => None,
        }
    }
}

impl From<Photo> for Asset {
    fn from(photo: Photo) -> Self {
        Asset::Photo(photo)
    }
}

impl From<Video> for Asset {
    fn from(video: Video) -> Self {
        Asset::Video(video)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Photo {
    pub id: AssetId,
    pub width: u32,
    pub height: u32,
    /// Provider page for the photo
    pub url: String,
    pub photographer: String,
    pub photographer_url: String,
    pub photographer_id: Option<u64>,
    /// Average colour as a hex string, e.g. `#978E82`
    pub avg_color: Option<String>,
    pub src: PhotoSources,
    /// Accessibility text, may be empty
    pub alt: String,
}

impl Photo {
    /// URL for a size variant, falling back to the original when the
    /// provider left the variant empty.
    pub fn source_url(&self, size: PhotoSize) -> &str {
        let url = self.src.get(size);
        if url.is_empty() { &self.src.original } else { url }
    }
}

/// URL per named size variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhotoSources {
    pub original: String,
    pub large2x: String,
    pub large: String,
    pub medium: String,
    pub small: String,
    pub portrait: String,
    pub landscape: String,
    pub tiny: String,
}

impl PhotoSources {
    pub fn get(&self, size: PhotoSize) -> &str {
        match size {
            PhotoSize::Original => &self.original,
            PhotoSize::Large2x => &self.large2x,
            PhotoSize::Large => &self.large,
            PhotoSize::Medium => &self.medium,
            PhotoSize::Small => &self.small,
            PhotoSize::Portrait => &self.portrait,
            PhotoSize::Landscape => &self.landscape,
            PhotoSize::Tiny => &self.tiny,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Video {
    pub id: AssetId,
    pub width: u32,
    pub height: u32,
    /// Provider page for the video
    pub url: String,
    /// Screenshot used as the thumbnail
    pub image: String,
    /// Length in seconds
    pub duration: u32,
    pub user: VideoUser,
    pub video_files: Vec<VideoFile>,
    pub video_pictures: Vec<VideoPicture>,
}

impl Video {
    /// Best available file: the first `hd` file, otherwise the file with
    /// the largest pixel area.
    pub fn best_file(&self) -> Option<&VideoFile> {
        self.video_files
            .iter()
            .find(|file| file.quality == Some(VideoQuality::Hd))
            .or_else(|| {
                self.video_files.iter().max_by_key(|file| file.pixel_area())
            })
    }

    /// Largest file of the requested quality, falling back to
    /// [`Video::best_file`].
    pub fn file_for(&self, quality: Option<VideoQuality>) -> Option<&VideoFile> {
        quality
            .and_then(|wanted| {
                self.video_files
                    .iter()
                    .filter(|file| file.quality == Some(wanted))
                    .max_by_key(|file| file.pixel_area())
            })
            .or_else(|| self.best_file())
    }

    /// Thumbnail URL, preferring the screenshot over the first preview picture.
    pub fn thumbnail_url(&self) -> Option<&str> {
        if !self.image.is_empty() {
            return Some(&self.image);
        }
        self.video_pictures
            .first()
            .map(|picture| picture.picture.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoUser {
    pub id: u64,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoFile {
    pub id: u64,
    /// `None` when the provider reported no (or an unrecognised) quality
    pub quality: Option<VideoQuality>,
    pub file_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f32>,
    pub link: String,
}

impl VideoFile {
    pub fn pixel_area(&self) -> u64 {
        u64::from(self.width.unwrap_or(0)) * u64::from(self.height.unwrap_or(0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoPicture {
    pub id: u64,
    pub picture: String,
    pub nr: u32,
}

/// Encoding quality tier of a video file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VideoQuality {
    Sd,
    Hd,
    Uhd,
}

impl VideoQuality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            VideoQuality::Sd => "sd",
            VideoQuality::Hd => "hd",
            VideoQuality::Uhd => "uhd",
        }
    }
}

impl Display for VideoQuality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for VideoQuality {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sd" => Ok(VideoQuality::Sd),
            "hd" => Ok(VideoQuality::Hd),
            "uhd" => Ok(VideoQuality::Uhd),
            _ => Err(ModelError::UnknownVideoQuality(s.to_string())),
        }
    }
}
