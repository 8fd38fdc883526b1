use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::asset::VideoQuality;
use crate::error::ModelError;

/// Named photo size variants served by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PhotoSize {
    /// Source resolution
    Original,
    /// 1880px width, aspect preserved
    Large2x,
    /// 940px width, aspect preserved
    Large,
    /// 700px width, aspect preserved (default)
    #[default]
    Medium,
    /// 400px width, aspect preserved
    Small,
    /// 800x1200 crop
    Portrait,
    /// 1200x627 crop
    Landscape,
    /// 280x200 crop
    Tiny,
}

impl PhotoSize {
    /// All available photo sizes for UI enumeration
    pub const ALL: [PhotoSize; 8] = [
        Self::Original,
        Self::Large2x,
        Self::Large,
        Self::Medium,
        Self::Small,
        Self::Portrait,
        Self::Landscape,
        Self::Tiny,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Large2x => "large2x",
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Small => "small",
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::Tiny => "tiny",
        }
    }

    /// Pixel dimensions of this variant for a source of `width` x `height`.
    ///
    /// Width-bound variants keep the aspect ratio and never upscale; crop
    /// variants have fixed dimensions.
    pub fn dimensions(self, width: u32, height: u32) -> (u32, u32) {
        let scaled = |target: u32| -> (u32, u32) {
            if width == 0 || target >= width {
                return (width, height);
            }
            let h = (u64::from(target) * u64::from(height) + u64::from(width) / 2)
                / u64::from(width);
            (target, h as u32)
        };

        match self {
            Self::Original => (width, height),
            Self::Large2x => scaled(1880),
            Self::Large => scaled(940),
            Self::Medium => scaled(700),
            Self::Small => scaled(400),
            Self::Portrait => (800, 1200),
            Self::Landscape => (1200, 627),
            Self::Tiny => (280, 200),
        }
    }
}

impl Display for PhotoSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original => write!(f, "Original"),
            Self::Large2x => write!(f, "Large 2x"),
            Self::Large => write!(f, "Large"),
            Self::Medium => write!(f, "Medium"),
            Self::Small => write!(f, "Small"),
            Self::Portrait => write!(f, "Portrait"),
            Self::Landscape => write!(f, "Landscape"),
            Self::Tiny => write!(f, "Tiny"),
        }
    }
}

impl FromStr for PhotoSize {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::UnknownPhotoSize(s.to_string()))
    }
}

/// Desired rendition of an asset when it is selected.
///
/// A key that does not match the asset variant (a size for a video, a
/// quality for a photo) is ignored in favour of the variant default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenditionKey {
    Size(PhotoSize),
    Quality(VideoQuality),
}

impl RenditionKey {
    pub fn photo_size(self) -> Option<PhotoSize> {
        match self {
            RenditionKey::Size(size) => Some(size),
            RenditionKey::Quality(_) => None,
        }
    }

    pub fn video_quality(self) -> Option<VideoQuality> {
        match self {
            RenditionKey::Quality(quality) => Some(quality),
            RenditionKey::Size(_) => None,
        }
    }
}

impl From<PhotoSize> for RenditionKey {
    fn from(size: PhotoSize) -> Self {
        RenditionKey::Size(size)
    }
}

impl From<VideoQuality> for RenditionKey {
    fn from(quality: VideoQuality) -> Self {
        RenditionKey::Quality(quality)
    }
}
