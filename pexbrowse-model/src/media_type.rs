use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Upstream endpoint family an asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaType {
    /// Still photographs
    #[default]
    Photo,
    /// Video clips
    Video,
}

impl MediaType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MediaType::Photo => "photo",
            MediaType::Video => "video",
        }
    }

    /// Plural noun used in user-facing messages ("photos", "videos").
    pub const fn plural(&self) -> &'static str {
        match self {
            MediaType::Photo => "photos",
            MediaType::Video => "videos",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Photo => write!(f, "Photo"),
            MediaType::Video => write!(f, "Video"),
        }
    }
}

impl FromStr for MediaType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "photo" | "photos" | "image" | "images" => Ok(MediaType::Photo),
            "video" | "videos" => Ok(MediaType::Video),
            _ => Err(ModelError::UnknownMediaType(s.to_string())),
        }
    }
}
