use std::fmt::{self, Display};

use pexbrowse_model::MediaType;

/// How the host embeds the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LibraryMode {
    /// Picking a value for a single field parameter
    Parameter,
    /// Free browsing of the asset library
    #[default]
    Library,
}

impl LibraryMode {
    /// Host-supplied mode name; empty means library mode.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "parameter" => Some(LibraryMode::Parameter),
            "library" | "" => Some(LibraryMode::Library),
            _ => None,
        }
    }

    /// Name as the host passes it.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LibraryMode::Parameter => "parameter",
            LibraryMode::Library => "library",
        }
    }
}

impl Display for LibraryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// Asset kinds the host field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllowedAssetTypes {
    /// Photos may be browsed
    pub images: bool,
    /// Videos may be browsed
    pub videos: bool,
}

impl AllowedAssetTypes {
    /// Both photos and videos.
    pub const ALL: Self = Self {
        images: true,
        videos: true,
    };
    /// Nothing allowed; only meaningful in parameter mode.
    pub const NONE: Self = Self {
        images: false,
        videos: false,
    };

    /// Photos only.
    pub fn images_only() -> Self {
        Self {
            images: true,
            videos: false,
        }
    }

    /// Videos only.
    pub fn videos_only() -> Self {
        Self {
            images: false,
            videos: true,
        }
    }

    /// Build from host-supplied type names (`image`, `video`); unknown names
    /// are skipped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().fold(Self::NONE, |mut allowed, name| {
            match name.as_ref().parse::<MediaType>() {
                Ok(MediaType::Photo) => allowed.images = true,
                Ok(MediaType::Video) => allowed.videos = true,
                Err(_) => {}
            }
            allowed
        })
    }

    /// Whether this media type may be browsed.
    pub fn allows(&self, media_type: MediaType) -> bool {
        match media_type {
            MediaType::Photo => self.images,
            MediaType::Video => self.videos,
        }
    }

    /// True when neither photos nor videos are allowed.
    pub fn is_empty(&self) -> bool {
        !self.images && !self.videos
    }

    /// Video when it is the only allowed kind, photo otherwise.
    pub fn initial_media_type(&self) -> MediaType {
        if self.videos && !self.images {
            MediaType::Video
        } else {
            MediaType::Photo
        }
    }
}

impl Default for AllowedAssetTypes {
    fn default() -> Self {
        Self::ALL
    }
}

/// Whether the library can show anything at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    /// At least one media type can be browsed
    #[default]
    Available,
    /// Parameter mode with neither images nor videos allowed; nothing is
    /// ever fetched.
    UnsupportedAssetTypes,
}

/// Initialization parameters passed in by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryOptions {
    /// Query to open the library with
    pub initial_search: String,
    /// Browsing or picking a parameter value
    pub mode: LibraryMode,
    /// Media types the host accepts
    pub allowed_asset_types: AllowedAssetTypes,
    /// Previously chosen asset id, resolved at startup
    pub selected_asset_id: Option<String>,
    /// Media type of `selected_asset_id`; defaults to the initial media type
    pub selected_media_type: Option<MediaType>,
    /// Start without loading the first page; the first query change fetches
    pub skip_initial_fetch: bool,
}

impl LibraryOptions {
    /// [`Availability::UnsupportedAssetTypes`] in parameter mode with an
    /// empty allowed set.
    pub fn availability(&self) -> Availability {
        if self.mode == LibraryMode::Parameter
            && self.allowed_asset_types.is_empty()
        {
            Availability::UnsupportedAssetTypes
        } else {
            Availability::Available
        }
    }
}
