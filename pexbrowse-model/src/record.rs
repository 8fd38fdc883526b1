use crate::media_type::MediaType;

/// An asset as handed to the host's asset store once a user picks it.
///
/// The record is provider-neutral: everything the host needs to reference
/// the remote file is flattened into plain fields, including author credit
/// and the rendition that was chosen.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalAssetRecord {
    /// Provider-side identifier, kept as a string for the host store
    pub source_id: String,
    pub kind: MediaType,
    /// Direct link to the chosen rendition
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_url: String,
    /// Landing page on the provider's site
    pub page_url: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub thumbnail_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub duration_secs: Option<u32>,
    /// Rendition label, e.g. `medium` or `hd`
    pub rendition: String,
}

impl ExternalAssetRecord {
    pub fn is_video(&self) -> bool {
        self.kind == MediaType::Video
    }
}
