use thiserror::Error;

use crate::providers::ProviderError;

/// Conditions surfaced by the asset library to its host.
///
/// Cloneable so the latest error can travel inside published snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("Pexels API key is not configured")]
    NotConfigured,

    #[error("Upstream request failed: {0}")]
    UpstreamRequestFailed(String),

    #[error("Asset {id} not found")]
    AssetNotFound { id: String },

    #[error("Neither images nor videos are allowed for this field")]
    UnsupportedAssetType,

    #[error("Asset library engine has stopped")]
    EngineStopped,
}

impl LibraryError {
    /// Lookup miss for an asset id.
    pub fn asset_not_found(id: impl ToString) -> Self {
        LibraryError::AssetNotFound { id: id.to_string() }
    }

    /// Whether a retry can be expected to help without operator action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LibraryError::UpstreamRequestFailed(_))
    }
}

impl From<ProviderError> for LibraryError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured => LibraryError::NotConfigured,
            other => LibraryError::UpstreamRequestFailed(other.to_string()),
        }
    }
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, LibraryError>;
