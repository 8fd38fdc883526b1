//! Contract for the host-provided preview/selection dialog.

use async_trait::async_trait;
use pexbrowse_model::{Asset, AssetId, MediaType, RenditionKey};

use crate::library::LibraryMode;

/// What the host dialog is asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    /// Mode the library was opened in
    pub mode: LibraryMode,
    /// Asset to preview
    pub asset_id: AssetId,
    /// Photo or video, ids alone are ambiguous
    pub media_type: MediaType,
}

/// Asset confirmed by the user, with the rendition they picked.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogOutcome {
    /// The asset the user confirmed
    pub asset: Asset,
    /// Rendition picked in the dialog; `None` uses the default
    pub rendition: Option<RenditionKey>,
}

/// Modal dialog owned by the host shell.
///
/// Returning `None` means the user dismissed the dialog; the library treats
/// that as a no-op.
#[async_trait]
pub trait SelectionDialogHost: Send + Sync {
    /// Show the dialog and wait for the user.
    async fn open(&self, request: DialogRequest) -> Option<DialogOutcome>;
}
