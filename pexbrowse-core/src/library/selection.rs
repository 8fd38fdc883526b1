//! Tracks the selected asset and resolves externally supplied selections.

use pexbrowse_model::{
    Asset, AssetId, ExternalAssetRecord, MediaType, RenditionKey,
};

use crate::mapper::AssetMapper;

/// How an external selection can be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Already in the current result set; selected immediately
    Present(AssetId),
    /// Needs a by-id lookup before it counts as selected
    Lookup(AssetId),
}

/// Current selection plus at most one by-id lookup in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: Option<AssetId>,
    /// Id awaiting a by-id lookup; a newer selection replaces it
    pending: Option<AssetId>,
}

impl SelectionTracker {
    /// Currently selected asset, if any.
    pub fn selected(&self) -> Option<AssetId> {
        self.selected
    }

    /// Id whose lookup is still outstanding.
    pub fn pending(&self) -> Option<AssetId> {
        self.pending
    }

    /// Select `asset` and build its external record. Cancels any pending
    /// resolution.
    pub fn select(
        &mut self,
        asset: &Asset,
        rendition: Option<RenditionKey>,
        mapper: &dyn AssetMapper,
        include_credits: bool,
    ) -> ExternalAssetRecord {
        self.selected = Some(asset.id());
        self.pending = None;
        mapper.map_asset(asset, rendition, include_credits)
    }

    /// Start resolving an externally supplied id against the current page.
    ///
    /// Ids found on the page are selected at once; anything else becomes the
    /// pending lookup, replacing any earlier one.
    pub fn begin_resolution(
        &mut self,
        id: AssetId,
        media_type: MediaType,
        items: &[Asset],
    ) -> Resolution {
        let present = items
            .iter()
            .any(|asset| asset.id() == id && asset.media_type() == media_type);

        if present {
            self.selected = Some(id);
            self.pending = None;
            Resolution::Present(id)
        } else {
            self.selected = None;
            self.pending = Some(id);
            Resolution::Lookup(id)
        }
    }

    /// Apply a finished lookup. Results for an id that is no longer pending
    /// are dropped. Returns the id when it is the selection afterwards, which
    /// also covers an overlapping lookup of the same id that finished first.
    pub fn finish_resolution(
        &mut self,
        id: AssetId,
        found: bool,
    ) -> Option<AssetId> {
        if self.pending != Some(id) {
            return self.selected.filter(|selected| *selected == id);
        }
        self.pending = None;
        if found {
            self.selected = Some(id);
        }
        self.selected
    }

    /// Drop the selection and any pending lookup.
    pub fn clear(&mut self) {
        self.selected = None;
        self.pending = None;
    }
}
