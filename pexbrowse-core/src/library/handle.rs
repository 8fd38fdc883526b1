use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use pexbrowse_model::{
    Asset, AssetId, ExternalAssetRecord, FilterSetting, MediaType,
    RenditionKey,
};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::dialog::{DialogRequest, SelectionDialogHost};
use crate::error::{LibraryError, Result};

use super::messages::Message;
use super::options::{Availability, LibraryMode};
use super::snapshot::LibrarySnapshot;

/// Cloneable front end to a running [`LibraryEngine`](super::LibraryEngine).
///
/// Query commands return as soon as they are queued; observe their effect
/// through [`snapshot`](Self::snapshot), [`subscribe`](Self::subscribe) or
/// [`settled`](Self::settled).
#[derive(Debug, Clone)]
pub struct LibraryHandle {
    sender: mpsc::UnboundedSender<Message>,
    state: watch::Receiver<LibrarySnapshot>,
    mode: LibraryMode,
    commands_sent: Arc<AtomicU64>,
}

impl LibraryHandle {
    pub(super) fn new(
        sender: mpsc::UnboundedSender<Message>,
        state: watch::Receiver<LibrarySnapshot>,
        mode: LibraryMode,
    ) -> Self {
        Self {
            sender,
            state,
            mode,
            commands_sent: Arc::new(AtomicU64::new(0)),
        }
    }

    fn send(&self, message: Message) -> Result<()> {
        self.commands_sent.fetch_add(1, Ordering::SeqCst);
        self.sender
            .send(message)
            .map_err(|_| LibraryError::EngineStopped)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Message,
    ) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.send(build(reply))?;
        response.await.map_err(|_| LibraryError::EngineStopped)
    }

    /// Mode this library was opened in.
    pub fn mode(&self) -> LibraryMode {
        self.mode
    }

    /// Set the free-text search. An empty (or blank) query switches to the
    /// curated/popular feed and clears every filter.
    pub fn search(&self, query: impl Into<String>) -> Result<()> {
        self.send(Message::UpdateQuery(query.into()))
    }

    /// Switch between photos and videos. Ignored for types the library does not allow.
    pub fn set_media_type(&self, media_type: MediaType) -> Result<()> {
        self.send(Message::SetMediaType(media_type))
    }

    /// Changes to a currently disabled dimension are ignored.
    pub fn set_filter(&self, setting: FilterSetting) -> Result<()> {
        self.send(Message::SetFilter(setting))
    }

    /// Jump to a page, 1-based.
    pub fn set_page(&self, page: u32) -> Result<()> {
        self.send(Message::SetPage(page))
    }

    /// Advance one page. Ignored on the last page of the results currently
    /// shown.
    pub fn next_page(&self) -> Result<()> {
        self.send(Message::NextPage)
    }

    /// Go back one page. Ignored on the first page.
    pub fn previous_page(&self) -> Result<()> {
        self.send(Message::PreviousPage)
    }

    /// Drop every filter value in one step.
    pub fn clear_all_filters(&self) -> Result<()> {
        self.send(Message::ClearAllFilters)
    }

    /// Re-issue the current request unchanged.
    pub fn retry(&self) -> Result<()> {
        if self.state.borrow().availability
            == Availability::UnsupportedAssetTypes
        {
            return Err(LibraryError::UnsupportedAssetType);
        }
        self.send(Message::Retry)
    }

    /// Select `asset`, returning the record for the host's asset store.
    pub async fn select(
        &self,
        asset: Asset,
        rendition: Option<RenditionKey>,
    ) -> Result<ExternalAssetRecord> {
        self.request(|reply| Message::Select {
            asset: Box::new(asset),
            rendition,
            reply,
        })
        .await
    }

    /// Select an asset from the current result page.
    pub async fn select_by_id(
        &self,
        id: AssetId,
        rendition: Option<RenditionKey>,
    ) -> Result<ExternalAssetRecord> {
        self.request(|reply| Message::SelectById {
            id,
            rendition,
            reply,
        })
        .await?
    }

    /// Validate an externally supplied id, looking it up by id when it is not
    /// on the current page. Returns the selected id, or `None` when the asset
    /// does not exist or the lookup failed.
    pub async fn resolve_external_selection(
        &self,
        id: &str,
        media_type: MediaType,
    ) -> Result<Option<AssetId>> {
        self.request(|reply| Message::ResolveSelection {
            id: id.to_string(),
            media_type,
            reply: Some(reply),
        })
        .await
    }

    /// Open the host dialog for `asset`. In parameter mode a confirmed
    /// asset is selected; in library mode the dialog is informational.
    pub async fn preview_and_select(
        &self,
        host: &dyn SelectionDialogHost,
        asset: &Asset,
    ) -> Result<Option<ExternalAssetRecord>> {
        let request = DialogRequest {
            mode: self.mode,
            asset_id: asset.id(),
            media_type: asset.media_type(),
        };

        let Some(outcome) = host.open(request).await else {
            debug!(asset_id = %asset.id(), "selection dialog dismissed");
            return Ok(None);
        };

        match self.mode {
            LibraryMode::Parameter => {
                self.select(outcome.asset, outcome.rendition).await.map(Some)
            }
            LibraryMode::Library => {
                info!(asset_id = %outcome.asset.id(), "asset previewed");
                Ok(None)
            }
        }
    }

    /// Latest published state.
    pub fn snapshot(&self) -> LibrarySnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<LibrarySnapshot> {
        self.state.clone()
    }

    /// Wait until every command sent through this handle (and its clones)
    /// has been applied and the engine has nothing left to do.
    pub async fn settled(&self) -> Result<LibrarySnapshot> {
        let target = self.commands_sent.load(Ordering::SeqCst);
        let mut state = self.state.clone();
        let snapshot = state
            .wait_for(|snapshot| {
                snapshot.commands_applied >= target && snapshot.is_settled()
            })
            .await
            .map_err(|_| LibraryError::EngineStopped)?
            .clone();
        Ok(snapshot)
    }
}
