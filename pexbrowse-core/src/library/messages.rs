//! Asset library messages

use pexbrowse_model::{
    Asset, AssetId, ExternalAssetRecord, FilterSetting, MediaType,
    RenditionKey,
};
use tokio::sync::oneshot;

use crate::error::Result;
use crate::gateway::Fetched;
use crate::providers::AssetPage;

use super::plan::FetchPlan;
use super::scheduler::FetchTicket;

/// Everything the engine task reacts to.
#[derive(Debug)]
pub enum Message {
    // Commands from a LibraryHandle
    /// Update the free-text search
    UpdateQuery(String),
    /// Switch between photos and videos
    SetMediaType(MediaType),
    /// Change one filter dimension
    SetFilter(FilterSetting),
    /// Jump to a 1-based page
    SetPage(u32),
    /// Advance one page unless already on the last
    NextPage,
    /// Go back one page unless already on the first
    PreviousPage,
    /// Reset every filter
    ClearAllFilters,
    /// Re-issue the current request, bypassing dedup
    Retry,
    /// Select an asset the caller already holds
    Select {
        asset: Box<Asset>,
        rendition: Option<RenditionKey>,
        reply: oneshot::Sender<ExternalAssetRecord>,
    },
    /// Select an asset from the current result set
    SelectById {
        id: AssetId,
        rendition: Option<RenditionKey>,
        reply: oneshot::Sender<Result<ExternalAssetRecord>>,
    },
    /// Validate and select an id supplied from outside
    ResolveSelection {
        id: String,
        media_type: MediaType,
        reply: Option<oneshot::Sender<Option<AssetId>>>,
    },

    // Internal events
    /// A spawned fetch came back
    FetchCompleted {
        ticket: FetchTicket,
        plan: FetchPlan,
        fetched: Fetched<AssetPage>,
    },
    /// A spawned by-id lookup came back
    ResolutionCompleted {
        id: AssetId,
        fetched: Fetched<Option<Asset>>,
        reply: Option<oneshot::Sender<Option<AssetId>>>,
    },
}

impl Message {
    /// Whether the message was sent through a handle (and counts towards
    /// [`LibrarySnapshot::commands_applied`](super::LibrarySnapshot::commands_applied)).
    pub fn is_command(&self) -> bool {
        !matches!(
            self,
            Message::FetchCompleted { .. } | Message::ResolutionCompleted { .. }
        )
    }

    /// Convert to string for debugging
    pub fn name(&self) -> &'static str {
        match self {
            Message::UpdateQuery(_) => "UpdateQuery",
            Message::SetMediaType(_) => "SetMediaType",
            Message::SetFilter(_) => "SetFilter",
            Message::SetPage(_) => "SetPage",
            Message::NextPage => "NextPage",
            Message::PreviousPage => "PreviousPage",
            Message::ClearAllFilters => "ClearAllFilters",
            Message::Retry => "Retry",
            Message::Select { .. } => "Select",
            Message::SelectById { .. } => "SelectById",
            Message::ResolveSelection { .. } => "ResolveSelection",
            Message::FetchCompleted { .. } => "FetchCompleted",
            Message::ResolutionCompleted { .. } => "ResolutionCompleted",
        }
    }
}
