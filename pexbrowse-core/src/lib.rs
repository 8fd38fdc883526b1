//! Asset-library engine for the Pexels stock-media provider.
//!
//! The crate is organised leaves first:
//!
//! - [`providers`]: raw HTTP access to the provider behind the
//!   [`MediaProvider`](providers::MediaProvider) trait.
//! - [`gateway`]: the failure-normalizing facade the engine talks to.
//! - [`library`]: query state, fetch scheduling, filter controls and the
//!   selection tracker, run as a single actor task behind a
//!   [`LibraryHandle`](library::LibraryHandle).
//! - [`mapper`] and [`dialog`]: contracts for the host-side collaborators.

pub mod dialog;
/// Error taxonomy surfaced to library callers.
pub mod error;
pub mod gateway;
pub mod library;
pub mod mapper;
/// Stock-media provider clients.
pub mod providers;

pub use dialog::{DialogOutcome, DialogRequest, SelectionDialogHost};
pub use error::{LibraryError, Result};
pub use gateway::{Fetched, Gateway};
pub use library::{
    AllowedAssetTypes, Availability, FetchPhase, FetchPlan, FilterControl,
    FilterControls, LibraryEngine, LibraryHandle, LibraryMode, LibraryOptions,
    LibrarySnapshot, QueryState,
};
pub use mapper::{AssetMapper, PexelsAssetMapper};
pub use providers::{
    AssetPage, MediaProvider, PexelsProvider, ProviderError,
};
