//! Query state engine, filter controls and selection tracking.

mod engine;
pub mod filters;
mod handle;
pub mod messages;
/// Host-supplied options and mode.
pub mod options;
/// Request routing from query state.
pub mod plan;
pub mod query;
pub mod scheduler;
pub mod selection;
mod snapshot;

pub use engine::LibraryEngine;
pub use filters::{FilterControl, FilterControls};
pub use handle::LibraryHandle;
pub use messages::Message;
pub use options::{AllowedAssetTypes, Availability, LibraryMode, LibraryOptions};
pub use plan::FetchPlan;
pub use query::{Filters, QueryState};
pub use scheduler::{FetchPhase, FetchScheduler, FetchTicket};
pub use selection::{Resolution, SelectionTracker};
pub use snapshot::LibrarySnapshot;
