//! Configuration for the pexbrowse asset library.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! an optional `.env` file, then process environment variables. The result is
//! a validated [`Settings`] value that the engine and CLI consume as-is.

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::api_key::ApiKey;
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    ConfigMetadata, LibrarySettings, ProviderSettings, Settings,
};
