pub mod api_key;
pub mod sources;

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_ASSETS_PER_PAGE, DEFAULT_DEBOUNCE,
    DEFAULT_REQUEST_TIMEOUT,
};

use api_key::ApiKey;

/// Effective settings after every layer has been applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// Without a key every provider call fails with "not configured".
    pub api_key: Option<ApiKey>,
    /// Always ends with `/` so endpoint paths join underneath it.
    pub base_url: Url,
    pub request_timeout: Duration,
}

impl ProviderSettings {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn default_base_url() -> Url {
    match Url::parse(DEFAULT_API_BASE_URL) {
        Ok(url) => url,
        Err(_) => unreachable!("default base url is a valid literal"),
    }
}

/// Host-level behaviour of the asset library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySettings {
    /// Page size requested from the provider, within `1..=80`.
    pub assets_per_page: u32,
    /// Append the author credit to selected asset descriptions.
    pub add_author_credits: bool,
    /// Quiet period after a query change before a fetch is issued.
    pub debounce: Duration,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            assets_per_page: DEFAULT_ASSETS_PER_PAGE,
            add_author_credits: true,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Where the effective settings came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
    /// Names of the environment variables that overrode a value.
    pub env_overrides: Vec<&'static str>,
}
