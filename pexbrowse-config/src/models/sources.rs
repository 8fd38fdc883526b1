use serde::{Deserialize, Serialize};

use crate::constants::{
    ENV_API_BASE_URL, ENV_API_KEY, ENV_ASSETS_PER_PAGE, ENV_AUTHOR_CREDITS,
    ENV_DEBOUNCE, ENV_REQUEST_TIMEOUT,
};
use crate::util::non_empty;

/// Raw configuration as defined in a TOML file.
///
/// ```toml
/// [provider]
/// api_key = "..."
/// request_timeout = "10s"
///
/// [library]
/// assets_per_page = 24
/// add_author_credits = false
/// debounce = "250ms"
/// ```
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub provider: FileProviderConfig,
    #[serde(default)]
    pub library: FileLibraryConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Humantime string, e.g. `"30s"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileLibraryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_author_credits: Option<bool>,
    /// Humantime string, e.g. `"300ms"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debounce: Option<String>,
}

/// Environment-derived configuration values, still unparsed.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub request_timeout: Option<String>,
    pub assets_per_page: Option<String>,
    pub author_credits: Option<String>,
    pub debounce: Option<String>,
}

impl EnvConfig {
    /// Snapshot the process environment.
    pub fn from_process_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));
        Self {
            api_key: get(ENV_API_KEY),
            api_base_url: get(ENV_API_BASE_URL),
            request_timeout: get(ENV_REQUEST_TIMEOUT),
            assets_per_page: get(ENV_ASSETS_PER_PAGE),
            author_credits: get(ENV_AUTHOR_CREDITS),
            debounce: get(ENV_DEBOUNCE),
        }
    }
}
