pub mod error;

use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::constants::{
    ENV_API_BASE_URL, ENV_API_KEY, ENV_ASSETS_PER_PAGE, ENV_AUTHOR_CREDITS,
    ENV_DEBOUNCE, ENV_REQUEST_TIMEOUT, MAX_ASSETS_PER_PAGE,
};
use crate::models::api_key::ApiKey;
use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{ConfigMetadata, Settings};
use crate::util::{parse_bool, parse_duration};

use error::ConfigLoadError;

/// Loaded settings plus a record of which layers contributed.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub settings: Settings,
    pub metadata: ConfigMetadata,
}

/// Builder for the layered settings load.
///
/// Precedence, lowest first: defaults, TOML file, environment (after the
/// optional env file has been merged into it), explicit API key override.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    api_key_override: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Key passed on the command line; wins over every other layer.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key_override = Some(key.into());
        self
    }

    /// Load using the process environment, merging the env file first when
    /// one was configured. Variables already set are not overwritten by the
    /// env file.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.env_file {
            Some(path) => {
                dotenvy::from_path(path)?;
                debug!(path = %path.display(), "merged env file");
                true
            }
            None => false,
        };

        let mut load = self.load_with_env(EnvConfig::from_process_env())?;
        load.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Load against an explicit environment snapshot. The env file is not
    /// consulted.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let mut settings = Settings::default();
        let mut metadata = ConfigMetadata::default();

        if let Some(path) = &self.config_path {
            let file = read_config_file(path)?;
            apply_file(&mut settings, file)?;
            metadata.config_path = Some(path.clone());
        }

        apply_env(&mut settings, &env, &mut metadata.env_overrides)?;

        if let Some(key) = self.api_key_override.as_deref()
            && let Some(key) = ApiKey::new(key)
        {
            settings.provider.api_key = Some(key);
        }

        validate(&settings)?;

        info!(
            configured = settings.provider.is_configured(),
            base_url = %settings.provider.base_url,
            assets_per_page = settings.library.assets_per_page,
            debounce = ?settings.library.debounce,
            "configuration loaded"
        );

        Ok(ConfigLoad { settings, metadata })
    }
}

fn read_config_file(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        read_to_string(path).map_err(|source| ConfigLoadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_file(
    settings: &mut Settings,
    file: FileConfig,
) -> Result<(), ConfigLoadError> {
    let provider = file.provider;
    if let Some(key) = provider.api_key.and_then(ApiKey::new) {
        settings.provider.api_key = Some(key);
    }
    if let Some(raw) = provider.base_url {
        settings.provider.base_url = parse_base_url(&raw)?;
    }
    if let Some(raw) = provider.request_timeout {
        settings.provider.request_timeout =
            duration_value("provider.request_timeout", &raw)?;
    }

    let library = file.library;
    if let Some(per_page) = library.assets_per_page {
        settings.library.assets_per_page = per_page;
    }
    if let Some(credits) = library.add_author_credits {
        settings.library.add_author_credits = credits;
    }
    if let Some(raw) = library.debounce {
        settings.library.debounce = duration_value("library.debounce", &raw)?;
    }
    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    env: &EnvConfig,
    overrides: &mut Vec<&'static str>,
) -> Result<(), ConfigLoadError> {
    if let Some(key) = env.api_key.clone().and_then(ApiKey::new) {
        settings.provider.api_key = Some(key);
        overrides.push(ENV_API_KEY);
    }
    if let Some(raw) = &env.api_base_url {
        settings.provider.base_url = parse_base_url(raw)?;
        overrides.push(ENV_API_BASE_URL);
    }
    if let Some(raw) = &env.request_timeout {
        settings.provider.request_timeout =
            duration_value(ENV_REQUEST_TIMEOUT, raw)?;
        overrides.push(ENV_REQUEST_TIMEOUT);
    }
    if let Some(raw) = &env.assets_per_page {
        settings.library.assets_per_page = raw.trim().parse().map_err(|_| {
            ConfigLoadError::InvalidNumber {
                key: ENV_ASSETS_PER_PAGE,
                value: raw.clone(),
            }
        })?;
        overrides.push(ENV_ASSETS_PER_PAGE);
    }
    if let Some(raw) = &env.author_credits {
        settings.library.add_author_credits =
            parse_bool(raw).ok_or_else(|| ConfigLoadError::InvalidBool {
                key: ENV_AUTHOR_CREDITS,
                value: raw.clone(),
            })?;
        overrides.push(ENV_AUTHOR_CREDITS);
    }
    if let Some(raw) = &env.debounce {
        settings.library.debounce = duration_value(ENV_DEBOUNCE, raw)?;
        overrides.push(ENV_DEBOUNCE);
    }
    Ok(())
}

fn validate(settings: &Settings) -> Result<(), ConfigLoadError> {
    let per_page = settings.library.assets_per_page;
    if per_page == 0 || per_page > MAX_ASSETS_PER_PAGE {
        return Err(ConfigLoadError::AssetsPerPageOutOfRange {
            value: per_page,
            max: MAX_ASSETS_PER_PAGE,
        });
    }
    Ok(())
}

fn duration_value(
    key: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    parse_duration(raw).ok_or_else(|| ConfigLoadError::InvalidDuration {
        key,
        value: raw.to_string(),
    })
}

/// Parse a base URL, forcing a trailing slash so relative endpoint paths
/// resolve beneath it.
fn parse_base_url(raw: &str) -> Result<Url, ConfigLoadError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized).map_err(|source| ConfigLoadError::InvalidBaseUrl {
        value: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = parse_base_url("http://127.0.0.1:9000/mock").expect("url");
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/mock/");
        assert_eq!(url.join("v1/curated").expect("join").path(), "/mock/v1/curated");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut settings = Settings::default();
        settings.library.assets_per_page = 0;
        assert!(matches!(
            validate(&settings),
            Err(ConfigLoadError::AssetsPerPageOutOfRange { value: 0, .. })
        ));
    }
}
