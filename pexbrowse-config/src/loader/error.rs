use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid API base URL '{value}'")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid duration '{value}' for {key}")]
    InvalidDuration { key: &'static str, value: String },
    #[error("invalid number '{value}' for {key}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("invalid boolean '{value}' for {key}")]
    InvalidBool { key: &'static str, value: String },
    #[error("assets per page must be between 1 and {max}, got {value}")]
    AssetsPerPageOutOfRange { value: u32, max: u32 },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
