use std::fmt::{self, Display};

/// Errors produced by model parsers and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidAssetId(String),
    UnknownMediaType(String),
    InvalidFilter { dimension: &'static str, value: String },
    UnknownPhotoSize(String),
    UnknownVideoQuality(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidAssetId(raw) => {
                write!(f, "invalid asset id: {raw:?}")
            }
            ModelError::UnknownMediaType(raw) => {
                write!(f, "unknown media type: {raw:?}")
            }
            ModelError::InvalidFilter { dimension, value } => {
                write!(f, "invalid {dimension} filter value: {value:?}")
            }
            ModelError::UnknownPhotoSize(raw) => {
                write!(f, "unknown photo size: {raw:?}")
            }
            ModelError::UnknownVideoQuality(raw) => {
                write!(f, "unknown video quality: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
