//! Error types for zoombox_core

use thiserror::Error;
use zoombox_platform::Size;

use crate::policy::FitPolicy;
use crate::zoom::ZoomId;

/// Errors raised while configuring or recomputing a zoom
#[derive(Error, Debug)]
pub enum ZoomError {
    /// Neither the options nor the coordinator defaults named a boundary
    #[error("{0} has no boundary region")]
    MissingBoundary(ZoomId),

    /// The zoom was registered without elements and without a guide
    #[error("{0} has no guide region")]
    MissingGuide(ZoomId),

    /// The selected ratio is not a usable scale factor
    #[error("unusable {policy} scale factor {factor} (boundary {boundary}, guide {guide})")]
    InvalidRatio {
        policy: FitPolicy,
        boundary: Size,
        guide: Size,
        factor: f64,
    },

    /// A fit policy name could not be parsed
    #[error("unknown fit policy: {0}")]
    UnknownPolicy(String),

    /// Settings could not be parsed
    #[error("invalid settings: {0}")]
    Settings(String),

    /// Settings file could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ZoomError {
    fn from(err: toml::de::Error) -> Self {
        ZoomError::Settings(err.to_string())
    }
}

/// Result type for zoombox_core operations
pub type Result<T> = std::result::Result<T, ZoomError>;
