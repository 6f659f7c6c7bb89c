//! Region error types

use thiserror::Error;

/// Errors reported by a host region
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    /// The region is no longer attached to the host surface
    #[error("Region detached: {0}")]
    Detached(String),

    /// The host refused the style write
    #[error("Style rejected: {0}")]
    StyleRejected(String),

    /// Generic region error
    #[error("Region error: {0}")]
    Other(String),
}

/// Result type for region operations
pub type Result<T> = std::result::Result<T, RegionError>;
