use std::io;
use thiserror::Error;

/// Custom error type for the forcedel engine
#[derive(Error, Debug)]
pub enum ForcedelError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("External tool failure: {0}")]
    ExternalTool(String),

    #[error("Elevation required: {0}")]
    ElevationRequired(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the forcedel engine
pub type Result<T> = std::result::Result<T, ForcedelError>;

impl ForcedelError {
    /// Create an invalid path error
    pub fn invalid_path<S: Into<String>>(msg: S) -> Self {
        ForcedelError::InvalidPath(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied<S: Into<String>>(msg: S) -> Self {
        ForcedelError::PermissionDenied(msg.into())
    }

    /// Create an external tool error
    pub fn external_tool<S: Into<String>>(msg: S) -> Self {
        ForcedelError::ExternalTool(msg.into())
    }

    /// Create an elevation required error
    pub fn elevation_required<S: Into<String>>(msg: S) -> Self {
        ForcedelError::ElevationRequired(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ForcedelError::Other(msg.into())
    }
}
