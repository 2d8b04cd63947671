//! Error taxonomy shared by the loader, the store and the HTTP layer.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, TramosError>;

#[derive(Debug, thiserror::Error)]
pub enum TramosError {
    /// Required request fields missing or the body could not be read.
    #[error("invalid request: {0}")]
    Validation(String),

    /// No boundary document exists for the normalized province key.
    #[error("no boundary file for province '{key}' ({})", .path.display())]
    BoundaryNotFound { key: String, path: PathBuf },

    #[error("failed to read boundary file {}: {source}", .path.display())]
    BoundaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Boundary document present but not a valid feature collection.
    #[error("malformed boundary file {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// Feature collection parsed but a feature lacks a usable `tramo`.
    #[error("feature {index} in {} has no usable 'tramo' property: {reason}", .path.display())]
    DataIntegrity {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    #[error("traffic store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
}

impl TramosError {
    /// True for failures caused by the caller rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, TramosError::Validation(_))
    }
}
