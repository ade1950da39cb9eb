//! Error types for the drive_export crate.

use thiserror::Error;

/// Errors that can occur while exporting files from Google Drive.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid URL or ID: {0}")]
    InvalidUrlOrId(String),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Unusable local file name: {0:?}")]
    InvalidFileName(String),

    #[error("No cached token at {0}")]
    TokenNotFound(String),

    #[error("Authorization failed: {0}")]
    AuthorizationError(String),

    #[error("Token refresh failed: {0}")]
    TokenRefreshError(String),
}

/// Result type alias for DriveError.
pub type Result<T> = std::result::Result<T, DriveError>;
