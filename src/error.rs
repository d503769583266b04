//! Error types for extraction and history storage

use thiserror::Error;

/// Errors that can occur while extracting emails or managing history
#[derive(Error, Debug)]
pub enum ExtractError {
    /// No file was attached to the upload
    #[error("No file uploaded")]
    MissingFile,

    /// The upload carried an empty filename
    #[error("No file selected")]
    EmptyFilename,

    /// File extension outside the allow-list
    #[error("Unsupported file type: .{0}")]
    UnsupportedFile(String),

    /// No text supplied to a text extraction request
    #[error("No text provided")]
    MissingText,

    /// No addresses supplied to a CSV materialization request
    #[error("No emails provided")]
    MissingEmails,

    /// Requested artifact does not exist in the history store
    #[error("File not found")]
    NotFound,

    /// Filename carries path separators or parent references
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// Filesystem failure while persisting or reading artifacts
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Artifact serialization failure
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ExtractError {
    /// Whether the error is the caller's fault rather than the server's
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFile
                | Self::EmptyFilename
                | Self::UnsupportedFile(_)
                | Self::MissingText
                | Self::MissingEmails
                | Self::InvalidFilename(_)
        )
    }
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
