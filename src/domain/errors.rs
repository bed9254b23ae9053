//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types; the
//! codec adapter converts dicom-rs errors into [`VeilError`] variants at the
//! boundary.

use thiserror::Error;

/// Main Veil error type
///
/// This is the primary error type used throughout the application.
/// Usage and configuration errors are terminal for a whole run; decode,
/// encode, and dataset errors are recovered at file or tag granularity by
/// the batch coordinator and the transform engine.
#[derive(Debug, Error)]
pub enum VeilError {
    /// Bad command-line arguments or a missing input directory
    #[error("Usage error: {0}")]
    Usage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Failed to decode a DICOM file
    #[error("Failed to decode DICOM file {path}: {message}")]
    Decode { path: String, message: String },

    /// Failed to encode a DICOM file
    #[error("Failed to encode DICOM file {path}: {message}")]
    Encode { path: String, message: String },

    /// Dataset access errors (per-tag reads and writes)
    #[error("Dataset error: {0}")]
    Dataset(String),
}

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, VeilError>;

impl From<std::io::Error> for VeilError {
    fn from(err: std::io::Error) -> Self {
        VeilError::Io(err.to_string())
    }
}
