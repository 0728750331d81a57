//! Trace error types.

use thiserror::Error;

/// Errors that can occur when exporting or importing a trace
#[derive(Debug, Error)]
pub enum TraceError {
    /// Serialization to JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Trace version is not supported by this version
    #[error("Unsupported trace version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
