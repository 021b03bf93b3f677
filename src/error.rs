use std::io;
use thiserror::Error;

/// Custom error type for the Jetson exporter
#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("Exposition error: {0}")]
    Exposition(String),

    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Result type alias for the Jetson exporter
pub type Result<T> = std::result::Result<T, ExporterError>;

impl ExporterError {
    /// Create an invalid configuration error
    pub fn invalid_configuration<S: Into<String>>(msg: S) -> Self {
        ExporterError::InvalidConfiguration(msg.into())
    }

    /// Create a malformed row error
    pub fn malformed_row<S: Into<String>>(msg: S) -> Self {
        ExporterError::MalformedRow(msg.into())
    }

    pub fn telemetry<S: Into<String>>(msg: S) -> Self {
        ExporterError::Telemetry(msg.into())
    }

    pub fn exposition<S: Into<String>>(msg: S) -> Self {
        ExporterError::Exposition(msg.into())
    }
}
