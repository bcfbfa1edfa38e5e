//! Error types for the reflow library.
//!
//! Page extraction itself never fails: malformed geometry is filtered and
//! degenerate pages produce empty output. Errors only surface at the
//! configuration and I/O boundary.

/// Result type alias for reflow library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or feeding the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value is non-finite or out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization error for configs or fragment files
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
