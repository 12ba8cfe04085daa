//! Error types for the textcluster library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`TextClusterError`] enum. The two variants callers usually match on are
//! [`TextClusterError::Config`] (a bad request parameter, reported before any
//! computation) and [`TextClusterError::Data`] (input that cannot be clustered).
//!
//! # Examples
//!
//! ```
//! use textcluster::error::{Result, TextClusterError};
//!
//! fn check_cluster_count(k: usize) -> Result<()> {
//!     if k == 0 {
//!         return Err(TextClusterError::config("invalid cluster count 0"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_cluster_count(0).unwrap_err().is_config());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for textcluster operations.
#[derive(Error, Debug)]
pub enum TextClusterError {
    /// Invalid request parameters (cluster count, text field, ...).
    #[error("Config error: {0}")]
    Config(String),

    /// Input data that cannot be clustered (empty corpus, empty vocabulary).
    #[error("Data error: {0}")]
    Data(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading or writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Error with added context, shown with its whole cause chain
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with TextClusterError.
pub type Result<T> = std::result::Result<T, TextClusterError>;

impl TextClusterError {
    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TextClusterError::Config(msg.into())
    }

    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        TextClusterError::Data(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TextClusterError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TextClusterError::Other(msg.into())
    }

    /// Create a new parse error for malformed input files.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        TextClusterError::Data(format!("Parse error: {}", msg.into()))
    }

    /// Whether this error rejects the request parameters.
    pub fn is_config(&self) -> bool {
        matches!(self, TextClusterError::Config(_))
    }

    /// Whether this error rejects the input data.
    pub fn is_data(&self) -> bool {
        matches!(self, TextClusterError::Data(_))
    }
}
