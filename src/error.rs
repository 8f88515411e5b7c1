//! Error types for the Sybil library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`SybilError`] enum. Constructor helpers keep call sites short.
//!
//! # Examples
//!
//! ```
//! use sybil::error::{Result, SybilError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SybilError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Sybil operations.
#[derive(Error, Debug)]
pub enum SybilError {
    /// I/O errors (model files, ledger files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A caller supplied an argument the contract forbids
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was attempted in a state that does not allow it
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Scoring was attempted on a component with no fitted parameters
    #[error("Not trained: {0}")]
    NotTrained(String),

    /// The training pass itself failed
    #[error("Training failure: {0}")]
    Training(String),

    /// Text analysis errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Persisted artifacts that cannot be decoded or fail their checksum
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Ledger append/read errors
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SybilError.
pub type Result<T> = std::result::Result<T, SybilError>;

impl SybilError {
    /// Create a new invalid-argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SybilError::InvalidArgument(msg.into())
    }

    /// Create a new invalid-operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        SybilError::InvalidOperation(msg.into())
    }

    /// Create a new not-trained error.
    pub fn not_trained<S: Into<String>>(msg: S) -> Self {
        SybilError::NotTrained(msg.into())
    }

    /// Create a new training-failure error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        SybilError::Training(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SybilError::Analysis(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        SybilError::Serialization(msg.into())
    }

    /// Create a new ledger error.
    pub fn ledger<S: Into<String>>(msg: S) -> Self {
        SybilError::Ledger(msg.into())
    }
}
