//! All error types for the langres crate.
//!
//! These are returned from all fallible operations (store I/O, validation,
//! lookups, and external model calls).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("duplicate key `{0}`")]
    DuplicateKey(String),

    #[error("model error: {0}")]
    Model(String),
}

impl Error {
    /// Creates a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Creates a new not-found error for the given resource id
    pub fn not_found(id: impl Into<String>) -> Self {
        Error::NotFound(id.into())
    }

    /// Creates a new external-model error
    pub fn model(message: impl Into<String>) -> Self {
        Error::Model(message.into())
    }
}
