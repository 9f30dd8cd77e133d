//! Error types for the document store and record mapper

use thiserror::Error;

use super::category::Category;

/// Errors surfaced by store, mapper and session operations.
///
/// Every variant is recoverable: the UI reports it and the user may retry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("{filename} not found in {category}")]
    NotFound { category: Category, filename: String },

    #[error("{filename} already exists in {category}")]
    AlreadyExists { category: Category, filename: String },

    #[error("malformed document {filename}: {reason}")]
    MalformedDocument { filename: String, reason: String },

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{0} has no specialized form")]
    NoSpecializedForm(Category),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
