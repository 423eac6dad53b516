//! Error types for the document store
//!
//! This module defines the error taxonomy shared by the engine and the
//! executor. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations. The `Display` text of each variant is part of the caller
//! contract (the bridge forwards it verbatim).

use crate::cursor::CursorId;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Error types for the document store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Operation referenced a soup that was never registered
    #[error("Soup: {soup} does not exist")]
    SoupNotFound {
        /// Soup name
        soup: String,
    },

    /// Operation referenced a path with no index spec
    #[error("{soup} does not have an index on {path}")]
    InvalidIndex {
        /// Soup name
        soup: String,
        /// Offending path
        path: String,
    },

    /// Upsert by external id matched more than one stored entry
    #[error("There are more than one soup elements where {path} is {value}")]
    DuplicateExternalId {
        /// External id path
        path: String,
        /// External id value, rendered as text
        value: String,
    },

    /// Smart SQL matched none of the supported templates
    #[error("SmartQuery not supported: {sql}")]
    UnsupportedQuery {
        /// Offending SQL text
        sql: String,
    },

    /// Cursor id is not open
    #[error("Cursor: {cursor_id} does not exist")]
    CursorNotFound {
        /// Cursor id
        cursor_id: CursorId,
    },

    /// Invalid or missing argument
    #[error("Malformed argument: {reason}")]
    MalformedArgument {
        /// What was wrong
        reason: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error (storage slots)
    #[error("I/O error: {0}")]
    Io(String),
}

impl StoreError {
    /// Soup does not exist
    pub fn soup_not_found(soup: impl Into<String>) -> Self {
        StoreError::SoupNotFound { soup: soup.into() }
    }

    /// Path is not indexed in the soup
    pub fn invalid_index(soup: impl Into<String>, path: impl Into<String>) -> Self {
        StoreError::InvalidIndex {
            soup: soup.into(),
            path: path.into(),
        }
    }

    /// Smart SQL is not one of the supported shapes
    pub fn unsupported_query(sql: impl Into<String>) -> Self {
        StoreError::UnsupportedQuery { sql: sql.into() }
    }

    /// Invalid argument
    pub fn malformed(reason: impl Into<String>) -> Self {
        StoreError::MalformedArgument {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}
