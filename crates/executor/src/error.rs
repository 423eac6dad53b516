//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Lossless**: No error information is lost in conversion from internal errors

use serde::{Deserialize, Serialize};
use soupstore_core::CursorId;

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Not Found | `SoupNotFound`, `CursorNotFound` | Entity doesn't exist |
/// | Index | `InvalidIndex` | Path has no index spec |
/// | Constraint | `DuplicateExternalId` | External id matches several entries |
/// | Query | `UnsupportedQuery` | Smart SQL shape not handled |
/// | Validation | `MalformedArgument` | Bad input |
/// | System | `Serialization`, `Io` | Infrastructure errors |
///
/// # Example
///
/// ```
/// use soupstore_executor::{Command, Error, Executor};
///
/// let executor = Executor::ephemeral();
/// match executor.execute(Command::SoupExists { soup_name: " ".into() }) {
///     Err(Error::MalformedArgument { reason }) => assert!(reason.contains("soup name")),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Not Found ====================
    /// Soup was never registered
    #[error("Soup: {soup} does not exist")]
    SoupNotFound { soup: String },

    /// Cursor is not open
    #[error("Cursor: {cursor_id} does not exist")]
    CursorNotFound { cursor_id: CursorId },

    // ==================== Index ====================
    /// Path is not indexed in the soup
    #[error("{soup} does not have an index on {path}")]
    InvalidIndex { soup: String, path: String },

    // ==================== Constraint ====================
    /// Upsert by external id matched more than one entry
    #[error("There are more than one soup elements where {path} is {value}")]
    DuplicateExternalId { path: String, value: String },

    // ==================== Query ====================
    /// No smart query template handles the SQL
    #[error("SmartQuery not supported: {sql}")]
    UnsupportedQuery { sql: String },

    // ==================== Validation ====================
    /// Invalid or missing argument
    #[error("malformed argument: {reason}")]
    MalformedArgument { reason: String },

    // ==================== System ====================
    /// Snapshot or argument could not be (de)serialized
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Snapshot storage failed
    #[error("I/O error: {reason}")]
    Io { reason: String },
}

impl Error {
    /// Category name, as listed in the table above
    pub fn kind(&self) -> &'static str {
        match self {
            Error::SoupNotFound { .. } | Error::CursorNotFound { .. } => "NotFound",
            Error::InvalidIndex { .. } => "InvalidIndex",
            Error::DuplicateExternalId { .. } => "DuplicateExternalId",
            Error::UnsupportedQuery { .. } => "UnsupportedQuery",
            Error::MalformedArgument { .. } => "MalformedArgument",
            Error::Serialization { .. } => "Serialization",
            Error::Io { .. } => "Io",
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedArgument {
            reason: reason.into(),
        }
    }
}
