//! Error conversion from internal error types.
//!
//! This module provides conversions from engine errors to the executor's
//! [`Error`] type.

use crate::Error;
use soupstore_core::StoreError;

/// Convert a StoreError to an executor Error.
///
/// Every variant maps one to one, so messages are unchanged.
impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SoupNotFound { soup } => Error::SoupNotFound { soup },
            StoreError::InvalidIndex { soup, path } => Error::InvalidIndex { soup, path },
            StoreError::DuplicateExternalId { path, value } => {
                Error::DuplicateExternalId { path, value }
            }
            StoreError::UnsupportedQuery { sql } => Error::UnsupportedQuery { sql },
            StoreError::CursorNotFound { cursor_id } => Error::CursorNotFound { cursor_id },
            StoreError::MalformedArgument { reason } => Error::MalformedArgument { reason },
            StoreError::Serialization(reason) => Error::Serialization { reason },
            StoreError::Io(reason) => Error::Io { reason },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedArgument {
            reason: err.to_string(),
        }
    }
}

/// Convert a StoreResult to an executor Result.
pub fn convert_result<T>(result: soupstore_core::StoreResult<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_survive_conversion() {
        let cases = vec![
            StoreError::soup_not_found("a"),
            StoreError::invalid_index("a", "b.c"),
            StoreError::DuplicateExternalId {
                path: "Id".into(),
                value: "7".into(),
            },
            StoreError::unsupported_query("SELECT 1"),
            StoreError::CursorNotFound { cursor_id: 4 },
        ];
        for err in cases {
            let message = err.to_string();
            assert_eq!(Error::from(err).to_string(), message);
        }
    }

    #[test]
    fn test_system_errors_keep_reason() {
        let err = Error::from(StoreError::Io("disk full".into()));
        assert_eq!(
            err,
            Error::Io {
                reason: "disk full".into()
            }
        );
    }
}
