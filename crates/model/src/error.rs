//! Model Error Types
//!
//! Structured errors using `exn` for automatic location tracking. Almost all
//! of them come out of the snapshot codec: a stored snapshot that fails to
//! decode should be treated as absent by the caller, never as fatal.

use derive_more::{Display, Error};

/// A model error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The snapshot document is not valid JSON.
    #[display("snapshot is not valid JSON")]
    Json,
    /// A record was recognised as an entity but lacks one of its required fields.
    #[display("{entity} record is missing required field '{field}'")]
    MissingField {
        /// Entity the record was recognised as.
        entity: &'static str,
        /// The missing field.
        field: &'static str,
    },
    /// A field is present but holds a value of the wrong shape.
    #[display("{entity} record has invalid field '{field}'")]
    InvalidField {
        /// Entity the record was recognised as.
        entity: &'static str,
        /// The offending field.
        field: &'static str,
    },
    /// The decoded tree is not the entity the caller asked for.
    #[display("expected a {_0} record at the top level")]
    UnexpectedShape(#[error(not(source))] &'static str),
    /// An entity could not be written to the snapshot format.
    #[display("failed to encode {_0}")]
    Encode(#[error(not(source))] &'static str),
    /// A value could not be parsed.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The value that was found.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Snapshots are either well-formed or they aren't.
        false
    }

    /// Returns `true` if the error means "this snapshot is unusable"; callers
    /// rebuild from scratch instead of aborting the run.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Json | Self::MissingField { .. } | Self::InvalidField { .. } | Self::UnexpectedShape(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::MissingField { entity: "WorksheetInfo", field: "progress" }.to_string(),
            "WorksheetInfo record is missing required field 'progress'"
        );
        assert_eq!(ErrorKind::UnexpectedShape("LanguageInfo").to_string(), "expected a LanguageInfo record at the top level");
    }

    #[test]
    fn error_kind_structural() {
        assert!(ErrorKind::Json.is_structural());
        assert!(ErrorKind::InvalidField { entity: "FileInfo", field: "url" }.is_structural());
        assert!(!ErrorKind::ParseError { field: "file_type", value: "docx".to_string() }.is_structural());
        assert!(!ErrorKind::Json.is_retryable());
    }
}
