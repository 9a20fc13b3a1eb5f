//! Error types for the keyword-record format.

use std::fmt;
use std::io;

use crate::types::TypeTag;

/// Errors that can occur while reading, writing or querying keyword files.
#[derive(Debug)]
pub enum KeywordError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// A record's payload does not match its declared size, or the stream
    /// ended inside a record. The stream position is unrecoverable.
    TruncatedRecord {
        /// Name of the keyword being read, if the header was decoded.
        name: String,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A record header could not be decoded.
    MalformedHeader {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// The four-character element type is not recognized.
    UnknownType {
        /// The unrecognized type tag.
        tag: String,
    },
    /// The requested occurrence of a keyword does not exist.
    NotFound {
        /// Keyword name.
        name: String,
        /// Zero-based occurrence that was requested.
        occurrence: usize,
    },
    /// The payload has a different element type than the caller asked for.
    TypeMismatch {
        /// Keyword name.
        name: String,
        /// The type the caller asked for.
        expected: TypeTag,
        /// The type actually stored.
        found: TypeTag,
    },
    /// A token in a formatted file could not be parsed.
    InvalidToken {
        /// Human-readable description of the bad token.
        detail: String,
    },
    /// A value cannot be represented in the on-disk format.
    InvalidValue {
        /// Keyword name.
        name: String,
        /// Human-readable description of the problem.
        detail: String,
    },
    /// The operation is not available for this layout.
    UnsupportedLayout {
        /// Human-readable description of the restriction.
        detail: String,
    },
}

impl KeywordError {
    pub(crate) fn truncated(name: &str, detail: impl Into<String>) -> Self {
        Self::TruncatedRecord {
            name: name.to_string(),
            detail: detail.into(),
        }
    }

    /// Convert an unexpected end of stream into [`KeywordError::TruncatedRecord`].
    pub(crate) fn from_read(e: io::Error, name: &str) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Self::truncated(name, "stream ended inside a record")
        } else {
            Self::Io(e)
        }
    }
}

impl fmt::Display for KeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::TruncatedRecord { name, detail } => {
                write!(f, "truncated record '{name}': {detail}")
            }
            Self::MalformedHeader { detail } => write!(f, "malformed record header: {detail}"),
            Self::UnknownType { tag } => write!(f, "unknown element type '{tag}'"),
            Self::NotFound { name, occurrence } => {
                write!(f, "keyword '{name}' occurrence {occurrence} not found")
            }
            Self::TypeMismatch {
                name,
                expected,
                found,
            } => {
                write!(f, "keyword '{name}' holds {found}, expected {expected}")
            }
            Self::InvalidToken { detail } => write!(f, "invalid token: {detail}"),
            Self::InvalidValue { name, detail } => {
                write!(f, "invalid value in '{name}': {detail}")
            }
            Self::UnsupportedLayout { detail } => write!(f, "unsupported layout: {detail}"),
        }
    }
}

impl std::error::Error for KeywordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for KeywordError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
