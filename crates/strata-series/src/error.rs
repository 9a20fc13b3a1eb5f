//! Error types for result series construction, queries and persistence.

use std::fmt;

use strata_core::{NotFound, ProtocolError};
use strata_kw::KeywordError;

use crate::config::ConfigError;

/// Errors from building, querying, loading or saving a result series.
#[derive(Debug)]
pub enum SeriesError {
    /// An operation was invoked in the wrong series state.
    Protocol(ProtocolError),
    /// A slot, general key or file does not exist.
    NotFound(NotFound),
    /// A keyword file could not be read or written.
    Keyword(KeywordError),
    /// Time points are not strictly increasing.
    TimeOrder {
        /// Position of the first out-of-order point.
        index: usize,
    },
    /// A summary header is missing a record or has inconsistent records.
    Header {
        /// Human-readable description of the problem.
        detail: String,
    },
    /// Series configuration failed validation.
    Config(ConfigError),
}

impl SeriesError {
    pub(crate) fn header(detail: impl Into<String>) -> Self {
        Self::Header {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protocol(e) => write!(f, "protocol error: {e}"),
            Self::NotFound(e) => write!(f, "{e}"),
            Self::Keyword(e) => write!(f, "summary file: {e}"),
            Self::TimeOrder { index } => {
                write!(f, "time point {index} does not follow its predecessor")
            }
            Self::Header { detail } => write!(f, "summary header: {detail}"),
            Self::Config(e) => write!(f, "invalid series config: {e}"),
        }
    }
}

impl std::error::Error for SeriesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Protocol(e) => Some(e),
            Self::NotFound(e) => Some(e),
            Self::Keyword(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProtocolError> for SeriesError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

impl From<NotFound> for SeriesError {
    fn from(e: NotFound) -> Self {
        Self::NotFound(e)
    }
}

impl From<KeywordError> for SeriesError {
    fn from(e: KeywordError) -> Self {
        Self::Keyword(e)
    }
}

impl From<ConfigError> for SeriesError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
