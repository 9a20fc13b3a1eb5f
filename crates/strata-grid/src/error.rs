//! Error types for grid construction and spatial queries.

use std::fmt;

use strata_core::{DimensionError, SizeMismatch};
use strata_kw::KeywordError;

use crate::config::ConfigError;

/// Errors arising from grid construction or spatial queries.
#[derive(Debug)]
pub enum GridError {
    /// An input array violates a size invariant. Construction aborts.
    Dimension(DimensionError),
    /// An array passed to compression or expansion has the wrong length.
    SizeMismatch(SizeMismatch),
    /// An index or coordinate is outside the grid.
    OutOfBounds {
        /// What was being indexed.
        what: &'static str,
        /// The offending index.
        index: usize,
        /// The exclusive upper bound.
        len: usize,
    },
    /// A grid keyword file could not be read or written.
    Keyword(KeywordError),
    /// Grid options failed validation.
    Config(ConfigError),
    /// A required keyword is absent from a grid file.
    MissingKeyword {
        /// The missing keyword name.
        name: &'static str,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension(e) => write!(f, "dimension error: {e}"),
            Self::SizeMismatch(e) => write!(f, "{e}"),
            Self::OutOfBounds { what, index, len } => {
                write!(f, "{what} {index} out of bounds [0, {len})")
            }
            Self::Keyword(e) => write!(f, "grid file: {e}"),
            Self::Config(e) => write!(f, "invalid grid options: {e}"),
            Self::MissingKeyword { name } => write!(f, "grid file has no {name} keyword"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dimension(e) => Some(e),
            Self::SizeMismatch(e) => Some(e),
            Self::Keyword(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DimensionError> for GridError {
    fn from(e: DimensionError) -> Self {
        Self::Dimension(e)
    }
}

impl From<SizeMismatch> for GridError {
    fn from(e: SizeMismatch) -> Self {
        Self::SizeMismatch(e)
    }
}

impl From<KeywordError> for GridError {
    fn from(e: KeywordError) -> Self {
        Self::Keyword(e)
    }
}

impl From<ConfigError> for GridError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
