//! Error types for well-report catalogs.

use std::fmt;

use strata_core::{NotFound, SizeMismatch};
use strata_grid::GridError;
use strata_kw::KeywordError;

use crate::types::ReportKind;

/// Errors from reading, writing or querying a report catalog.
#[derive(Debug)]
pub enum RftError {
    /// The underlying keyword file could not be read or written.
    Keyword(KeywordError),
    /// Per-connection arrays of one report differ in length.
    SizeMismatch(SizeMismatch),
    /// A report block lacks a required array.
    MissingArray {
        /// Keyword name of the missing array.
        name: &'static str,
    },
    /// No report exists for the requested well and date.
    NotFound(NotFound),
    /// A connection carries values of a different kind than its report.
    ValueKind {
        /// Well of the report.
        well: String,
        /// Report kind.
        kind: ReportKind,
        /// Position of the offending connection.
        connection: usize,
    },
    /// A connection could not be resolved against a grid.
    Grid(GridError),
}

impl fmt::Display for RftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(e) => write!(f, "report file: {e}"),
            Self::SizeMismatch(e) => write!(f, "{e}"),
            Self::MissingArray { name } => write!(f, "report block has no {name} array"),
            Self::NotFound(e) => write!(f, "{e}"),
            Self::ValueKind {
                well,
                kind,
                connection,
            } => write!(
                f,
                "connection {connection} of well {well} does not hold {kind} values"
            ),
            Self::Grid(e) => write!(f, "connection lookup: {e}"),
        }
    }
}

impl std::error::Error for RftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Keyword(e) => Some(e),
            Self::SizeMismatch(e) => Some(e),
            Self::NotFound(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::MissingArray { .. } | Self::ValueKind { .. } => None,
        }
    }
}

impl From<KeywordError> for RftError {
    fn from(e: KeywordError) -> Self {
        Self::Keyword(e)
    }
}

impl From<SizeMismatch> for RftError {
    fn from(e: SizeMismatch) -> Self {
        Self::SizeMismatch(e)
    }
}

impl From<NotFound> for RftError {
    fn from(e: NotFound) -> Self {
        Self::NotFound(e)
    }
}

impl From<GridError> for RftError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
