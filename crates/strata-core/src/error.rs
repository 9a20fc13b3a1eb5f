//! Error kinds shared across the Strata workspace.
//!
//! Each subsystem crate wraps these in its own error enum; the shared
//! kinds keep the same meaning everywhere:
//!
//! - [`DimensionError`]: an input array violates a size invariant at
//!   construction. Construction aborts.
//! - [`SizeMismatch`]: two arrays expected to be parallel differ in length.
//!   Fatal for the operation, not for the owning object.
//! - [`NotFound`]: a requested name, occurrence, well or date is absent.
//!   Recoverable.
//! - [`ProtocolError`]: a writer was driven out of order. Programmer error.
//! - [`GeometryWarning`]: a degenerate cell. Advisory only.

use std::error::Error;
use std::fmt;

/// An input array length violates a construction-time size invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimensionError {
    /// Which array or dimension is wrong.
    pub what: String,
    /// The length required by the grid dimensions.
    pub expected: usize,
    /// The length actually supplied.
    pub found: usize,
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} has length {}, expected {}",
            self.what, self.found, self.expected
        )
    }
}

impl Error for DimensionError {}

/// Two arrays that must be parallel have different lengths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeMismatch {
    /// Description of the arrays being compared.
    pub what: String,
    /// The reference length.
    pub expected: usize,
    /// The offending length.
    pub found: usize,
}

impl fmt::Display for SizeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size mismatch in {}: expected {}, found {}",
            self.what, self.expected, self.found
        )
    }
}

impl Error for SizeMismatch {}

/// A looked-up item does not exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotFound {
    /// Human-readable description of what was requested.
    pub what: String,
}

impl NotFound {
    /// Build a `NotFound` from anything displayable.
    pub fn new(what: impl Into<String>) -> Self {
        Self { what: what.into() }
    }
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not found: {}", self.what)
    }
}

impl Error for NotFound {}

/// A result-series writer was used out of protocol order.
#[derive(Clone, Debug, PartialEq)]
pub enum ProtocolError {
    /// A variable was registered after the first ministep sealed the header.
    RegisterAfterSeal {
        /// General key of the rejected variable.
        key: String,
    },
    /// Data was appended before any variable was registered.
    NoVariables,
    /// A value was set before any ministep was appended.
    NoMinistep,
    /// A ministep's elapsed time did not advance past the previous one.
    NonIncreasingTime {
        /// Elapsed time of the previous ministep.
        previous: f64,
        /// Elapsed time that was rejected.
        found: f64,
    },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegisterAfterSeal { key } => {
                write!(f, "cannot register '{key}': series is sealed")
            }
            Self::NoVariables => write!(f, "cannot append data: no variables registered"),
            Self::NoMinistep => write!(f, "cannot set a value: no ministep appended"),
            Self::NonIncreasingTime { previous, found } => {
                write!(
                    f,
                    "elapsed time {found} does not advance past previous {previous}"
                )
            }
        }
    }
}

impl Error for ProtocolError {}

/// What kind of degeneracy a [`GeometryWarning`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryIssue {
    /// A corner coordinate is non-finite or beyond the undefined threshold.
    NonFinite,
    /// All corner separations along the cell's pillars are zero or negative.
    Collapsed,
    /// An inactive cell whose eight depth samples are identical.
    Tainted,
}

impl fmt::Display for GeometryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "non-finite corner"),
            Self::Collapsed => write!(f, "collapsed thickness"),
            Self::Tainted => write!(f, "tainted inactive cell"),
        }
    }
}

/// A degenerate cell detected during geometry evaluation.
///
/// Non-fatal: the cell's geometry is still returned, with zero volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryWarning {
    /// Global index of the cell.
    pub cell: usize,
    /// The detected issue.
    pub issue: GeometryIssue,
}

impl fmt::Display for GeometryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {}: {}", self.cell, self.issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = DimensionError {
            what: "ZCORN".into(),
            expected: 32,
            found: 31,
        };
        assert_eq!(e.to_string(), "ZCORN has length 31, expected 32");

        let p = ProtocolError::RegisterAfterSeal {
            key: "WWCT:OP-1".into(),
        };
        assert!(p.to_string().contains("WWCT:OP-1"));

        let w = GeometryWarning {
            cell: 7,
            issue: GeometryIssue::Collapsed,
        };
        assert_eq!(w.to_string(), "cell 7: collapsed thickness");
    }
}
