//! Strongly-typed identifiers: cell coordinates and series slots.

use std::fmt;

/// A 0-based `(i, j, k)` cell coordinate.
///
/// Internally every index is 0-based. Coordinates read from or written to
/// external artifacts (decks, report files, general keys) are 1-based and
/// go through [`Ijk::from_one_based`] and [`Ijk::to_one_based`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ijk {
    /// Index along x.
    pub i: usize,
    /// Index along y.
    pub j: usize,
    /// Index along z (layer).
    pub k: usize,
}

impl Ijk {
    /// Create a 0-based coordinate.
    pub const fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }

    /// Convert a 1-based external triple. Returns `None` if any component
    /// is below 1.
    pub fn from_one_based(i: i64, j: i64, k: i64) -> Option<Self> {
        if i < 1 || j < 1 || k < 1 {
            return None;
        }
        Some(Self {
            i: (i - 1) as usize,
            j: (j - 1) as usize,
            k: (k - 1) as usize,
        })
    }

    /// The 1-based external triple for this coordinate.
    pub fn to_one_based(self) -> (i64, i64, i64) {
        (self.i as i64 + 1, self.j as i64 + 1, self.k as i64 + 1)
    }
}

impl fmt::Display for Ijk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (i, j, k) = self.to_one_based();
        write!(f, "{i},{j},{k}")
    }
}

impl From<(usize, usize, usize)> for Ijk {
    fn from((i, j, k): (usize, usize, usize)) -> Self {
        Self { i, j, k }
    }
}

/// Identifies a variable slot within a result series.
///
/// Returned by registration and stable for the lifetime of the series.
/// `SlotHandle(n)` is the n-th registered variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle(pub usize);

impl fmt::Display for SlotHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for SlotHandle {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
