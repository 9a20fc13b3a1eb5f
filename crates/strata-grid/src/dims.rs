//! Grid dimensions and cartesian index arithmetic.

use strata_core::{DimensionError, Ijk};

use crate::error::GridError;

/// Logical size of a grid: `nx * ny * nz` cells.
///
/// Global indices are 0-based and ordered with `i` fastest:
/// `global = i + j*nx + k*nx*ny`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDims {
    nx: usize,
    ny: usize,
    nz: usize,
    cartesian_size: usize,
}

impl GridDims {
    /// Create dimensions, failing if the cell count or the pillar count
    /// does not fit in `usize`.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, GridError> {
        let limit = usize::MAX / 8;
        let cells = nx.saturating_mul(ny).saturating_mul(nz);
        let pillars = nx
            .saturating_add(1)
            .saturating_mul(ny.saturating_add(1));
        if cells > limit || pillars > limit {
            return Err(DimensionError {
                what: format!("{nx}x{ny}x{nz} cell count"),
                expected: limit,
                found: cells.max(pillars),
            }
            .into());
        }
        let cartesian_size = cells;
        Ok(Self {
            nx,
            ny,
            nz,
            cartesian_size,
        })
    }

    /// Cells along x.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Cells along y.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Layers.
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// `nx * ny * nz`.
    pub fn cartesian_size(&self) -> usize {
        self.cartesian_size
    }

    /// Number of pillars: `(nx+1) * (ny+1)`.
    pub fn pillar_count(&self) -> usize {
        (self.nx + 1) * (self.ny + 1)
    }

    /// Required `COORD` length: six values per pillar.
    pub fn coord_len(&self) -> usize {
        6 * self.pillar_count()
    }

    /// Required `ZCORN` length: eight depth samples per cell.
    pub fn zcorn_len(&self) -> usize {
        8 * self.cartesian_size
    }

    /// Index into `ZCORN` of corner `corner` (0..8) of cell `ijk`.
    ///
    /// Corners 0..4 form the top face and 4..8 the bottom face; within a
    /// face the order is `(i,j)`, `(i+1,j)`, `(i,j+1)`, `(i+1,j+1)`.
    /// No bounds check.
    pub fn zcorn_index(&self, ijk: Ijk, corner: usize) -> usize {
        let (nx, ny) = (self.nx, self.ny);
        let mut idx = ijk.k * 8 * nx * ny + ijk.j * 4 * nx + 2 * ijk.i;
        if corner % 2 == 1 {
            idx += 1;
        }
        if corner % 4 >= 2 {
            idx += 2 * nx;
        }
        if corner >= 4 {
            idx += 4 * nx * ny;
        }
        idx
    }

    /// Whether a 0-based coordinate lies inside the grid.
    pub fn contains(&self, ijk: Ijk) -> bool {
        ijk.i < self.nx && ijk.j < self.ny && ijk.k < self.nz
    }

    /// Global index of a 0-based coordinate.
    pub fn global_index(&self, ijk: Ijk) -> Result<usize, GridError> {
        if !self.contains(ijk) {
            let (what, index, len) = if ijk.i >= self.nx {
                ("i", ijk.i, self.nx)
            } else if ijk.j >= self.ny {
                ("j", ijk.j, self.ny)
            } else {
                ("k", ijk.k, self.nz)
            };
            return Err(GridError::OutOfBounds { what, index, len });
        }
        Ok(ijk.i + ijk.j * self.nx + ijk.k * self.nx * self.ny)
    }

    /// Global index of an external 1-based `(i, j, k)`.
    pub fn global_from_one_based(&self, i: i64, j: i64, k: i64) -> Result<usize, GridError> {
        let ijk = Ijk::from_one_based(i, j, k).ok_or(GridError::OutOfBounds {
            what: "1-based coordinate",
            index: 0,
            len: self.cartesian_size,
        })?;
        self.global_index(ijk)
    }

    /// 0-based coordinate of a global index.
    pub fn ijk(&self, global: usize) -> Result<Ijk, GridError> {
        self.check_global(global)?;
        let layer = self.nx * self.ny;
        Ok(Ijk::new(
            global % self.nx,
            (global % layer) / self.nx,
            global / layer,
        ))
    }

    /// Fail unless `global < cartesian_size`.
    pub fn check_global(&self, global: usize) -> Result<(), GridError> {
        if global >= self.cartesian_size {
            return Err(GridError::OutOfBounds {
                what: "global index",
                index: global,
                len: self.cartesian_size,
            });
        }
        Ok(())
    }

    /// Check that an array has the length a size invariant requires.
    pub(crate) fn require_len(
        what: &str,
        expected: usize,
        found: usize,
    ) -> Result<(), GridError> {
        if expected != found {
            return Err(DimensionError {
                what: what.to_string(),
                expected,
                found,
            }
            .into());
        }
        Ok(())
    }
}
