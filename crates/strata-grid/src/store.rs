//! Raw pillar (`COORD`) and corner-depth (`ZCORN`) storage.
//!
//! Pure data with bounds-checked accessors; all geometry lives in
//! [`crate::geometry`].

use strata_core::Ijk;

use crate::dims::GridDims;
use crate::error::GridError;
use crate::geometry::Point3;

/// A pillar: the line through its top and bottom endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pillar {
    /// Top endpoint.
    pub top: Point3,
    /// Bottom endpoint.
    pub bottom: Point3,
}

impl Pillar {
    /// The point on this pillar at depth `z`.
    ///
    /// Interpolates linearly between the endpoints by depth fraction. A
    /// pillar with no vertical extent yields its top endpoint's `x`/`y`.
    pub fn at_depth(&self, z: f64) -> Point3 {
        let ez = self.bottom.z - self.top.z;
        if ez == 0.0 {
            return Point3::new(self.top.x, self.top.y, z);
        }
        let t = (z - self.top.z) / ez;
        Point3::new(
            self.top.x + t * (self.bottom.x - self.top.x),
            self.top.y + t * (self.bottom.y - self.top.y),
            z,
        )
    }
}

/// Pillar coordinates and per-cell corner depths for one grid.
#[derive(Clone, Debug, PartialEq)]
pub struct PillarStore {
    dims: GridDims,
    coord: Vec<f64>,
    zcorn: Vec<f64>,
}

impl PillarStore {
    /// Take ownership of the raw arrays after checking their lengths.
    ///
    /// `coord` needs `6 * (nx+1) * (ny+1)` values, `(xt, yt, zt, xb, yb, zb)`
    /// per pillar with `i` fastest; `zcorn` needs `8 * nx * ny * nz`.
    pub fn new(dims: GridDims, coord: Vec<f64>, zcorn: Vec<f64>) -> Result<Self, GridError> {
        GridDims::require_len("COORD", dims.coord_len(), coord.len())?;
        GridDims::require_len("ZCORN", dims.zcorn_len(), zcorn.len())?;
        Ok(Self { dims, coord, zcorn })
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Raw `COORD` values.
    pub fn coord(&self) -> &[f64] {
        &self.coord
    }

    /// Raw `ZCORN` values.
    pub fn zcorn(&self) -> &[f64] {
        &self.zcorn
    }

    pub(crate) fn zcorn_mut(&mut self) -> &mut [f64] {
        &mut self.zcorn
    }

    /// Pillar `(i, j)`, with `i <= nx` and `j <= ny`.
    pub fn pillar(&self, i: usize, j: usize) -> Result<Pillar, GridError> {
        let nx = self.dims.nx();
        if i > nx {
            return Err(GridError::OutOfBounds {
                what: "pillar i",
                index: i,
                len: nx + 1,
            });
        }
        if j > self.dims.ny() {
            return Err(GridError::OutOfBounds {
                what: "pillar j",
                index: j,
                len: self.dims.ny() + 1,
            });
        }
        Ok(self.pillar_unchecked(i, j))
    }

    fn pillar_unchecked(&self, i: usize, j: usize) -> Pillar {
        let base = 6 * (i + j * (self.dims.nx() + 1));
        let c = &self.coord[base..base + 6];
        Pillar {
            top: Point3::new(c[0], c[1], c[2]),
            bottom: Point3::new(c[3], c[4], c[5]),
        }
    }

    /// Index into `ZCORN` of corner `corner` (0..8) of cell `ijk`.
    ///
    /// See [`GridDims::zcorn_index`]. Callers must check bounds.
    pub fn zcorn_index(&self, ijk: Ijk, corner: usize) -> usize {
        self.dims.zcorn_index(ijk, corner)
    }

    /// Depth sample of corner `corner` (0..8) of cell `global`.
    pub fn depth(&self, global: usize, corner: usize) -> Result<f64, GridError> {
        if corner >= 8 {
            return Err(GridError::OutOfBounds {
                what: "corner",
                index: corner,
                len: 8,
            });
        }
        let ijk = self.dims.ijk(global)?;
        Ok(self.zcorn[self.zcorn_index(ijk, corner)])
    }

    /// The eight depth samples of a cell, in corner order.
    pub fn cell_depths(&self, ijk: Ijk) -> [f64; 8] {
        std::array::from_fn(|c| self.zcorn[self.zcorn_index(ijk, c)])
    }

    /// The pillar carrying corner `corner` of cell `ijk`.
    pub(crate) fn corner_pillar(&self, ijk: Ijk, corner: usize) -> Pillar {
        self.pillar_unchecked(ijk.i + corner % 2, ijk.j + (corner % 4) / 2)
    }

    /// Consume the store, returning `(COORD, ZCORN)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.coord, self.zcorn)
    }
}
