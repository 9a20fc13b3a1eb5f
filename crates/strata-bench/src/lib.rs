//! Benchmark profiles for the Strata reservoir toolkit.
//!
//! - [`faulted_grid`]: a layered grid with a vertical throw halfway along x
//!   and every seventh cell inactive
//! - [`reference_grid`]: 100x100x20 (200K cells)
//! - [`filled_series`]: a sealed series with field and per-well variables

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_core::Ijk;
use strata_grid::{CornerPointGrid, GridDims, GridError};
use strata_series::{ResultSeries, SeriesConfig, SeriesError, VariableDescriptor};

/// Build an `nx * ny * nz` grid of 50 x 50 x 2 cells whose right half is
/// thrown down by `throw`.
pub fn faulted_grid(nx: usize, ny: usize, nz: usize, throw: f64) -> Result<CornerPointGrid, GridError> {
    let dims = GridDims::new(nx, ny, nz)?;
    let mut coord = Vec::with_capacity(dims.coord_len());
    for j in 0..=ny {
        for i in 0..=nx {
            let (x, y) = (i as f64 * 50.0, j as f64 * 50.0);
            coord.extend_from_slice(&[x, y, 1000.0, x, y, 1100.0]);
        }
    }
    let mut zcorn = vec![0.0; dims.zcorn_len()];
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let shift = if i >= nx / 2 { throw } else { 0.0 };
                for c in 0..8 {
                    let z = 1000.0 + shift + (k + c / 4) as f64 * 2.0;
                    zcorn[dims.zcorn_index(Ijk::new(i, j, k), c)] = z;
                }
            }
        }
    }
    let mask = (0..dims.cartesian_size()).map(|g| g % 7 != 0).collect();
    CornerPointGrid::builder(dims)
        .coord(coord)
        .zcorn(zcorn)
        .mask(mask)
        .build()
}

/// The 100x100x20 reference grid.
pub fn reference_grid() -> Result<CornerPointGrid, GridError> {
    faulted_grid(100, 100, 20, 15.0)
}

/// A sealed series with `TIME`, three field totals and four variables for
/// each of `wells` wells, over `ministeps` ministeps.
pub fn filled_series(wells: usize, ministeps: usize) -> Result<ResultSeries, SeriesError> {
    let mut s = ResultSeries::new(SeriesConfig::default())?;
    s.register(VariableDescriptor::new("TIME").unit("DAYS"))?;
    for kw in ["FOPT", "FWPT", "FGPT"] {
        s.register(VariableDescriptor::new(kw))?;
    }
    for w in 0..wells {
        for kw in ["WOPR", "WWPR", "WGPR", "WBHP"] {
            s.register(VariableDescriptor::new(kw).owner(format!("W{w}")))?;
        }
    }
    let nvars = s.nvars();
    for m in 0..ministeps {
        s.append_ministep((m + 1) as f64)?;
        for slot in 1..nvars {
            s.set(slot.into(), (m * slot) as f32)?;
        }
    }
    Ok(s)
}
