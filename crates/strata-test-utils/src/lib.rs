//! Test fixtures and helpers for Strata development.
//!
//! Provides raw `COORD`/`ZCORN` builders for regular and sheared grids,
//! assembled [`CornerPointGrid`]s, and sample series and report catalogs
//! in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::Once;

use strata_core::Ijk;
use strata_grid::{CornerPointGrid, GridDims, GridOptions};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-writer `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Vertical pillars on a regular `dx` by `dy` lattice, from depth 0 to 1.
pub fn vertical_coord(nx: usize, ny: usize, dx: f64, dy: f64) -> Vec<f64> {
    sheared_coord(nx, ny, dx, dy, 0.0)
}

/// Pillars whose bottom end is shifted by `shear` in x per unit depth.
pub fn sheared_coord(nx: usize, ny: usize, dx: f64, dy: f64, shear: f64) -> Vec<f64> {
    let mut coord = Vec::with_capacity(6 * (nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            let (x, y) = (i as f64 * dx, j as f64 * dy);
            coord.extend_from_slice(&[x, y, 0.0, x + shear, y, 1.0]);
        }
    }
    coord
}

/// Flat layers of thickness `dz` starting at depth `top`.
pub fn layered_zcorn(dims: GridDims, top: f64, dz: f64) -> Vec<f64> {
    let mut zcorn = vec![0.0; dims.zcorn_len()];
    for k in 0..dims.nz() {
        for j in 0..dims.ny() {
            for i in 0..dims.nx() {
                for c in 0..8 {
                    let z = top + (k + c / 4) as f64 * dz;
                    zcorn[dims.zcorn_index(Ijk::new(i, j, k), c)] = z;
                }
            }
        }
    }
    zcorn
}

/// An all-active box grid of `dx * dy * dz` cells.
pub fn box_grid(nx: usize, ny: usize, nz: usize, [dx, dy, dz]: [f64; 3]) -> CornerPointGrid {
    let dims = GridDims::new(nx, ny, nz).unwrap();
    CornerPointGrid::builder(dims)
        .coord(vertical_coord(nx, ny, dx, dy))
        .zcorn(layered_zcorn(dims, 0.0, dz))
        .build()
        .unwrap()
}

/// A box grid with an activity mask.
pub fn masked_box_grid(nx: usize, ny: usize, nz: usize, mask: Vec<bool>) -> CornerPointGrid {
    let dims = GridDims::new(nx, ny, nz).unwrap();
    CornerPointGrid::builder(dims)
        .coord(vertical_coord(nx, ny, 1.0, 1.0))
        .zcorn(layered_zcorn(dims, 0.0, 1.0))
        .mask(mask)
        .build()
        .unwrap()
}

/// A box grid whose pillars lean by `shear` in x.
pub fn sheared_grid(
    nx: usize,
    ny: usize,
    nz: usize,
    [dx, dy, dz]: [f64; 3],
    shear: f64,
) -> CornerPointGrid {
    let dims = GridDims::new(nx, ny, nz).unwrap();
    CornerPointGrid::builder(dims)
        .coord(sheared_coord(nx, ny, dx, dy, shear))
        .zcorn(layered_zcorn(dims, 0.0, dz))
        .options(GridOptions {
            repair_depths: false,
            ..GridOptions::new()
        })
        .build()
        .unwrap()
}
