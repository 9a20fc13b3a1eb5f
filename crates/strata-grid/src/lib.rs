//! Corner-point grid geometry and active-cell indexing.
//!
//! A corner-point grid is defined by `(nx+1)*(ny+1)` pillars and eight
//! depth samples per cell. Cell corners are where the pillars cross the
//! depth samples, so adjacent cells may be offset along a shared pillar
//! (faults) and cells may pinch out entirely.
//!
//! # Components
//!
//! - [`GridDims`]: cartesian index arithmetic
//! - [`PillarStore`]: raw `COORD` and `ZCORN` arrays
//! - [`geometry`]: corners, centers, volumes and validity of single cells
//! - [`repair`]: clamping of inverted depth samples
//! - [`ActiveMap`]: global-to-active index compression
//! - [`CornerPointGrid`]: the assembled, immutable grid with memoized
//!   aggregates, loadable from and storable to EGRID keyword files

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod active;
pub mod config;
pub mod dims;
pub mod egrid;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod repair;
pub mod store;

#[cfg(test)]
pub(crate) mod compliance;

pub use active::{ActiveMap, INACTIVE};
pub use config::{ConfigError, GridOptions};
pub use dims::GridDims;
pub use error::GridError;
pub use geometry::{CellGeometry, Point3};
pub use grid::{CornerPointGrid, GeometryReport, GridBuilder};
pub use repair::{count_depth_inversions, repair_depths};
pub use store::{Pillar, PillarStore};
