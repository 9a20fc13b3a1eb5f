//! Strata: corner-point grids and keyword-record results for reservoir
//! simulation output.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Strata sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // One 10 x 10 x 2 cell on vertical pillars.
//! let dims = GridDims::new(1, 1, 1).unwrap();
//! let coord = vec![
//!     0.0, 0.0, 0.0, 0.0, 0.0, 1.0, //
//!     10.0, 0.0, 0.0, 10.0, 0.0, 1.0, //
//!     0.0, 10.0, 0.0, 0.0, 10.0, 1.0, //
//!     10.0, 10.0, 0.0, 10.0, 10.0, 1.0,
//! ];
//! let zcorn = vec![100.0, 100.0, 100.0, 100.0, 102.0, 102.0, 102.0, 102.0];
//! let grid = CornerPointGrid::builder(dims)
//!     .coord(coord)
//!     .zcorn(zcorn)
//!     .build()
//!     .unwrap();
//! assert!((grid.cell_volume(0).unwrap() - 200.0).abs() < 1e-9);
//!
//! // A summary series with one well variable.
//! let mut series = ResultSeries::new(SeriesConfig::default()).unwrap();
//! series.register(VariableDescriptor::new("TIME")).unwrap();
//! series.register(VariableDescriptor::new("WBHP").owner("OP-1")).unwrap();
//! series.append_ministep(1.0).unwrap();
//! series.set_by_key("WBHP:OP-1", 180.0).unwrap();
//! assert_eq!(series.value_at_report("WBHP:OP-1", 0).unwrap(), Some(180.0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | Cell coordinates, dates, shared error kinds |
//! | [`kw`] | `strata-kw` | Keyword-record files, binary and formatted |
//! | [`grid`] | `strata-grid` | Corner-point geometry and active cells |
//! | [`series`] | `strata-series` | Summary series and their files |
//! | [`rft`] | `strata-rft` | Per-well report catalogs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifiers, dates and shared error kinds (`strata-core`).
pub use strata_core as types;

/// Keyword-record container format (`strata-kw`).
///
/// [`kw::KeywordFile`] for whole files, [`kw::KeywordReader`] and
/// [`kw::KeywordWriter`] for streams, [`kw::KeywordIndex`] for lazy loads.
pub use strata_kw as kw;

/// Corner-point grids (`strata-grid`).
///
/// Build a [`grid::CornerPointGrid`] with [`grid::GridBuilder`] or load
/// one from an EGRID file.
pub use strata_grid as grid;

/// Summary result series (`strata-series`).
pub use strata_series as series;

/// Well report catalogs (`strata-rft`).
pub use strata_rft as rft;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use strata_core::{Ijk, ReportDate, SlotHandle};

    // Keyword files
    pub use strata_kw::{KeywordData, KeywordEntry, KeywordFile, Layout};

    // Grid
    pub use strata_grid::{CornerPointGrid, GridDims, GridError, GridOptions};

    // Series
    pub use strata_series::{
        ReportStepRule, ResultSeries, SeriesConfig, SeriesError, SeriesReader,
        VariableDescriptor, WriteOptions,
    };

    // Well reports
    pub use strata_rft::{ReportCatalog, RftError, WellReport};
}
