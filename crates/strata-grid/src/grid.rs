//! The assembled corner-point grid.
//!
//! [`CornerPointGrid`] owns its pillar store and active map and is
//! immutable after [`GridBuilder::build`]. Grid-wide aggregates are
//! memoized on first access, so a grid can be shared across threads
//! behind an `Arc` without locking.

use std::sync::OnceLock;

use strata_core::{GeometryIssue, GeometryWarning, Ijk};
use tracing::{debug, warn};

use crate::active::ActiveMap;
use crate::config::GridOptions;
use crate::dims::GridDims;
use crate::error::GridError;
use crate::geometry::{CellGeometry, Point3};
use crate::repair::repair_depths;
use crate::store::PillarStore;

// ── GeometryReport ─────────────────────────────────────────────────

/// Degenerate cells found across a whole grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryReport {
    /// One warning per degenerate cell, in global order.
    pub warnings: Vec<GeometryWarning>,
    /// Cells whose geometry is unusable (volume forced to zero).
    pub invalid_count: usize,
    /// Inactive cells with eight identical depth samples.
    pub tainted_count: usize,
    /// Depth samples changed by repair during construction.
    pub repaired_samples: usize,
}

impl GeometryReport {
    /// Number of degenerate cells.
    pub fn degenerate_count(&self) -> usize {
        self.warnings.len()
    }

    /// Global indices of the degenerate cells.
    pub fn cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.warnings.iter().map(|w| w.cell)
    }

    /// Whether no cell is degenerate and no sample was repaired.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.repaired_samples == 0
    }
}

// ── Builder ────────────────────────────────────────────────────────

/// Builder for [`CornerPointGrid`].
#[derive(Clone, Debug)]
pub struct GridBuilder {
    dims: GridDims,
    coord: Vec<f64>,
    zcorn: Vec<f64>,
    mask: Option<Vec<bool>>,
    options: GridOptions,
}

impl GridBuilder {
    /// Pillar coordinates, six values per pillar.
    pub fn coord(mut self, coord: Vec<f64>) -> Self {
        self.coord = coord;
        self
    }

    /// Corner depths, eight per cell in `ZCORN` order.
    pub fn zcorn(mut self, zcorn: Vec<f64>) -> Self {
        self.zcorn = zcorn;
        self
    }

    /// Per-cell activity mask. Without one, every cell is active.
    pub fn mask(mut self, mask: Vec<bool>) -> Self {
        self.mask = Some(mask);
        self
    }

    /// `ACTNUM`-style activity: any non-zero value is active.
    pub fn actnum(mut self, actnum: &[i32]) -> Self {
        self.mask = Some(actnum.iter().map(|&a| a != 0).collect());
        self
    }

    /// Cells active regardless of the mask.
    pub fn forced_active(mut self, cells: Vec<usize>) -> Self {
        self.options.forced_active = cells;
        self
    }

    /// Replace all options.
    pub fn options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the inputs and assemble the grid.
    ///
    /// Size violations abort with [`GridError::Dimension`]. Depth repair,
    /// when enabled, is applied before any geometry is evaluated.
    pub fn build(self) -> Result<CornerPointGrid, GridError> {
        self.options.validate()?;
        let mut store = PillarStore::new(self.dims, self.coord, self.zcorn)?;

        let active = match &self.mask {
            Some(mask) => {
                GridDims::require_len("activity mask", self.dims.cartesian_size(), mask.len())?;
                ActiveMap::build(mask, &self.options.forced_active)?
            }
            None => {
                let mask = vec![true; self.dims.cartesian_size()];
                ActiveMap::build(&mask, &self.options.forced_active)?
            }
        };

        let repaired = if self.options.repair_depths {
            repair_depths(&mut store)
        } else {
            0
        };
        if repaired > 0 {
            warn!(repaired, "clamped inverted depth samples");
        }
        debug!(
            nx = self.dims.nx(),
            ny = self.dims.ny(),
            nz = self.dims.nz(),
            nactive = active.nactive(),
            "built corner-point grid"
        );

        Ok(CornerPointGrid {
            store,
            active,
            options: self.options,
            repaired,
            geometry: OnceLock::new(),
            active_volume: OnceLock::new(),
            report: OnceLock::new(),
        })
    }
}

// ── CornerPointGrid ────────────────────────────────────────────────

/// A corner-point grid: pillars, corner depths and active cells.
///
/// Cells are addressed by 0-based global index. Geometry of every cell is
/// evaluated together on the first geometry query and kept for the life of
/// the grid; see [`cell_geometry`](Self::cell_geometry).
#[derive(Debug)]
pub struct CornerPointGrid {
    store: PillarStore,
    active: ActiveMap,
    options: GridOptions,
    repaired: usize,
    geometry: OnceLock<Vec<CellGeometry>>,
    active_volume: OnceLock<f64>,
    report: OnceLock<GeometryReport>,
}

impl CornerPointGrid {
    /// Start building a grid of the given dimensions.
    pub fn builder(dims: GridDims) -> GridBuilder {
        GridBuilder {
            dims,
            coord: Vec::new(),
            zcorn: Vec::new(),
            mask: None,
            options: GridOptions::new(),
        }
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.store.dims()
    }

    /// Pillar and depth arrays (after repair).
    pub fn store(&self) -> &PillarStore {
        &self.store
    }

    /// The active-cell map.
    pub fn active_map(&self) -> &ActiveMap {
        &self.active
    }

    /// Options the grid was built with.
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Depth samples changed by repair during construction.
    pub fn repaired_samples(&self) -> usize {
        self.repaired
    }

    /// `nx * ny * nz`.
    pub fn cartesian_size(&self) -> usize {
        self.dims().cartesian_size()
    }

    /// Number of active cells.
    pub fn nactive(&self) -> usize {
        self.active.nactive()
    }

    // ── Indexing ───────────────────────────────────────────────────

    /// Global index of a 0-based coordinate.
    pub fn global_index(&self, ijk: Ijk) -> Result<usize, GridError> {
        self.dims().global_index(ijk)
    }

    /// Global index of an external 1-based coordinate.
    pub fn global_from_one_based(&self, i: i64, j: i64, k: i64) -> Result<usize, GridError> {
        self.dims().global_from_one_based(i, j, k)
    }

    /// 0-based coordinate of a global index.
    pub fn ijk(&self, global: usize) -> Result<Ijk, GridError> {
        self.dims().ijk(global)
    }

    /// Whether a global cell is active.
    pub fn is_active(&self, global: usize) -> bool {
        self.active.is_active(global)
    }

    /// Active index of a global cell.
    pub fn active_index(&self, global: usize) -> Option<usize> {
        self.active.active_index(global)
    }

    /// Global index of an active cell.
    pub fn global_of_active(&self, active: usize) -> Option<usize> {
        self.active.global_index(active)
    }

    /// See [`ActiveMap::compress`].
    pub fn compress<T: Copy>(&self, values: &[T]) -> Result<Vec<T>, GridError> {
        self.active.compress(values)
    }

    /// See [`ActiveMap::expand`].
    pub fn expand<T: Copy>(&self, values: &[T], default: T) -> Result<Vec<T>, GridError> {
        self.active.expand(values, default)
    }

    // ── Geometry ───────────────────────────────────────────────────

    /// Full geometry of a cell.
    pub fn cell_geometry(&self, global: usize) -> Result<&CellGeometry, GridError> {
        self.dims().check_global(global)?;
        Ok(&self.all_geometry()[global])
    }

    /// Geometry of every cell in global order. Computed once.
    fn all_geometry(&self) -> &[CellGeometry] {
        self.geometry.get_or_init(|| {
            let dims = self.dims();
            let threshold = self.options.undefined_threshold;
            debug!(cells = dims.cartesian_size(), "evaluating cell geometry");
            (0..dims.cartesian_size())
                .map(|global| {
                    let ijk = Ijk::new(
                        global % dims.nx(),
                        (global / dims.nx()) % dims.ny(),
                        global / (dims.nx() * dims.ny()),
                    );
                    CellGeometry::evaluate(&self.store, ijk, threshold)
                })
                .collect()
        })
    }

    /// Corner `corner` (0..8) of a cell.
    pub fn corner(&self, global: usize, corner: usize) -> Result<Point3, GridError> {
        if corner >= 8 {
            return Err(GridError::OutOfBounds {
                what: "corner",
                index: corner,
                len: 8,
            });
        }
        Ok(self.cell_geometry(global)?.corners[corner])
    }

    /// Bulk volume of a cell; zero for degenerate cells.
    pub fn cell_volume(&self, global: usize) -> Result<f64, GridError> {
        Ok(self.cell_geometry(global)?.volume)
    }

    /// Center of a cell.
    pub fn cell_center(&self, global: usize) -> Result<Point3, GridError> {
        Ok(self.cell_geometry(global)?.center)
    }

    /// Center depth of a cell.
    pub fn cell_depth(&self, global: usize) -> Result<f64, GridError> {
        Ok(self.cell_geometry(global)?.depth())
    }

    /// Thickness of a cell.
    pub fn cell_thickness(&self, global: usize) -> Result<f64, GridError> {
        Ok(self.cell_geometry(global)?.thickness)
    }

    /// Extents `(dx, dy, dz)` of a cell.
    pub fn cell_dimensions(&self, global: usize) -> Result<[f64; 3], GridError> {
        Ok(self.cell_geometry(global)?.dimensions())
    }

    /// Whether a cell has usable geometry.
    pub fn cell_is_valid(&self, global: usize) -> Result<bool, GridError> {
        Ok(self.cell_geometry(global)?.is_valid())
    }

    // ── Memoized aggregates ────────────────────────────────────────

    /// Total volume of the active cells. Computed once.
    pub fn active_volume(&self) -> f64 {
        *self.active_volume.get_or_init(|| {
            let cells = self.all_geometry();
            self.active
                .active_to_global()
                .iter()
                .map(|&g| cells[g].volume)
                .sum()
        })
    }

    /// Scan every cell for degenerate geometry. Computed once.
    pub fn geometry_report(&self) -> &GeometryReport {
        self.report.get_or_init(|| {
            let report = self.scan_geometry();
            if report.degenerate_count() > 0 {
                warn!(
                    degenerate = report.degenerate_count(),
                    invalid = report.invalid_count,
                    tainted = report.tainted_count,
                    "grid has degenerate cells"
                );
            }
            report
        })
    }

    fn scan_geometry(&self) -> GeometryReport {
        let dims = self.dims();
        let mut report = GeometryReport {
            repaired_samples: self.repaired,
            ..GeometryReport::default()
        };
        for (global, geo) in self.all_geometry().iter().enumerate() {
            let Some(mut issue) = geo.issue else {
                continue;
            };
            report.invalid_count += 1;
            if issue == GeometryIssue::Collapsed && !self.is_active(global) {
                let Ok(ijk) = dims.ijk(global) else {
                    continue;
                };
                let depths = self.store.cell_depths(ijk);
                if depths.iter().all(|&z| z == depths[0]) {
                    issue = GeometryIssue::Tainted;
                    report.tainted_count += 1;
                }
            }
            report.warnings.push(GeometryWarning {
                cell: global,
                issue,
            });
        }
        report
    }
}
