//! Resolving report connections against a grid.

use strata_core::{Ijk, ReportDate};
use strata_grid::CornerPointGrid;

use crate::catalog::ReportCatalog;
use crate::error::RftError;

/// A report connection located in a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectionCell {
    /// 0-based cell coordinate from the report.
    pub ijk: Ijk,
    /// Global (cartesian) cell index.
    pub global: usize,
    /// Active index, `None` for an inactive cell.
    pub active: Option<usize>,
}

impl ReportCatalog {
    /// Global and active indices of every connection of `well` on `date`,
    /// in file order.
    ///
    /// The grid is borrowed; share one [`CornerPointGrid`] between
    /// catalogs and threads through an `Arc`. A connection outside the
    /// grid is an [`OutOfBounds`](strata_grid::GridError::OutOfBounds)
    /// error.
    pub fn connection_cells(
        &self,
        grid: &CornerPointGrid,
        well: &str,
        date: ReportDate,
    ) -> Result<Vec<ConnectionCell>, RftError> {
        self.list_connections_for_report(well, date)?
            .iter()
            .map(|c| {
                let global = grid.global_index(c.ijk)?;
                Ok(ConnectionCell {
                    ijk: c.ijk,
                    global,
                    active: grid.active_index(global),
                })
            })
            .collect()
    }
}
