//! Loading and storing grids as EGRID-style keyword files.
//!
//! ```text
//! GRIDHEAD  INTE 100   [1, nx, ny, nz, 0, ...]
//! COORD     REAL       6 * (nx+1) * (ny+1)
//! ZCORN     REAL       8 * nx * ny * nz
//! ACTNUM    INTE       nx * ny * nz        (optional; all active if absent)
//! ENDGRID   INTE 0
//! ```
//!
//! `COORD` and `ZCORN` are accepted as `REAL` or `DOUB` on load and
//! written as `REAL`.

use std::path::Path;

use strata_core::DimensionError;
use strata_kw::{KeywordData, KeywordEntry, KeywordError, KeywordFile, Layout};
use tracing::debug;

use crate::config::GridOptions;
use crate::dims::GridDims;
use crate::error::GridError;
use crate::grid::CornerPointGrid;

const GRIDHEAD_LEN: usize = 100;

fn extent(value: i32, axis: &str) -> Result<usize, GridError> {
    usize::try_from(value).map_err(|_| {
        KeywordError::InvalidValue {
            name: "GRIDHEAD".to_string(),
            detail: format!("negative {axis} = {value}"),
        }
        .into()
    })
}

impl CornerPointGrid {
    /// Build a grid from an in-memory EGRID keyword file.
    pub fn from_keyword_file(file: &KeywordFile, options: GridOptions) -> Result<Self, GridError> {
        let head = file
            .first("GRIDHEAD")
            .map_err(|_| GridError::MissingKeyword { name: "GRIDHEAD" })?
            .as_ints()?;
        if head.len() < 4 {
            return Err(DimensionError {
                what: "GRIDHEAD".to_string(),
                expected: 4,
                found: head.len(),
            }
            .into());
        }
        let dims = GridDims::new(
            extent(head[1], "nx")?,
            extent(head[2], "ny")?,
            extent(head[3], "nz")?,
        )?;

        let coord = file
            .first("COORD")
            .map_err(|_| GridError::MissingKeyword { name: "COORD" })?
            .to_f64_vec()?;
        let zcorn = file
            .first("ZCORN")
            .map_err(|_| GridError::MissingKeyword { name: "ZCORN" })?
            .to_f64_vec()?;

        let mut builder = Self::builder(dims).coord(coord).zcorn(zcorn).options(options);
        if let Ok(actnum) = file.first("ACTNUM") {
            builder = builder.actnum(actnum.as_ints()?);
        }
        builder.build()
    }

    /// Open an EGRID file from disk, detecting its layout.
    pub fn open(path: impl AsRef<Path>, options: GridOptions) -> Result<Self, GridError> {
        let path = path.as_ref();
        let file = KeywordFile::open(path)?;
        let grid = Self::from_keyword_file(&file, options)?;
        debug!(path = %path.display(), nactive = grid.nactive(), "loaded grid file");
        Ok(grid)
    }

    /// The grid as an EGRID keyword file.
    ///
    /// Depths are written after repair; `ACTNUM` reflects the active map,
    /// including forced-active cells.
    ///
    /// Fails when a dimension does not fit the `INTE` header.
    pub fn to_keyword_file(&self) -> Result<KeywordFile, GridError> {
        let head = gridhead(self.dims())?;
        let to_real = |v: &[f64]| KeywordData::Float(v.iter().map(|&x| x as f32).collect());
        Ok(KeywordFile::from_entries([
            KeywordEntry::new("GRIDHEAD", KeywordData::Int(head)),
            KeywordEntry::new("COORD", to_real(self.store().coord())),
            KeywordEntry::new("ZCORN", to_real(self.store().zcorn())),
            KeywordEntry::new("ACTNUM", KeywordData::Int(self.active_map().to_actnum())),
            KeywordEntry::new("ENDGRID", KeywordData::Int(Vec::new())),
        ]))
    }

    /// Write the grid to disk.
    pub fn save(&self, path: impl AsRef<Path>, layout: Layout) -> Result<(), GridError> {
        self.to_keyword_file()?.save(path, layout)?;
        Ok(())
    }
}

fn gridhead(dims: GridDims) -> Result<Vec<i32>, GridError> {
    let mut head = vec![0_i32; GRIDHEAD_LEN];
    head[0] = 1;
    for (slot, n) in [dims.nx(), dims.ny(), dims.nz()].into_iter().enumerate() {
        head[slot + 1] = i32::try_from(n).map_err(|_| KeywordError::InvalidValue {
            name: "GRIDHEAD".into(),
            detail: format!("dimension {n} exceeds i32"),
        })?;
    }
    Ok(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Ijk;

    fn small_grid() -> CornerPointGrid {
        let dims = GridDims::new(2, 1, 1).unwrap();
        let mut coord = Vec::new();
        for j in 0..2 {
            for i in 0..3 {
                let (x, y) = (i as f64 * 100.0, j as f64 * 50.0);
                coord.extend_from_slice(&[x, y, 0.0, x, y, 10.0]);
            }
        }
        let mut zcorn = vec![0.0; dims.zcorn_len()];
        for i in 0..2 {
            for c in 0..8 {
                zcorn[dims.zcorn_index(Ijk::new(i, 0, 0), c)] = if c < 4 { 2000.0 } else { 2010.0 };
            }
        }
        CornerPointGrid::builder(dims)
            .coord(coord)
            .zcorn(zcorn)
            .mask(vec![true, false])
            .build()
            .unwrap()
    }

    #[test]
    fn keyword_roundtrip_preserves_grid() {
        let grid = small_grid();
        let file = grid.to_keyword_file().unwrap();
        assert_eq!(file.first("GRIDHEAD").unwrap().len(), GRIDHEAD_LEN);
        let back = CornerPointGrid::from_keyword_file(&file, GridOptions::new()).unwrap();
        assert_eq!(back.dims(), grid.dims());
        assert_eq!(back.active_map(), grid.active_map());
        assert_eq!(back.active_volume(), grid.active_volume());
    }

    #[test]
    fn missing_zcorn_is_reported() {
        let file = KeywordFile::from_entries([
            KeywordEntry::new("GRIDHEAD", KeywordData::Int(vec![1, 1, 1, 1])),
            KeywordEntry::new("COORD", KeywordData::Float(vec![0.0; 24])),
        ]);
        assert!(matches!(
            CornerPointGrid::from_keyword_file(&file, GridOptions::new()),
            Err(GridError::MissingKeyword { name: "ZCORN" })
        ));
    }

    #[test]
    fn short_gridhead_is_dimension_error() {
        let file = KeywordFile::from_entries([KeywordEntry::new(
            "GRIDHEAD",
            KeywordData::Int(vec![1, 1]),
        )]);
        assert!(matches!(
            CornerPointGrid::from_keyword_file(&file, GridOptions::new()),
            Err(GridError::Dimension(_))
        ));
    }

    #[test]
    fn negative_extent_is_rejected() {
        let file = KeywordFile::from_entries([KeywordEntry::new(
            "GRIDHEAD",
            KeywordData::Int(vec![1, 2, -1, 1]),
        )]);
        assert!(matches!(
            CornerPointGrid::from_keyword_file(&file, GridOptions::new()),
            Err(GridError::Keyword(KeywordError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn wrong_type_is_keyword_error() {
        let file = KeywordFile::from_entries([KeywordEntry::new(
            "GRIDHEAD",
            KeywordData::Float(vec![1.0; 4]),
        )]);
        assert!(matches!(
            CornerPointGrid::from_keyword_file(&file, GridOptions::new()),
            Err(GridError::Keyword(_))
        ));
    }

    #[test]
    fn gridhead_rejects_dimensions_beyond_i32() {
        let head = gridhead(GridDims::new(4, 5, 6).unwrap()).unwrap();
        assert_eq!(head[..4], [1, 4, 5, 6]);
        let wide = GridDims::new(3_000_000_000, 1, 1).unwrap();
        assert!(matches!(
            gridhead(wide),
            Err(GridError::Keyword(KeywordError::InvalidValue { .. }))
        ));
    }
}
