//! Grids survive a trip through EGRID files in both layouts.

use strata_grid::{CornerPointGrid, GridOptions};
use strata_kw::Layout;
use strata_test_utils::{init_tracing, masked_box_grid, sheared_grid};

fn assert_same_grid(a: &CornerPointGrid, b: &CornerPointGrid) {
    assert_eq!(a.dims(), b.dims());
    assert_eq!(a.active_map(), b.active_map());
    for g in 0..a.cartesian_size() {
        let (va, vb) = (a.cell_volume(g).unwrap(), b.cell_volume(g).unwrap());
        assert!((va - vb).abs() < 1e-4 * va.max(1.0), "cell {g}: {va} vs {vb}");
    }
}

#[test]
fn binary_and_formatted_files() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let grid = masked_box_grid(3, 2, 2, (0..12).map(|g| g % 5 != 0).collect());
    for (name, layout) in [("CASE.EGRID", Layout::Binary), ("CASE.FEGRID", Layout::Formatted)] {
        let path = dir.path().join(name);
        grid.save(&path, layout).unwrap();
        let loaded = CornerPointGrid::open(&path, GridOptions::default()).unwrap();
        assert_same_grid(&grid, &loaded);
        assert_eq!(loaded.nactive(), 9);
    }
}

#[test]
fn sheared_grid_in_memory() {
    let grid = sheared_grid(2, 2, 2, [50.0, 50.0, 5.0], 0.5);
    let file = grid.to_keyword_file().unwrap();
    assert_eq!(file.first("GRIDHEAD").unwrap().as_ints().unwrap()[..4], [1, 2, 2, 2]);
    let loaded = CornerPointGrid::from_keyword_file(&file, GridOptions::default()).unwrap();
    assert_same_grid(&grid, &loaded);
}
