//! Grid invariant test helpers.
//!
//! Reused by the unit tests of the active map, repair and grid modules.

use crate::active::ActiveMap;
use crate::grid::CornerPointGrid;
use crate::repair::repair_depths;
use crate::store::PillarStore;

/// Assert that the two active-map tables are inverse bijections.
pub fn assert_active_map_bijective(map: &ActiveMap) {
    for (a, &g) in map.active_to_global().iter().enumerate() {
        assert_eq!(
            map.active_index(g),
            Some(a),
            "active {a} -> global {g} does not map back"
        );
    }
    let active_count = map
        .global_to_active()
        .iter()
        .filter(|&&a| a >= 0)
        .count();
    assert_eq!(active_count, map.nactive(), "table sizes disagree");
}

/// Assert that every cell has a finite, non-negative volume and that
/// degenerate cells have exactly zero.
pub fn assert_volumes_well_formed(grid: &CornerPointGrid) {
    for g in 0..grid.cartesian_size() {
        let geo = grid.cell_geometry(g).unwrap();
        assert!(
            geo.volume.is_finite() && geo.volume >= 0.0,
            "cell {g} volume {}",
            geo.volume
        );
        if !geo.is_valid() {
            assert_eq!(geo.volume, 0.0, "degenerate cell {g} has volume");
        }
    }
}

/// Assert that a second repair pass changes nothing.
pub fn assert_repair_idempotent(store: &PillarStore) {
    let mut once = store.clone();
    repair_depths(&mut once);
    let mut twice = once.clone();
    assert_eq!(repair_depths(&mut twice), 0, "second repair changed samples");
    assert_eq!(once, twice);
}
