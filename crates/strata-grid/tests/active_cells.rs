//! Active-cell indexing through the assembled grid.

use proptest::prelude::*;
use strata_grid::{ActiveMap, CornerPointGrid, GridDims, GridError, INACTIVE};
use strata_test_utils::{init_tracing, layered_zcorn, masked_box_grid, vertical_coord};

#[test]
fn two_by_two_mask() {
    init_tracing();
    let grid = masked_box_grid(2, 2, 1, vec![true, false, true, true]);
    let map = grid.active_map();
    assert_eq!(map.nactive(), 3);
    assert_eq!(map.active_to_global(), &[0, 2, 3]);
    assert_eq!(map.global_to_active(), &[0, INACTIVE, 1, 2]);
    assert_eq!(map.to_actnum(), vec![1, 0, 1, 1]);
}

#[test]
fn compress_and_expand() {
    let grid = masked_box_grid(2, 2, 1, vec![true, false, true, true]);
    let active = grid.compress(&[10.0, 11.0, 12.0, 13.0]).unwrap();
    assert_eq!(active, vec![10.0, 12.0, 13.0]);
    assert_eq!(grid.compress(&active).unwrap(), active);
    assert_eq!(
        grid.expand(&active, -1.0).unwrap(),
        vec![10.0, -1.0, 12.0, 13.0]
    );
    assert!(matches!(
        grid.compress(&[1.0, 2.0]),
        Err(GridError::SizeMismatch(_))
    ));
}

#[test]
fn actnum_input_and_forced_cells() {
    let dims = GridDims::new(2, 2, 1).unwrap();
    let grid = CornerPointGrid::builder(dims)
        .coord(vertical_coord(2, 2, 1.0, 1.0))
        .zcorn(layered_zcorn(dims, 0.0, 1.0))
        .actnum(&[0, 0, 1, 0])
        .forced_active(vec![1])
        .build()
        .unwrap();
    assert_eq!(grid.active_map().active_to_global(), &[1, 2]);
    assert!(matches!(
        CornerPointGrid::builder(dims)
            .coord(vertical_coord(2, 2, 1.0, 1.0))
            .zcorn(layered_zcorn(dims, 0.0, 1.0))
            .forced_active(vec![4])
            .build(),
        Err(GridError::OutOfBounds { .. })
    ));
}

proptest! {
    #[test]
    fn active_map_round_trips(mask in prop::collection::vec(any::<bool>(), 1..200)) {
        let map = ActiveMap::build(&mask, &[]).unwrap();
        let n = mask.iter().filter(|&&m| m).count();
        prop_assert_eq!(map.nactive(), n);
        for (a, &g) in map.active_to_global().iter().enumerate() {
            prop_assert_eq!(map.active_index(g), Some(a));
        }
        for (g, &a) in map.global_to_active().iter().enumerate() {
            if mask[g] {
                prop_assert_eq!(map.global_index(a as usize), Some(g));
            } else {
                prop_assert_eq!(a, INACTIVE);
            }
        }
    }

    #[test]
    fn compression_length_law(
        mask in prop::collection::vec(any::<bool>(), 1..200),
        fill in any::<i32>(),
    ) {
        let map = ActiveMap::build(&mask, &[]).unwrap();
        let full: Vec<i32> = (0..mask.len() as i32).collect();
        let compressed = map.compress(&full).unwrap();
        prop_assert_eq!(compressed.len(), map.nactive());
        let expanded = map.expand(&compressed, fill).unwrap();
        prop_assert_eq!(expanded.len(), mask.len());
        for (g, &v) in expanded.iter().enumerate() {
            prop_assert_eq!(v, if mask[g] { full[g] } else { fill });
        }
    }
}
