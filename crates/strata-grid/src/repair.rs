//! Depth-sample repair for inverted corner-point layers.
//!
//! Depths must be monotone down every pillar: a cell's top sample may not
//! lie below its own bottom sample, nor above the bottom sample of the
//! layer directly over it. Orientation (depth increasing or decreasing
//! with `k`) is taken from the first top sample and the last bottom
//! sample of the first column.

use strata_core::Ijk;

use crate::dims::GridDims;
use crate::store::PillarStore;

/// Clamp inverted depth samples in place. Returns the number of samples
/// changed.
///
/// Layers are visited top-down, so a clamp in layer `k` is seen by the
/// layer-`k+1` check. Running the pass twice changes nothing the second
/// time.
pub fn repair_depths(store: &mut PillarStore) -> usize {
    let dims = store.dims();
    repair_samples(dims, store.zcorn_mut())
}

/// The number of samples [`repair_depths`] would change, without changing
/// them.
pub fn count_depth_inversions(store: &PillarStore) -> usize {
    let mut zcorn = store.zcorn().to_vec();
    repair_samples(store.dims(), &mut zcorn)
}

fn orientation(dims: GridDims, zcorn: &[f64]) -> f64 {
    let first_top = zcorn[dims.zcorn_index(Ijk::new(0, 0, 0), 0)];
    let last_bottom = zcorn[dims.zcorn_index(Ijk::new(0, 0, dims.nz() - 1), 4)];
    if first_top <= last_bottom {
        1.0
    } else {
        -1.0
    }
}

fn repair_samples(dims: GridDims, zcorn: &mut [f64]) -> usize {
    if dims.cartesian_size() == 0 {
        return 0;
    }
    let sign = orientation(dims, zcorn);
    let mut changed = 0;
    for k in 0..dims.nz() {
        for j in 0..dims.ny() {
            for i in 0..dims.nx() {
                let ijk = Ijk::new(i, j, k);
                for c in 0..4 {
                    let top = dims.zcorn_index(ijk, c);
                    let bottom = dims.zcorn_index(ijk, c + 4);
                    if k > 0 {
                        let above = dims.zcorn_index(Ijk::new(i, j, k - 1), c + 4);
                        if (zcorn[top] - zcorn[above]) * sign < 0.0 {
                            zcorn[top] = zcorn[above];
                            changed += 1;
                        }
                    }
                    if (zcorn[bottom] - zcorn[top]) * sign < 0.0 {
                        zcorn[bottom] = zcorn[top];
                        changed += 1;
                    }
                }
            }
        }
    }
    changed
}
