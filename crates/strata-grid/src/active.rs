//! Bijection between global cells and active cells.

use strata_core::SizeMismatch;

use crate::error::GridError;

/// Sentinel stored in the global-to-active table for inactive cells.
pub const INACTIVE: i64 = -1;

/// Two flat lookup tables mapping global cell indices to dense active
/// indices and back.
///
/// Active indices are assigned in increasing global order. The tables
/// are built in a single pass and never modified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveMap {
    active_to_global: Vec<usize>,
    global_to_active: Vec<i64>,
}

impl ActiveMap {
    /// Build from a per-cell activity mask plus cells that are active
    /// regardless of the mask.
    ///
    /// `forced_active` may contain duplicates or cells the mask already
    /// marks active.
    pub fn build(mask: &[bool], forced_active: &[usize]) -> Result<Self, GridError> {
        let mut active = mask.to_vec();
        for &g in forced_active {
            let slot = active.get_mut(g).ok_or(GridError::OutOfBounds {
                what: "forced-active cell",
                index: g,
                len: mask.len(),
            })?;
            *slot = true;
        }

        let mut active_to_global = Vec::with_capacity(active.iter().filter(|&&a| a).count());
        let mut global_to_active = Vec::with_capacity(active.len());
        for (g, &is_active) in active.iter().enumerate() {
            if is_active {
                global_to_active.push(active_to_global.len() as i64);
                active_to_global.push(g);
            } else {
                global_to_active.push(INACTIVE);
            }
        }
        Ok(Self {
            active_to_global,
            global_to_active,
        })
    }

    /// Build from an `ACTNUM`-style array, where any non-zero value marks
    /// an active cell.
    pub fn from_actnum(actnum: &[i32], forced_active: &[usize]) -> Result<Self, GridError> {
        let mask: Vec<bool> = actnum.iter().map(|&a| a != 0).collect();
        Self::build(&mask, forced_active)
    }

    /// Every cell active.
    pub fn all_active(cartesian_size: usize) -> Self {
        Self {
            active_to_global: (0..cartesian_size).collect(),
            global_to_active: (0..cartesian_size as i64).collect(),
        }
    }

    /// Number of active cells.
    pub fn nactive(&self) -> usize {
        self.active_to_global.len()
    }

    /// Number of global cells covered.
    pub fn cartesian_size(&self) -> usize {
        self.global_to_active.len()
    }

    /// Whether global cell `global` is active. Out-of-range cells are not.
    pub fn is_active(&self, global: usize) -> bool {
        self.active_index(global).is_some()
    }

    /// Active index of a global cell, if it is active.
    pub fn active_index(&self, global: usize) -> Option<usize> {
        match self.global_to_active.get(global) {
            Some(&a) if a != INACTIVE => Some(a as usize),
            _ => None,
        }
    }

    /// Global index of an active cell.
    pub fn global_index(&self, active: usize) -> Option<usize> {
        self.active_to_global.get(active).copied()
    }

    /// Active-to-global table.
    pub fn active_to_global(&self) -> &[usize] {
        &self.active_to_global
    }

    /// Global-to-active table, with [`INACTIVE`] for inactive cells.
    pub fn global_to_active(&self) -> &[i64] {
        &self.global_to_active
    }

    /// The mask as an `ACTNUM` array (1 active, 0 inactive).
    pub fn to_actnum(&self) -> Vec<i32> {
        self.global_to_active
            .iter()
            .map(|&a| i32::from(a != INACTIVE))
            .collect()
    }

    /// Reduce a per-cell array to its active subset.
    ///
    /// Input already of active length is returned unchanged.
    pub fn compress<T: Copy>(&self, values: &[T]) -> Result<Vec<T>, GridError> {
        if values.len() == self.cartesian_size() {
            Ok(self.active_to_global.iter().map(|&g| values[g]).collect())
        } else if values.len() == self.nactive() {
            Ok(values.to_vec())
        } else {
            Err(SizeMismatch {
                what: "compress input".to_string(),
                expected: self.cartesian_size(),
                found: values.len(),
            }
            .into())
        }
    }

    /// Scatter an active-length array to full length, filling inactive
    /// cells with `default`.
    pub fn expand<T: Copy>(&self, values: &[T], default: T) -> Result<Vec<T>, GridError> {
        if values.len() != self.nactive() {
            return Err(SizeMismatch {
                what: "expand input".to_string(),
                expected: self.nactive(),
                found: values.len(),
            }
            .into());
        }
        let mut out = vec![default; self.cartesian_size()];
        for (&g, &v) in self.active_to_global.iter().zip(values) {
            out[g] = v;
        }
        Ok(out)
    }
}
