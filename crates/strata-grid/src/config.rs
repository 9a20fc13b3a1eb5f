//! Grid construction options and validation.

use std::error::Error;
use std::fmt;

// ── GridOptions ────────────────────────────────────────────────────

/// Options applied while building a [`CornerPointGrid`](crate::CornerPointGrid).
#[derive(Clone, Debug, PartialEq)]
pub struct GridOptions {
    /// Clamp inverted depth samples before evaluating geometry. Default: true.
    pub repair_depths: bool,
    /// Coordinates at or beyond this magnitude are undefined. Default: 1e20.
    pub undefined_threshold: f64,
    /// Cells that are active regardless of the activity mask
    /// (numerical aquifer cells). Default: empty.
    pub forced_active: Vec<usize>,
}

impl GridOptions {
    /// Default for [`repair_depths`](Self::repair_depths).
    pub const DEFAULT_REPAIR_DEPTHS: bool = true;
    /// Default for [`undefined_threshold`](Self::undefined_threshold).
    pub const DEFAULT_UNDEFINED_THRESHOLD: f64 = 1e20;

    /// Options with every field at its default.
    pub fn new() -> Self {
        Self {
            repair_depths: Self::DEFAULT_REPAIR_DEPTHS,
            undefined_threshold: Self::DEFAULT_UNDEFINED_THRESHOLD,
            forced_active: Vec::new(),
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.undefined_threshold.is_finite() && self.undefined_threshold > 0.0) {
            return Err(ConfigError::InvalidThreshold {
                value: self.undefined_threshold,
            });
        }
        Ok(())
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`GridOptions::validate`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// `undefined_threshold` is NaN, infinite, zero or negative.
    InvalidThreshold {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidThreshold { value } => {
                write!(f, "undefined_threshold must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let opts = GridOptions::default();
        assert!(opts.repair_depths);
        assert_eq!(opts.undefined_threshold, 1e20);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn bad_threshold_rejected() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let opts = GridOptions {
                undefined_threshold: value,
                ..GridOptions::new()
            };
            assert!(matches!(
                opts.validate(),
                Err(ConfigError::InvalidThreshold { .. })
            ));
        }
    }
}
