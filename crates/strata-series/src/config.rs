//! Series configuration, report-step rules and write options.

use std::error::Error;
use std::fmt;

use strata_core::{ReportDate, SlotHandle};
use strata_kw::Layout;

// ── ReportStepRule ─────────────────────────────────────────────────

/// How ministeps are grouped into report steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ReportStepRule {
    /// Every ministep is its own report step.
    #[default]
    EveryMinistep,
    /// A report step begins whenever this variable's value differs from
    /// the previous ministep's.
    OnChange(SlotHandle),
    /// Report steps begin at these ministep indices (strictly increasing,
    /// first entry 0).
    Explicit(Vec<usize>),
}

impl ReportStepRule {
    /// Check the rule's own invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Self::Explicit(starts) = self {
            if starts.first().is_some_and(|&s| s != 0) {
                return Err(ConfigError::InvalidReportStarts {
                    reason: "first report step must start at ministep 0".into(),
                });
            }
            if starts.windows(2).any(|w| w[1] <= w[0]) {
                return Err(ConfigError::InvalidReportStarts {
                    reason: "report step starts must be strictly increasing".into(),
                });
            }
        }
        Ok(())
    }
}

// ── SeriesConfig ───────────────────────────────────────────────────

/// Configuration for a [`ResultSeries`](crate::ResultSeries).
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesConfig {
    /// Calendar date of elapsed time zero. Default: 1970-01-01.
    pub start_date: ReportDate,
    /// Report-step grouping. Default: [`ReportStepRule::EveryMinistep`].
    pub report_rule: ReportStepRule,
    /// Grid extents `[nx, ny, nz]`, used to render block and completion
    /// keys as `i,j,k`. Default: `None`.
    pub grid_dims: Option<[usize; 3]>,
}

impl SeriesConfig {
    /// Configuration with every field at its default.
    pub fn new() -> Self {
        Self {
            start_date: ReportDate::default(),
            report_rule: ReportStepRule::default(),
            grid_dims: None,
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dims) = self.grid_dims {
            if dims.contains(&0) {
                return Err(ConfigError::EmptyGrid { dims });
            }
        }
        self.report_rule.validate()
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ── WriteOptions ───────────────────────────────────────────────────

/// How a series is written to disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// Binary or formatted records. Default: binary.
    pub layout: Layout,
    /// One data file for all report steps, or one per step. Default: true.
    pub unified: bool,
}

impl WriteOptions {
    /// Default for [`unified`](Self::unified).
    pub const DEFAULT_UNIFIED: bool = true;

    /// Options with every field at its default.
    pub fn new() -> Self {
        Self {
            layout: Layout::default(),
            unified: Self::DEFAULT_UNIFIED,
        }
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`SeriesConfig::validate`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// A grid extent is zero.
    EmptyGrid {
        /// The configured extents.
        dims: [usize; 3],
    },
    /// Explicit report-step starts are malformed.
    InvalidReportStarts {
        /// Which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { dims } => {
                write!(f, "grid dims {}x{}x{} have a zero extent", dims[0], dims[1], dims[2])
            }
            Self::InvalidReportStarts { reason } => write!(f, "{reason}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = SeriesConfig::default();
        assert_eq!(cfg.report_rule, ReportStepRule::EveryMinistep);
        assert!(cfg.validate().is_ok());
        let opts = WriteOptions::default();
        assert!(opts.unified);
        assert_eq!(opts.layout, Layout::Binary);
    }

    #[test]
    fn zero_extent_rejected() {
        let cfg = SeriesConfig {
            grid_dims: Some([4, 0, 2]),
            ..SeriesConfig::new()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::EmptyGrid { dims: [4, 0, 2] })
        );
    }

    #[test]
    fn explicit_starts_checked() {
        assert!(ReportStepRule::Explicit(vec![0, 2, 5]).validate().is_ok());
        assert!(ReportStepRule::Explicit(vec![]).validate().is_ok());
        assert!(ReportStepRule::Explicit(vec![1, 2]).validate().is_err());
        assert!(ReportStepRule::Explicit(vec![0, 2, 2]).validate().is_err());
    }
}
