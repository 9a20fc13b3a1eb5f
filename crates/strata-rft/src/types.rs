//! Report kinds and per-connection records.

use std::fmt;

use strata_core::{Ijk, ReportDate};

/// What a well report measures, from the kind character in `WELLETC`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// `R`: formation pressure and saturations at each connection.
    Pressure,
    /// `P`: connection pressure and phase rates.
    Rate,
    /// Any other kind. Its connections are not decoded.
    Unsupported(char),
}

impl ReportKind {
    /// Classify a kind string by its first non-blank character.
    pub fn parse(s: &str) -> Self {
        match s.trim().chars().next() {
            Some('R') => Self::Pressure,
            Some('P') => Self::Rate,
            Some(c) => Self::Unsupported(c),
            None => Self::Unsupported(' '),
        }
    }

    /// The character written to `WELLETC`.
    pub fn as_char(self) -> char {
        match self {
            Self::Pressure => 'R',
            Self::Rate => 'P',
            Self::Unsupported(c) => c,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressure => f.write_str("pressure"),
            Self::Rate => f.write_str("rate"),
            Self::Unsupported(c) => write!(f, "unsupported ({c})"),
        }
    }
}

/// Kind-specific values measured at one connection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConnectionValues {
    /// Saturations from a pressure report.
    Saturations {
        /// Water saturation.
        swat: f32,
        /// Gas saturation.
        sgas: f32,
    },
    /// Surface rates from a rate report.
    Rates {
        /// Oil rate.
        oil: f32,
        /// Water rate.
        water: f32,
        /// Gas rate.
        gas: f32,
    },
}

impl ConnectionValues {
    /// Oil saturation, `1 - swat - sgas`, for pressure reports.
    pub fn soil(&self) -> Option<f32> {
        match *self {
            Self::Saturations { swat, sgas } => Some(1.0 - swat - sgas),
            Self::Rates { .. } => None,
        }
    }
}

/// One well connection (a perforated cell) in a report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionRecord {
    /// 0-based cell coordinate.
    pub ijk: Ijk,
    /// Connection depth.
    pub depth: f32,
    /// Pressure at the connection.
    pub pressure: f32,
    /// Kind-specific measurements.
    pub values: ConnectionValues,
}

/// All connections of one well at one report date.
#[derive(Clone, Debug, PartialEq)]
pub struct WellReport {
    /// Well name.
    pub well: String,
    /// Report date.
    pub date: ReportDate,
    /// Days since simulation start.
    pub elapsed_days: f32,
    /// What the report measures.
    pub kind: ReportKind,
    /// Connections, in file order. Empty for unsupported kinds.
    pub connections: Vec<ConnectionRecord>,
}

impl WellReport {
    /// Number of connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether the report has no connections.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Connection at cell `ijk`, if the well is perforated there.
    pub fn connection_at(&self, ijk: Ijk) -> Option<&ConnectionRecord> {
        self.connections.iter().find(|c| c.ijk == ijk)
    }
}
