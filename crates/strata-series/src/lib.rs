//! Time-indexed summary result series.
//!
//! A [`ResultSeries`] is a table with one row per simulator ministep and
//! one column per registered [`VariableDescriptor`]. Variables are looked
//! up by their general key (`WOPR:OP-1`, `BPR:5,5,3`). Report steps group
//! consecutive ministeps according to a [`ReportStepRule`].
//!
//! # Lifecycle
//!
//! ```text
//! Defining ──append_ministep──▶ Sealed
//!   register                     set / set_by_key / queries
//! ```
//!
//! # Example
//!
//! ```
//! use strata_series::{ResultSeries, SeriesConfig, VariableDescriptor};
//!
//! let mut series = ResultSeries::new(SeriesConfig::default()).unwrap();
//! series.register(VariableDescriptor::new("TIME").unit("DAYS")).unwrap();
//! series.register(VariableDescriptor::new("WOPR").owner("OP-1")).unwrap();
//!
//! series.append_ministep(1.0).unwrap();
//! series.set_by_key("WOPR:OP-1", 250.0).unwrap();
//!
//! assert_eq!(series.value_at_report("WOPR:OP-1", 0).unwrap(), Some(250.0));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod descriptor;
pub mod error;
pub mod files;
pub mod persist;
pub mod series;
pub mod time;

pub use config::{ConfigError, ReportStepRule, SeriesConfig, WriteOptions};
pub use descriptor::{cell_from_num, num_from_cell, VarKind, VariableDescriptor, DUMMY_WELL};
pub use error::SeriesError;
pub use files::{DataFiles, SeriesFiles};
pub use persist::SeriesReader;
pub use series::{ResultSeries, SeriesState};
pub use time::TimeMap;
