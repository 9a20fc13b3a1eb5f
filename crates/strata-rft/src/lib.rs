//! Per-well pressure and rate reports.
//!
//! A report file holds one block per well and report date. Pressure
//! reports (`R`) carry formation pressure and saturations at each
//! connection; rate reports (`P`) carry connection pressure and phase
//! rates. Other kinds are kept as empty entries.
//!
//! [`ReportCatalog`] indexes the blocks by `(well, date)` and converts
//! them to and from keyword files.
//!
//! ```
//! use strata_core::ReportDate;
//! use strata_rft::{ReportCatalog, ReportKind, WellReport};
//!
//! let date = ReportDate::new(2010, 1, 1).unwrap();
//! let mut catalog = ReportCatalog::new();
//! catalog.insert(WellReport {
//!     well: "OP-1".into(),
//!     date,
//!     elapsed_days: 0.0,
//!     kind: ReportKind::Pressure,
//!     connections: Vec::new(),
//! });
//! assert!(catalog.has_report("OP-1", date));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod cells;
pub mod codec;
pub mod error;
pub mod types;

pub use catalog::ReportCatalog;
pub use cells::ConnectionCell;
pub use error::RftError;
pub use types::{ConnectionRecord, ConnectionValues, ReportKind, WellReport};
