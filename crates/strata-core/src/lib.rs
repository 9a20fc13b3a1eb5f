//! Core types for the Strata reservoir toolkit.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! identifiers, report dates and error kinds shared by the grid, keyword,
//! series and well-report crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod date;
pub mod error;
pub mod id;

pub use date::ReportDate;
pub use error::{
    DimensionError, GeometryIssue, GeometryWarning, NotFound, ProtocolError, SizeMismatch,
};
pub use id::{Ijk, SlotHandle};
