//! Keyword-record container format for Strata result files.
//!
//! A keyword file is an ordered sequence of named, typed, fixed-length
//! arrays. Grids, summary headers, summary data and well reports are all
//! stored this way. Two layouts expose the same logical record model:
//!
//! - [`Layout::Binary`]: big-endian Fortran records, payloads split into
//!   fixed-size blocks
//! - [`Layout::Formatted`]: whitespace-delimited text with quoted names
//!
//! # Architecture
//!
//! - [`KeywordReader`] streams entries from any `BufRead` source
//! - [`KeywordWriter`] appends entries to any `Write` sink
//! - [`KeywordFile`] holds a whole file in memory with a name index
//! - [`KeywordIndex`] indexes a seekable binary stream and loads records
//!   on demand
//!
//! # Format
//!
//! ```text
//! [i32 16]["NAME    " i32 count "TYPE"][i32 16]
//! [i32 n][block 1][i32 n] ... [i32 m][block k][i32 m]
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod file;
pub mod formatted;
pub mod index;
pub mod reader;
pub mod types;
pub mod writer;

pub use error::KeywordError;
pub use file::KeywordFile;
pub use index::{IndexedRecord, KeywordIndex};
pub use reader::{detect_layout, EntryIter, KeywordReader};
pub use types::{KeywordData, KeywordEntry, TypeTag};
pub use writer::KeywordWriter;

/// Width of a keyword name in the record header.
pub const NAME_WIDTH: usize = 8;

/// Width of the element type tag in the record header.
pub const TYPE_WIDTH: usize = 4;

/// Size of the binary header record payload: name, count, type.
pub const HEADER_BYTES: usize = NAME_WIDTH + 4 + TYPE_WIDTH;

/// Elements per payload block for numeric and logical types.
pub const NUMERIC_BLOCK_SIZE: usize = 1000;

/// Elements per payload block for `CHAR` data.
pub const CHAR_BLOCK_SIZE: usize = 105;

/// On-disk layout of a keyword file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Big-endian Fortran records.
    #[default]
    Binary,
    /// Whitespace-delimited text.
    Formatted,
}
