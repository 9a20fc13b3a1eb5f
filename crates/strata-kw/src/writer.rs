//! Keyword file writer.
//!
//! [`KeywordWriter`] appends entries to any `Write` sink in the order they
//! are supplied. Already-written records are never revisited; replacing a
//! record means rewriting the whole container.

use std::io::Write;

use crate::error::KeywordError;
use crate::types::KeywordEntry;
use crate::{codec, formatted, Layout};

/// Writes keyword records to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use strata_kw::{KeywordData, KeywordEntry, KeywordReader, KeywordWriter, Layout};
///
/// let mut buf = Vec::new();
/// let mut writer = KeywordWriter::new(&mut buf, Layout::Binary);
/// writer
///     .write_entry(&KeywordEntry::new("NUMS", KeywordData::Int(vec![1, 2, 3])))
///     .unwrap();
/// assert_eq!(writer.entries_written(), 1);
/// drop(writer);
///
/// let mut reader = KeywordReader::new(buf.as_slice(), Layout::Binary);
/// let entry = reader.next_entry().unwrap().unwrap();
/// assert_eq!(entry.name(), "NUMS");
/// assert_eq!(entry.as_ints().unwrap(), &[1, 2, 3]);
/// assert!(reader.next_entry().unwrap().is_none());
/// ```
pub struct KeywordWriter<W: Write> {
    writer: W,
    layout: Layout,
    entries_written: u64,
}

impl<W: Write> KeywordWriter<W> {
    /// Create a writer for the given layout. Nothing is written until the
    /// first entry.
    pub fn new(writer: W, layout: Layout) -> Self {
        Self {
            writer,
            layout,
            entries_written: 0,
        }
    }

    /// Layout this writer produces.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Append one entry.
    pub fn write_entry(&mut self, entry: &KeywordEntry) -> Result<(), KeywordError> {
        match self.layout {
            Layout::Binary => codec::encode_entry(&mut self.writer, entry)?,
            Layout::Formatted => formatted::encode_entry(&mut self.writer, entry)?,
        }
        self.entries_written += 1;
        Ok(())
    }

    /// Append several entries in order.
    pub fn write_all<'a>(
        &mut self,
        entries: impl IntoIterator<Item = &'a KeywordEntry>,
    ) -> Result<(), KeywordError> {
        for entry in entries {
            self.write_entry(entry)?;
        }
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), KeywordError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of entries written so far.
    pub fn entries_written(&self) -> u64 {
        self.entries_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
