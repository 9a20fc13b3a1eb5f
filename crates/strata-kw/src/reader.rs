//! Streaming keyword reader.
//!
//! [`KeywordReader`] decodes entries one at a time from any `BufRead`
//! source. Reading is strictly sequential; use
//! [`KeywordFile`](crate::KeywordFile) or [`KeywordIndex`](crate::KeywordIndex)
//! for lookup by name.

use std::io::BufRead;

use crate::error::KeywordError;
use crate::formatted::FormattedDecoder;
use crate::types::KeywordEntry;
use crate::{codec, Layout, HEADER_BYTES};

/// Guess the layout of a stream from its first bytes without consuming them.
///
/// A binary file starts with the header record marker (`16`, big-endian);
/// a formatted file starts with a quoted keyword name. Anything else is
/// treated as binary and will fail to decode.
pub fn detect_layout<R: BufRead>(reader: &mut R) -> Result<Layout, KeywordError> {
    let buf = reader.fill_buf()?;
    if buf.len() >= 4 && buf[..4] == (HEADER_BYTES as i32).to_be_bytes() {
        return Ok(Layout::Binary);
    }
    match buf.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'\'') => Ok(Layout::Formatted),
        _ => Ok(Layout::Binary),
    }
}

enum Source<R: BufRead> {
    Binary(R),
    Formatted(FormattedDecoder<R>),
}

impl<R: BufRead> Source<R> {
    fn decode(&mut self) -> Result<Option<KeywordEntry>, KeywordError> {
        match self {
            Self::Binary(r) => codec::decode_entry(r),
            Self::Formatted(d) => d.decode_entry(),
        }
    }
}

/// Reads keyword entries from a byte stream.
///
/// Generic over `R: BufRead` so tests can use `&[u8]` and production
/// code can use `BufReader<File>`.
pub struct KeywordReader<R: BufRead> {
    source: Source<R>,
    layout: Layout,
    entries_read: u64,
}

impl<R: BufRead> KeywordReader<R> {
    /// Create a reader for a known layout.
    pub fn new(reader: R, layout: Layout) -> Self {
        let source = match layout {
            Layout::Binary => Source::Binary(reader),
            Layout::Formatted => Source::Formatted(FormattedDecoder::new(reader)),
        };
        Self {
            source,
            layout,
            entries_read: 0,
        }
    }

    /// Create a reader, detecting the layout from the first bytes.
    pub fn detect(mut reader: R) -> Result<Self, KeywordError> {
        let layout = detect_layout(&mut reader)?;
        Ok(Self::new(reader, layout))
    }

    /// Layout being decoded.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Read the next entry, or `None` if the stream is exhausted.
    pub fn next_entry(&mut self) -> Result<Option<KeywordEntry>, KeywordError> {
        let entry = self.source.decode()?;
        if entry.is_some() {
            self.entries_read += 1;
        }
        Ok(entry)
    }

    /// Number of entries read so far.
    pub fn entries_read(&self) -> u64 {
        self.entries_read
    }

    /// Convert into an entry iterator.
    pub fn entries(self) -> EntryIter<R> {
        EntryIter {
            source: self.source,
            done: false,
        }
    }
}

/// Iterator adapter over keyword entries.
///
/// Stops after the first error.
pub struct EntryIter<R: BufRead> {
    source: Source<R>,
    done: bool,
}

impl<R: BufRead> Iterator for EntryIter<R> {
    type Item = Result<KeywordEntry, KeywordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.source.decode() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeywordData;
    use crate::writer::KeywordWriter;

    fn sample() -> Vec<KeywordEntry> {
        vec![
            KeywordEntry::new("SEQHDR", KeywordData::Int(vec![0])),
            KeywordEntry::new("MINISTEP", KeywordData::Int(vec![0])),
            KeywordEntry::new("PARAMS", KeywordData::Float(vec![1.0, 2.0, 3.0])),
            KeywordEntry::new("MINISTEP", KeywordData::Int(vec![1])),
            KeywordEntry::new("PARAMS", KeywordData::Float(vec![4.0, 5.0, 6.0])),
        ]
    }

    fn write(layout: Layout) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut writer = KeywordWriter::new(&mut buf, layout);
        writer.write_all(&sample()).unwrap();
        assert_eq!(writer.entries_written(), 5);
        buf
    }

    #[test]
    fn roundtrip_both_layouts_in_order() {
        for layout in [Layout::Binary, Layout::Formatted] {
            let buf = write(layout);
            let mut reader = KeywordReader::new(buf.as_slice(), layout);
            for expected in sample() {
                assert_eq!(reader.next_entry().unwrap().unwrap(), expected);
            }
            assert!(reader.next_entry().unwrap().is_none());
            assert_eq!(reader.entries_read(), 5);
        }
    }

    #[test]
    fn layout_detection() {
        let bin = write(Layout::Binary);
        let fmt = write(Layout::Formatted);
        assert_eq!(KeywordReader::detect(bin.as_slice()).unwrap().layout(), Layout::Binary);
        assert_eq!(
            KeywordReader::detect(fmt.as_slice()).unwrap().layout(),
            Layout::Formatted
        );
    }

    #[test]
    fn entry_iterator_works() {
        let buf = write(Layout::Binary);
        let reader = KeywordReader::new(buf.as_slice(), Layout::Binary);
        let entries: Vec<_> = reader.entries().collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(entries, sample());
    }

    #[test]
    fn truncated_stream_errors() {
        let mut buf = write(Layout::Binary);
        buf.truncate(buf.len() - 4);
        let mut reader = KeywordReader::new(buf.as_slice(), Layout::Binary);
        for _ in 0..4 {
            reader.next_entry().unwrap();
        }
        // Should get an error, not Ok(None)
        assert!(matches!(
            reader.next_entry(),
            Err(KeywordError::TruncatedRecord { .. })
        ));
    }

    #[test]
    fn iterator_stops_after_error() {
        let mut buf = write(Layout::Binary);
        buf.truncate(buf.len() - 4);
        let results: Vec<_> = KeywordReader::new(buf.as_slice(), Layout::Binary)
            .entries()
            .collect();
        assert_eq!(results.len(), 5);
        assert!(results[4].is_err());
    }
}
