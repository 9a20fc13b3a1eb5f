//! Lazy index over a seekable binary keyword stream.
//!
//! One pass reads only the record headers and seeks over payloads,
//! recording the stream offset of each record. Payloads are decoded on
//! demand with [`KeywordIndex::load`]. Useful for large unified summary
//! files where a caller needs a handful of records.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::codec::{decode_header, decode_payload, RecordHeader};
use crate::error::KeywordError;
use crate::reader::detect_layout;
use crate::types::{KeywordEntry, TypeTag};
use crate::Layout;

/// Location and shape of one record in an indexed stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedRecord {
    /// Keyword name.
    pub name: String,
    /// Element type.
    pub type_tag: TypeTag,
    /// Declared element count.
    pub count: usize,
    /// Stream offset of the header record.
    pub offset: u64,
}

/// Header index over a binary keyword stream.
pub struct KeywordIndex<R: Read + Seek> {
    reader: R,
    records: Vec<IndexedRecord>,
    by_name: IndexMap<String, SmallVec<[usize; 4]>>,
}

impl KeywordIndex<BufReader<File>> {
    /// Index a binary file on disk.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, KeywordError> {
        let mut reader = BufReader::new(File::open(path)?);
        if detect_layout(&mut reader)? == Layout::Formatted {
            return Err(KeywordError::UnsupportedLayout {
                detail: "lazy indexing requires the binary layout".into(),
            });
        }
        Self::open(reader)
    }
}

impl<R: Read + Seek> KeywordIndex<R> {
    /// Scan every header in the stream.
    ///
    /// A payload that would extend past the end of the stream is reported
    /// as [`KeywordError::TruncatedRecord`] here rather than on load.
    pub fn open(mut reader: R) -> Result<Self, KeywordError> {
        let end = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let mut records = Vec::new();
        let mut by_name: IndexMap<String, SmallVec<[usize; 4]>> = IndexMap::new();
        loop {
            let offset = reader.stream_position()?;
            let Some(header) = decode_header(&mut reader)? else {
                break;
            };
            let payload_end = reader.stream_position()? + header.payload_disk_len();
            if payload_end > end {
                return Err(KeywordError::TruncatedRecord {
                    name: header.name,
                    detail: format!("payload ends at byte {payload_end}, stream has {end}"),
                });
            }
            reader.seek(SeekFrom::Start(payload_end))?;

            by_name
                .entry(header.name.clone())
                .or_default()
                .push(records.len());
            records.push(IndexedRecord {
                name: header.name,
                type_tag: header.type_tag,
                count: header.count,
                offset,
            });
        }

        Ok(Self {
            reader,
            records,
            by_name,
        })
    }

    /// Every record in stream order.
    pub fn records(&self) -> &[IndexedRecord] {
        &self.records
    }

    /// How many times `name` occurs.
    pub fn count(&self, name: &str) -> usize {
        self.by_name.get(name).map_or(0, |p| p.len())
    }

    /// Header of occurrence `occurrence` of `name`.
    pub fn record(&self, name: &str, occurrence: usize) -> Result<&IndexedRecord, KeywordError> {
        self.by_name
            .get(name)
            .and_then(|p| p.get(occurrence))
            .map(|&i| &self.records[i])
            .ok_or_else(|| KeywordError::NotFound {
                name: name.to_string(),
                occurrence,
            })
    }

    /// Decode occurrence `occurrence` of `name` from the stream.
    pub fn load(&mut self, name: &str, occurrence: usize) -> Result<KeywordEntry, KeywordError> {
        let record = self.record(name, occurrence)?.clone();
        self.reader.seek(SeekFrom::Start(record.offset))?;
        let header = decode_header(&mut self.reader)?.ok_or_else(|| {
            KeywordError::truncated(&record.name, "stream ended before indexed header")
        })?;
        let data = decode_payload(
            &mut self.reader,
            &RecordHeader {
                name: record.name.clone(),
                ..header
            },
        )?;
        Ok(KeywordEntry::new(&record.name, data))
    }

    /// Consume the index and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
