//! In-memory keyword file with a name index.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::error::KeywordError;
use crate::reader::KeywordReader;
use crate::types::KeywordEntry;
use crate::writer::KeywordWriter;
use crate::Layout;

/// An ordered sequence of keyword entries, addressable by
/// `(name, occurrence)`.
///
/// The same name may occur many times (every ministep of a summary file
/// writes a `PARAMS` record); each occurrence is independently addressable.
/// The index is built once while the entries are read and never rebuilt.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeywordFile {
    entries: Vec<KeywordEntry>,
    index: IndexMap<String, SmallVec<[usize; 4]>>,
}

impl KeywordFile {
    /// An empty file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a file from entries, in order.
    pub fn from_entries(entries: impl IntoIterator<Item = KeywordEntry>) -> Self {
        let mut file = Self::new();
        for entry in entries {
            file.push(entry);
        }
        file
    }

    /// Append an entry to the end of the file.
    pub fn push(&mut self, entry: KeywordEntry) {
        self.index
            .entry(entry.name().to_string())
            .or_default()
            .push(self.entries.len());
        self.entries.push(entry);
    }

    /// Read every entry from a stream of known layout.
    pub fn read_from<R: BufRead>(reader: R, layout: Layout) -> Result<Self, KeywordError> {
        let mut file = Self::new();
        for entry in KeywordReader::new(reader, layout).entries() {
            file.push(entry?);
        }
        Ok(file)
    }

    /// Open a file from disk, detecting its layout.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KeywordError> {
        let path = path.as_ref();
        let reader = KeywordReader::detect(BufReader::new(File::open(path)?))?;
        let layout = reader.layout();
        let mut file = Self::new();
        for entry in reader.entries() {
            file.push(entry?);
        }
        debug!(
            path = %path.display(),
            ?layout,
            entries = file.len(),
            keywords = file.index.len(),
            "indexed keyword file"
        );
        Ok(file)
    }

    /// Write every entry, in order.
    pub fn write_to<W: Write>(&self, writer: W, layout: Layout) -> Result<W, KeywordError> {
        let mut writer = KeywordWriter::new(writer, layout);
        writer.write_all(&self.entries)?;
        writer.flush()?;
        Ok(writer.into_inner())
    }

    /// Create or replace a file on disk.
    pub fn save(&self, path: impl AsRef<Path>, layout: Layout) -> Result<(), KeywordError> {
        let out = BufWriter::new(File::create(path)?);
        self.write_to(out, layout)?;
        Ok(())
    }

    /// Occurrence `occurrence` (0-based) of keyword `name`.
    pub fn get(&self, name: &str, occurrence: usize) -> Result<&KeywordEntry, KeywordError> {
        self.positions(name)
            .get(occurrence)
            .map(|&pos| &self.entries[pos])
            .ok_or_else(|| KeywordError::NotFound {
                name: name.to_string(),
                occurrence,
            })
    }

    /// The first occurrence of `name`.
    pub fn first(&self, name: &str) -> Result<&KeywordEntry, KeywordError> {
        self.get(name, 0)
    }

    /// How many times `name` occurs.
    pub fn count(&self, name: &str) -> usize {
        self.positions(name).len()
    }

    /// Whether `name` occurs at least once.
    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Positions of every occurrence of `name`, in file order.
    pub fn positions(&self, name: &str) -> &[usize] {
        self.index.get(name).map(|p| p.as_slice()).unwrap_or(&[])
    }

    /// Distinct keyword names in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// The entry at a file position.
    pub fn at(&self, position: usize) -> Option<&KeywordEntry> {
        self.entries.get(position)
    }

    /// All entries in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, KeywordEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a KeywordFile {
    type Item = &'a KeywordEntry;
    type IntoIter = std::slice::Iter<'a, KeywordEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
