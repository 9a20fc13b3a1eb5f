//! The per-well report catalog.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use strata_core::{NotFound, ReportDate};
use strata_kw::{KeywordEntry, KeywordError, KeywordFile, KeywordReader, KeywordWriter, Layout};
use tracing::{debug, warn};

use crate::codec::{decode_report, encode_report};
use crate::error::RftError;
use crate::types::{ConnectionRecord, WellReport};

/// Well reports addressed by `(well, date)`.
///
/// Dates match exactly. At most one report exists per well and date.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportCatalog {
    wells: BTreeMap<String, BTreeMap<ReportDate, WellReport>>,
    len: usize,
}

impl ReportCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a report, returning the one it replaces.
    pub fn insert(&mut self, report: WellReport) -> Option<WellReport> {
        let replaced = self
            .wells
            .entry(report.well.clone())
            .or_default()
            .insert(report.date, report);
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    /// Whether `well` has a report on `date`.
    pub fn has_report(&self, well: &str, date: ReportDate) -> bool {
        self.find(well, date).is_some()
    }

    /// The report of `well` on `date`.
    pub fn get_report(&self, well: &str, date: ReportDate) -> Result<&WellReport, RftError> {
        self.find(well, date)
            .ok_or_else(|| NotFound::new(format!("report for well {well} on {date}")).into())
    }

    /// Connections of the report of `well` on `date`, in file order.
    pub fn list_connections_for_report(
        &self,
        well: &str,
        date: ReportDate,
    ) -> Result<&[ConnectionRecord], RftError> {
        Ok(&self.get_report(well, date)?.connections)
    }

    fn find(&self, well: &str, date: ReportDate) -> Option<&WellReport> {
        self.wells.get(well)?.get(&date)
    }

    /// Well names, sorted.
    pub fn wells(&self) -> impl Iterator<Item = &str> {
        self.wells.keys().map(String::as_str)
    }

    /// Report dates of `well`, in chronological order.
    pub fn dates_for_well(&self, well: &str) -> Vec<ReportDate> {
        self.wells
            .get(well)
            .map(|dates| dates.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Every report, by well then date.
    pub fn iter(&self) -> impl Iterator<Item = &WellReport> {
        self.wells.values().flat_map(BTreeMap::values)
    }

    /// Number of reports.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the catalog has no reports.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ── Keyword files ──────────────────────────────────────────────

    /// Build a catalog from a sequence of report blocks.
    ///
    /// Records before the first `TIME` are ignored. A later report for the
    /// same well and date replaces an earlier one.
    pub fn from_entries(entries: &[KeywordEntry]) -> Result<Self, RftError> {
        let mut starts: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.name() == "TIME")
            .map(|(i, _)| i)
            .collect();
        starts.push(entries.len());
        let mut catalog = Self::new();
        for w in starts.windows(2) {
            let report = decode_report(&entries[w[0]..w[1]])?;
            if let Some(old) = catalog.insert(report) {
                warn!(well = %old.well, date = %old.date, "duplicate well report replaced");
            }
        }
        debug!(
            reports = catalog.len(),
            wells = catalog.wells.len(),
            "built well report catalog"
        );
        Ok(catalog)
    }

    /// Build a catalog from a parsed keyword file.
    pub fn from_keyword_file(file: &KeywordFile) -> Result<Self, RftError> {
        let entries: Vec<KeywordEntry> = file.iter().cloned().collect();
        Self::from_entries(&entries)
    }

    /// Read a report file, detecting its layout.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, RftError> {
        let entries = KeywordReader::detect(reader)?
            .entries()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(&entries)
    }

    /// Open a report file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RftError> {
        Self::read_from(BufReader::new(File::open(path).map_err(KeywordError::from)?))
    }

    /// Every report as keyword records, in chronological order.
    pub fn to_entries(&self) -> Result<Vec<KeywordEntry>, RftError> {
        let mut reports: Vec<&WellReport> = self.iter().collect();
        reports.sort_by(|a, b| (a.date, &a.well).cmp(&(b.date, &b.well)));
        let mut entries = Vec::new();
        for report in reports {
            entries.extend(encode_report(report)?);
        }
        Ok(entries)
    }

    /// Write every report, returning the sink.
    ///
    /// Nothing is written when a report cannot be encoded.
    pub fn write_to<W: Write>(&self, writer: W, layout: Layout) -> Result<W, RftError> {
        let entries = self.to_entries()?;
        let mut writer = KeywordWriter::new(writer, layout);
        writer.write_all(&entries)?;
        writer.flush()?;
        Ok(writer.into_inner())
    }

    /// Create or replace a report file on disk.
    pub fn save(&self, path: impl AsRef<Path>, layout: Layout) -> Result<(), RftError> {
        let out = BufWriter::new(File::create(path).map_err(KeywordError::from)?);
        self.write_to(out, layout)?;
        Ok(())
    }
}

impl FromIterator<WellReport> for ReportCatalog {
    fn from_iter<I: IntoIterator<Item = WellReport>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for report in iter {
            catalog.insert(report);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConnectionValues, ReportKind};
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use strata_core::Ijk;

    fn date(y: i32, m: u32, d: u32) -> ReportDate {
        ReportDate::new(y, m, d).unwrap()
    }

    fn report(well: &str, when: ReportDate, cells: usize) -> WellReport {
        WellReport {
            well: well.into(),
            date: when,
            elapsed_days: 0.0,
            kind: ReportKind::Rate,
            connections: (0..cells)
                .map(|k| ConnectionRecord {
                    ijk: Ijk::new(0, 0, k),
                    depth: 1000.0,
                    pressure: 200.0,
                    values: ConnectionValues::Rates {
                        oil: 10.0,
                        water: 1.0,
                        gas: 100.0,
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn exact_date_lookup() {
        let catalog: ReportCatalog = [report("OP-1", date(2010, 1, 1), 2)].into_iter().collect();
        assert!(catalog.has_report("OP-1", date(2010, 1, 1)));
        assert!(!catalog.has_report("OP-1", date(2010, 1, 2)));
        assert!(!catalog.has_report("OP-2", date(2010, 1, 1)));
        assert!(matches!(
            catalog.get_report("OP-1", date(2010, 1, 2)),
            Err(RftError::NotFound(_))
        ));
    }

    #[test]
    fn insert_replaces_same_key() {
        let mut catalog = ReportCatalog::new();
        assert!(catalog.insert(report("OP-1", date(2010, 1, 1), 2)).is_none());
        assert!(catalog.insert(report("OP-1", date(2010, 1, 1), 5)).is_some());
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog
                .list_connections_for_report("OP-1", date(2010, 1, 1))
                .unwrap()
                .len(),
            5
        );
    }

    #[test]
    fn wells_and_dates_sorted() {
        let catalog: ReportCatalog = [
            report("OP-2", date(2011, 1, 1), 1),
            report("OP-1", date(2012, 1, 1), 1),
            report("OP-1", date(2010, 1, 1), 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(catalog.wells().collect::<Vec<_>>(), vec!["OP-1", "OP-2"]);
        assert_eq!(
            catalog.dates_for_well("OP-1"),
            vec![date(2010, 1, 1), date(2012, 1, 1)]
        );
        assert!(catalog.dates_for_well("INJ").is_empty());
        let order: Vec<_> = catalog
            .to_entries()
            .unwrap()
            .iter()
            .filter(|e| e.name() == "DATE")
            .map(|e| e.as_ints().unwrap()[2])
            .collect();
        assert_eq!(order, vec![2010, 2011, 2012]);
    }

    #[test]
    fn records_before_first_time_ignored() {
        let mut entries = vec![KeywordEntry::new(
            "SEQNUM",
            strata_kw::KeywordData::Int(vec![1]),
        )];
        entries.extend(encode_report(&report("OP-1", date(2010, 1, 1), 1)).unwrap());
        let catalog = ReportCatalog::from_entries(&entries).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    proptest! {
        #[test]
        fn one_entry_per_well_and_date(keys in prop::collection::vec((0usize..4, 1u32..29), 0..40)) {
            let catalog: ReportCatalog = keys
                .iter()
                .map(|&(w, d)| report(&format!("W{w}"), date(2010, 2, d), 1))
                .collect();
            let distinct: BTreeSet<_> = keys.iter().copied().collect();
            prop_assert_eq!(catalog.len(), distinct.len());
            for (w, d) in distinct {
                let well = format!("W{w}");
                prop_assert!(catalog.has_report(&well, date(2010, 2, d)));
            }
        }
    }
}
