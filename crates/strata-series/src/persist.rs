//! Saving and loading summary cases.
//!
//! The header file describes the variables:
//!
//! | Keyword    | Type | Content                                   |
//! |------------|------|-------------------------------------------|
//! | `DIMENS`   | INTE | `[nvars, nx, ny, nz, 0, -1]`              |
//! | `KEYWORDS` | CHAR | variable keywords                         |
//! | `WGNAMES`  | CHAR | owners, [`DUMMY_WELL`] when there is none |
//! | `NUMS`     | INTE | numeric qualifiers                        |
//! | `UNITS`    | CHAR | units                                     |
//! | `STARTDAT` | INTE | `[day, month, year]`                      |
//!
//! Data files hold one `SEQHDR` per report step, followed by a
//! `MINISTEP` (running index) and `PARAMS` (one REAL per variable) pair
//! per ministep.

use std::fs;
use std::path::Path;

use strata_core::ReportDate;
use strata_kw::{KeywordData, KeywordEntry, KeywordError, KeywordFile};
use tracing::debug;

use crate::config::{ReportStepRule, SeriesConfig, WriteOptions};
use crate::descriptor::{VariableDescriptor, DUMMY_WELL};
use crate::error::SeriesError;
use crate::files::{DataFiles, SeriesFiles};
use crate::series::ResultSeries;

fn ints(name: &str, values: Vec<i32>) -> KeywordEntry {
    KeywordEntry::new(name, KeywordData::Int(values))
}

fn chars(name: &str, values: Vec<String>) -> KeywordEntry {
    KeywordEntry::new(name, KeywordData::Char(values))
}

fn header_int(what: &str, value: usize) -> Result<i32, SeriesError> {
    i32::try_from(value)
        .map_err(|_| SeriesError::header(format!("{what} {value} does not fit an INTE record")))
}

// ── Writing ────────────────────────────────────────────────────────

impl ResultSeries {
    /// The header records of this series.
    ///
    /// Fails when a count or grid dimension does not fit an `INTE` value.
    pub fn header_file(&self) -> Result<KeywordFile, SeriesError> {
        let [nx, ny, nz] = self.config().grid_dims.unwrap_or([0, 0, 0]);
        let descriptors = self.descriptors();
        let dimens = vec![
            header_int("variable count", descriptors.len())?,
            header_int("nx", nx)?,
            header_int("ny", ny)?,
            header_int("nz", nz)?,
            0,
            -1,
        ];
        Ok(KeywordFile::from_entries([
            ints("DIMENS", dimens),
            chars(
                "KEYWORDS",
                descriptors.iter().map(|d| d.keyword().to_string()).collect(),
            ),
            chars(
                "WGNAMES",
                descriptors
                    .iter()
                    .map(|d| d.owner_name().unwrap_or(DUMMY_WELL).to_string())
                    .collect(),
            ),
            ints("NUMS", descriptors.iter().map(|d| d.qualifier()).collect()),
            chars(
                "UNITS",
                descriptors.iter().map(|d| d.unit_name().to_string()).collect(),
            ),
            ints("STARTDAT", self.config().start_date.to_dmy().to_vec()),
        ]))
    }

    /// The data records of each report step, in order.
    ///
    /// Fails when a ministep index does not fit an `INTE` value.
    pub fn report_step_files(&self) -> Result<Vec<KeywordFile>, SeriesError> {
        let starts = self.report_starts();
        let ends = self.report_ends();
        starts
            .iter()
            .zip(&ends)
            .map(|(&start, &end)| {
                let mut file = KeywordFile::new();
                file.push(ints("SEQHDR", vec![1]));
                for m in start..=end {
                    file.push(ints("MINISTEP", vec![header_int("ministep", m)?]));
                    let row = self.ministep(m).unwrap_or_default();
                    file.push(KeywordEntry::new("PARAMS", KeywordData::Float(row.to_vec())));
                }
                Ok(file)
            })
            .collect()
    }

    /// Write the series as case `case`, returning the files written.
    ///
    /// The series must have a `TIME` variable so that it can be loaded
    /// again. Older files of the same case that this save does not
    /// overwrite are removed.
    pub fn save(
        &self,
        case: impl AsRef<Path>,
        options: &WriteOptions,
    ) -> Result<SeriesFiles, SeriesError> {
        if !self.descriptors().iter().any(VariableDescriptor::is_time) {
            return Err(SeriesError::header("a saved series needs a TIME variable"));
        }
        let steps = self.report_step_files()?;
        let files = SeriesFiles::for_case(case, options.layout, options.unified, steps.len());
        self.header_file()?.save(&files.header, options.layout)?;
        match &files.data {
            DataFiles::Unified(path) => {
                let all = KeywordFile::from_entries(
                    steps.iter().flat_map(|f| f.iter().cloned()),
                );
                all.save(path, options.layout)?;
            }
            DataFiles::PerStep(paths) => {
                for (file, path) in steps.iter().zip(paths) {
                    file.save(path, options.layout)?;
                }
            }
        }
        for stale in files.stale_files() {
            debug!(path = %stale.display(), "removing stale summary file");
            fs::remove_file(&stale).map_err(KeywordError::Io)?;
        }
        debug!(
            header = %files.header.display(),
            report_steps = steps.len(),
            ministeps = self.ministep_count(),
            unified = options.unified,
            "saved summary case"
        );
        Ok(files)
    }
}

// ── Reading ────────────────────────────────────────────────────────

/// Rebuilds a sealed [`ResultSeries`] from keyword files.
///
/// Report steps are taken from the `SEQHDR` positions, so a loaded series
/// always uses [`ReportStepRule::Explicit`]. Elapsed times come from the
/// `TIME` variable.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeriesReader;

impl SeriesReader {
    /// A reader.
    pub fn new() -> Self {
        Self
    }

    /// Load the case whose files `SeriesFiles::resolve(case)` finds.
    pub fn open(&self, case: impl AsRef<Path>) -> Result<ResultSeries, SeriesError> {
        let files = SeriesFiles::resolve(case)?;
        let header = KeywordFile::open(&files.header)?;
        let data = files
            .data
            .paths()
            .iter()
            .map(KeywordFile::open)
            .collect::<Result<Vec<_>, _>>()?;
        self.read(&header, &data)
    }

    /// Assemble a series from an already-parsed header and data files.
    pub fn read(
        &self,
        header: &KeywordFile,
        data: &[KeywordFile],
    ) -> Result<ResultSeries, SeriesError> {
        let (config, descriptors) = parse_header(header)?;
        let nvars = descriptors.len();
        let time_slot = descriptors
            .iter()
            .position(VariableDescriptor::is_time)
            .ok_or_else(|| SeriesError::header("no TIME variable"))?;

        let mut starts = Vec::new();
        let mut rows: Vec<Vec<f32>> = Vec::new();
        let mut step_open = false;
        for entry in data.iter().flat_map(KeywordFile::iter) {
            match entry.name() {
                "SEQHDR" => step_open = true,
                "PARAMS" => {
                    let values = entry.as_floats()?;
                    if values.len() != nvars {
                        return Err(SeriesError::header(format!(
                            "PARAMS has {} values, header declares {nvars}",
                            values.len()
                        )));
                    }
                    // Empty SEQHDR blocks are dropped; data before the first
                    // SEQHDR belongs to report step 0.
                    if step_open || starts.is_empty() {
                        starts.push(rows.len());
                        step_open = false;
                    }
                    rows.push(values.to_vec());
                }
                _ => {}
            }
        }
        let elapsed = rows.iter().map(|row| f64::from(row[time_slot])).collect();
        debug!(
            nvars,
            ministeps = rows.len(),
            report_steps = starts.len(),
            "loaded summary case"
        );
        let config = SeriesConfig {
            report_rule: ReportStepRule::Explicit(starts),
            ..config
        };
        ResultSeries::from_parts(config, descriptors, elapsed, rows)
    }
}

/// An optional per-variable header record, which must match `KEYWORDS`
/// in length.
fn column<'a>(
    header: &'a KeywordFile,
    name: &str,
    n: usize,
) -> Result<Option<&'a KeywordEntry>, SeriesError> {
    if !header.has(name) {
        return Ok(None);
    }
    let entry = header.first(name)?;
    if entry.len() != n {
        return Err(SeriesError::header(format!(
            "{name} has {} entries, KEYWORDS has {n}",
            entry.len()
        )));
    }
    Ok(Some(entry))
}

fn parse_header(
    header: &KeywordFile,
) -> Result<(SeriesConfig, Vec<VariableDescriptor>), SeriesError> {
    let keywords = header.first("KEYWORDS")?.as_strings()?;
    let n = keywords.len();
    let owners = column(header, "WGNAMES", n)?
        .map(KeywordEntry::as_strings)
        .transpose()?;
    let nums = column(header, "NUMS", n)?.map(KeywordEntry::as_ints).transpose()?;
    let units = column(header, "UNITS", n)?
        .map(KeywordEntry::as_strings)
        .transpose()?;

    let descriptors = keywords
        .iter()
        .enumerate()
        .map(|(i, kw)| {
            let mut d = VariableDescriptor::new(kw.trim());
            if let Some(owners) = owners {
                d = d.owner(owners[i].as_str());
            }
            if let Some(nums) = nums {
                d = d.num(nums[i]);
            }
            if let Some(units) = units {
                d = d.unit(units[i].trim());
            }
            d
        })
        .collect();

    let mut config = SeriesConfig::new();
    if header.has("DIMENS") {
        let dimens = header.first("DIMENS")?.as_ints()?;
        if let [_, nx, ny, nz, ..] = *dimens {
            if nx > 0 && ny > 0 && nz > 0 {
                config.grid_dims = Some([nx as usize, ny as usize, nz as usize]);
            }
        }
    }
    if header.has("STARTDAT") {
        let dmy = header.first("STARTDAT")?.as_ints()?;
        config.start_date = ReportDate::from_dmy(dmy)
            .ok_or_else(|| SeriesError::header(format!("invalid STARTDAT {dmy:?}")))?;
    }
    Ok((config, descriptors))
}
