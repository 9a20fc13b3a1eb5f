//! Conversion between [`WellReport`]s and keyword record blocks.
//!
//! Every report is one block that starts at a `TIME` record:
//!
//! ```text
//! TIME     REAL 1      elapsed days
//! DATE     INTE 3      day, month, year
//! WELLETC  CHAR 16     [1] well name, [5] kind character
//! CONIPOS  INTE n      1-based i
//! CONJPOS  INTE n      1-based j
//! CONKPOS  INTE n      1-based k
//! R: DEPTH PRESSURE SWAT SGAS               REAL n
//! P: CONDEPTH CONPRES CONORAT CONWRAT CONGRAT  REAL n
//! ```

use strata_core::{Ijk, ReportDate, SizeMismatch};
use strata_kw::{KeywordData, KeywordEntry, KeywordError};
use tracing::warn;

use crate::error::RftError;
use crate::types::{ConnectionRecord, ConnectionValues, ReportKind, WellReport};

/// Position of the well name in `WELLETC`.
const WELL_SLOT: usize = 1;
/// Position of the kind character in `WELLETC`.
const KIND_SLOT: usize = 5;

fn welletc(well: &str, kind: ReportKind) -> Vec<String> {
    let kind = kind.as_char().to_string();
    [
        "DAYS",
        well,
        "",
        "METRES",
        "BARSA",
        kind.as_str(),
        "STANDARD",
        "SM3/DAY",
        "SM3/DAY",
        "RM3/DAY",
        "M/SEC",
        "",
        "CP",
        "KG/SM3",
        "KG/DAY",
        "KG/KG",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn invalid(name: &str, detail: impl Into<String>) -> RftError {
    KeywordError::InvalidValue {
        name: name.to_string(),
        detail: detail.into(),
    }
    .into()
}

// ── Decoding ───────────────────────────────────────────────────────

struct Block<'a> {
    entries: &'a [KeywordEntry],
    well: String,
}

impl<'a> Block<'a> {
    fn entry(&self, name: &'static str) -> Result<&'a KeywordEntry, RftError> {
        self.entries
            .iter()
            .find(|e| e.name() == name)
            .ok_or(RftError::MissingArray { name })
    }

    /// A per-connection array, checked against the connection count.
    fn column(&self, name: &'static str, n: usize) -> Result<Vec<f32>, RftError> {
        let values = self.entry(name)?.to_f64_vec()?;
        self.check_len(name, n, values.len())?;
        Ok(values.into_iter().map(|v| v as f32).collect())
    }

    fn check_len(&self, name: &str, expected: usize, found: usize) -> Result<(), RftError> {
        if expected != found {
            return Err(SizeMismatch {
                what: format!("{name} of well {}", self.well),
                expected,
                found,
            }
            .into());
        }
        Ok(())
    }
}

/// Decode one report block. `entries` starts at its `TIME` record and
/// ends before the next one.
pub fn decode_report(entries: &[KeywordEntry]) -> Result<WellReport, RftError> {
    let mut block = Block {
        entries,
        well: String::new(),
    };
    let elapsed_days = block
        .entry("TIME")?
        .to_f64_vec()?
        .first()
        .copied()
        .ok_or_else(|| invalid("TIME", "empty"))? as f32;
    let dmy = block.entry("DATE")?.as_ints()?;
    let date = ReportDate::from_dmy(dmy)
        .ok_or_else(|| invalid("DATE", format!("{dmy:?} is not a calendar date")))?;
    let etc = block.entry("WELLETC")?.as_strings()?;
    if etc.len() <= KIND_SLOT {
        return Err(invalid("WELLETC", format!("{} entries", etc.len())));
    }
    block.well = etc[WELL_SLOT].trim().to_string();
    let kind = ReportKind::parse(&etc[KIND_SLOT]);

    let connections = match kind {
        ReportKind::Unsupported(c) => {
            warn!(well = %block.well, %date, kind = %c, "skipping unsupported report kind");
            Vec::new()
        }
        ReportKind::Pressure | ReportKind::Rate => decode_connections(&block, kind)?,
    };
    Ok(WellReport {
        well: block.well,
        date,
        elapsed_days,
        kind,
        connections,
    })
}

fn decode_connections(block: &Block<'_>, kind: ReportKind) -> Result<Vec<ConnectionRecord>, RftError> {
    let ipos = block.entry("CONIPOS")?.as_ints()?;
    let n = ipos.len();
    let jpos = block.entry("CONJPOS")?.as_ints()?;
    block.check_len("CONJPOS", n, jpos.len())?;
    let kpos = block.entry("CONKPOS")?.as_ints()?;
    block.check_len("CONKPOS", n, kpos.len())?;

    let cells = (0..n)
        .map(|c| {
            Ijk::from_one_based(ipos[c].into(), jpos[c].into(), kpos[c].into()).ok_or_else(|| {
                invalid(
                    "CONIPOS",
                    format!("connection ({},{},{}) is not 1-based", ipos[c], jpos[c], kpos[c]),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (depth, pressure, values): (_, _, Vec<ConnectionValues>) = match kind {
        ReportKind::Pressure => {
            let swat = block.column("SWAT", n)?;
            let sgas = block.column("SGAS", n)?;
            (
                block.column("DEPTH", n)?,
                block.column("PRESSURE", n)?,
                swat.iter()
                    .zip(&sgas)
                    .map(|(&swat, &sgas)| ConnectionValues::Saturations { swat, sgas })
                    .collect(),
            )
        }
        _ => {
            let oil = block.column("CONORAT", n)?;
            let water = block.column("CONWRAT", n)?;
            let gas = block.column("CONGRAT", n)?;
            (
                block.column("CONDEPTH", n)?,
                block.column("CONPRES", n)?,
                (0..n)
                    .map(|c| ConnectionValues::Rates {
                        oil: oil[c],
                        water: water[c],
                        gas: gas[c],
                    })
                    .collect(),
            )
        }
    };

    Ok((0..n)
        .map(|c| ConnectionRecord {
            ijk: cells[c],
            depth: depth[c],
            pressure: pressure[c],
            values: values[c],
        })
        .collect())
}

// ── Encoding ───────────────────────────────────────────────────────

fn reals(name: &str, values: impl Iterator<Item = f32>) -> KeywordEntry {
    KeywordEntry::new(name, KeywordData::Float(values.collect()))
}

fn ints(name: &str, values: impl Iterator<Item = i32>) -> KeywordEntry {
    KeywordEntry::new(name, KeywordData::Int(values.collect()))
}

/// Encode one report as a keyword block.
///
/// Every connection must hold values of the report's kind, and indices
/// must fit the `INTE` arrays.
pub fn encode_report(report: &WellReport) -> Result<Vec<KeywordEntry>, RftError> {
    let conns = &report.connections;
    let mut block = vec![
        reals("TIME", std::iter::once(report.elapsed_days)),
        ints("DATE", report.date.to_dmy().into_iter()),
        KeywordEntry::new(
            "WELLETC",
            KeywordData::Char(welletc(&report.well, report.kind)),
        ),
    ];
    if let ReportKind::Unsupported(_) = report.kind {
        return Ok(block);
    }
    let matches_kind = |v: &ConnectionValues| {
        matches!(
            (report.kind, v),
            (ReportKind::Pressure, ConnectionValues::Saturations { .. })
                | (ReportKind::Rate, ConnectionValues::Rates { .. })
        )
    };
    if let Some(connection) = conns.iter().position(|c| !matches_kind(&c.values)) {
        return Err(RftError::ValueKind {
            well: report.well.clone(),
            kind: report.kind,
            connection,
        });
    }

    let one_based = |f: fn(Ijk) -> usize| -> Result<Vec<i32>, RftError> {
        conns
            .iter()
            .map(|c| {
                i32::try_from(f(c.ijk) + 1).map_err(|_| {
                    RftError::from(KeywordError::InvalidValue {
                        name: report.well.clone(),
                        detail: format!("connection index {} exceeds i32", c.ijk),
                    })
                })
            })
            .collect()
    };
    block.push(ints("CONIPOS", one_based(|ijk| ijk.i)?.into_iter()));
    block.push(ints("CONJPOS", one_based(|ijk| ijk.j)?.into_iter()));
    block.push(ints("CONKPOS", one_based(|ijk| ijk.k)?.into_iter()));

    let depth = conns.iter().map(|c| c.depth);
    let pressure = conns.iter().map(|c| c.pressure);
    let sats = || {
        conns.iter().filter_map(|c| match c.values {
            ConnectionValues::Saturations { swat, sgas } => Some((swat, sgas)),
            ConnectionValues::Rates { .. } => None,
        })
    };
    let rates = || {
        conns.iter().filter_map(|c| match c.values {
            ConnectionValues::Rates { oil, water, gas } => Some((oil, water, gas)),
            ConnectionValues::Saturations { .. } => None,
        })
    };
    if report.kind == ReportKind::Pressure {
        block.push(reals("DEPTH", depth));
        block.push(reals("PRESSURE", pressure));
        block.push(reals("SWAT", sats().map(|(swat, _)| swat)));
        block.push(reals("SGAS", sats().map(|(_, sgas)| sgas)));
    } else {
        block.push(reals("CONDEPTH", depth));
        block.push(reals("CONPRES", pressure));
        block.push(reals("CONORAT", rates().map(|(oil, _, _)| oil)));
        block.push(reals("CONWRAT", rates().map(|(_, water, _)| water)));
        block.push(reals("CONGRAT", rates().map(|(_, _, gas)| gas)));
    }
    Ok(block)
}
