//! Locating the header and data files of a summary case on disk.
//!
//! A case `DIR/CASE` is stored as a header plus data:
//!
//! | Layout    | Header          | Unified data    | Per-step data              |
//! |-----------|-----------------|-----------------|----------------------------|
//! | binary    | `CASE.SMSPEC`   | `CASE.UNSMRY`   | `CASE.S0001`, `CASE.S0002` |
//! | formatted | `CASE.FSMSPEC`  | `CASE.FUNSMRY`  | `CASE.A0001`, `CASE.A0002` |

use std::path::{Path, PathBuf};

use strata_core::NotFound;
use strata_kw::Layout;
use tracing::debug;

use crate::error::SeriesError;

/// Extensions stripped from a case path before deriving file names.
const CASE_EXTENSIONS: &[&str] = &[
    "DATA", "SMSPEC", "FSMSPEC", "UNSMRY", "FUNSMRY", "EGRID", "FEGRID", "RFT", "FRFT",
];

/// Where a case's data records live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataFiles {
    /// All report steps in one file.
    Unified(PathBuf),
    /// One file per report step, in step order.
    PerStep(Vec<PathBuf>),
}

impl DataFiles {
    /// Every data file, in read order.
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Self::Unified(p) => std::slice::from_ref(p),
            Self::PerStep(ps) => ps,
        }
    }
}

/// The header and data files of one summary case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesFiles {
    /// The header (`SMSPEC`) file.
    pub header: PathBuf,
    /// The data files.
    pub data: DataFiles,
    /// Layout shared by header and data.
    pub layout: Layout,
}

fn case_base(case: &Path) -> PathBuf {
    match case.extension().and_then(|e| e.to_str()) {
        Some(ext) if CASE_EXTENSIONS.contains(&ext.to_ascii_uppercase().as_str()) => {
            case.with_extension("")
        }
        _ => case.to_path_buf(),
    }
}

fn with_ext(base: &Path, ext: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn header_ext(layout: Layout) -> &'static str {
    match layout {
        Layout::Binary => "SMSPEC",
        Layout::Formatted => "FSMSPEC",
    }
}

fn unified_ext(layout: Layout) -> &'static str {
    match layout {
        Layout::Binary => "UNSMRY",
        Layout::Formatted => "FUNSMRY",
    }
}

fn step_ext(layout: Layout, step: usize) -> String {
    let prefix = match layout {
        Layout::Binary => 'S',
        Layout::Formatted => 'A',
    };
    format!("{prefix}{step:04}")
}

impl SeriesFiles {
    /// Find the files of an existing case.
    ///
    /// `case` may name the case base (`DIR/CASE`) or any of its files
    /// (`DIR/CASE.DATA`, `DIR/CASE.SMSPEC`). A binary header is preferred
    /// over a formatted one. A unified data file wins over per-step files
    /// when both exist. Per-step files are taken from `0001` upward until
    /// the first gap.
    pub fn resolve(case: impl AsRef<Path>) -> Result<Self, SeriesError> {
        let base = case_base(case.as_ref());
        let (layout, header) = [Layout::Binary, Layout::Formatted]
            .into_iter()
            .map(|l| (l, with_ext(&base, header_ext(l))))
            .find(|(_, p)| p.is_file())
            .ok_or_else(|| NotFound::new(format!("summary header for {}", base.display())))?;

        let unified = with_ext(&base, unified_ext(layout));
        let data = if unified.is_file() {
            DataFiles::Unified(unified)
        } else {
            let steps = (1..)
                .map(|step| with_ext(&base, &step_ext(layout, step)))
                .take_while(|p| p.is_file())
                .collect();
            DataFiles::PerStep(steps)
        };
        debug!(
            header = %header.display(),
            ?layout,
            data_files = data.paths().len(),
            "resolved summary case"
        );
        Ok(Self {
            header,
            data,
            layout,
        })
    }

    /// Existing files of the same case, in either layout, that are not
    /// part of `self` and would shadow or extend it when the case is
    /// resolved again.
    pub fn stale_files(&self) -> Vec<PathBuf> {
        let base = case_base(&self.header);
        let ours = |p: &PathBuf| *p == self.header || self.data.paths().contains(p);
        let mut stale = Vec::new();
        for layout in [Layout::Binary, Layout::Formatted] {
            stale.push(with_ext(&base, header_ext(layout)));
            stale.push(with_ext(&base, unified_ext(layout)));
            stale.extend(
                (1..)
                    .map(|step| with_ext(&base, &step_ext(layout, step)))
                    .take_while(|p| p.is_file()),
            );
        }
        stale.retain(|p| !ours(p) && p.is_file());
        stale
    }

    /// The file names a case would be written to.
    ///
    /// `report_steps` is only used for the per-step layout.
    pub fn for_case(
        case: impl AsRef<Path>,
        layout: Layout,
        unified: bool,
        report_steps: usize,
    ) -> Self {
        let base = case_base(case.as_ref());
        let data = if unified {
            DataFiles::Unified(with_ext(&base, unified_ext(layout)))
        } else {
            DataFiles::PerStep(
                (1..=report_steps)
                    .map(|step| with_ext(&base, &step_ext(layout, step)))
                    .collect(),
            )
        };
        Self {
            header: with_ext(&base, header_ext(layout)),
            data,
            layout,
        }
    }
}
