//! The result series state machine.
//!
//! A series starts in [`SeriesState::Defining`], where variables are
//! registered. The first [`append_ministep`](ResultSeries::append_ministep)
//! seals the header; from then on only data can be added.

use indexmap::IndexMap;
use strata_core::{NotFound, ProtocolError, SlotHandle};
use tracing::debug;

use crate::config::{ReportStepRule, SeriesConfig};
use crate::descriptor::VariableDescriptor;
use crate::error::SeriesError;
use crate::time::TimeMap;

/// Lifecycle state of a [`ResultSeries`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesState {
    /// Variables may be registered; no data yet.
    Defining,
    /// The header is frozen; ministeps may be appended.
    Sealed,
}

/// A time-indexed table of summary variables.
///
/// Rows are ministeps (one per simulator timestep), columns are the
/// registered variables. Report steps group consecutive ministeps
/// according to the configured [`ReportStepRule`].
#[derive(Clone, Debug)]
pub struct ResultSeries {
    config: SeriesConfig,
    state: SeriesState,
    descriptors: Vec<VariableDescriptor>,
    keys: IndexMap<String, SlotHandle>,
    elapsed: Vec<f64>,
    rows: Vec<Vec<f32>>,
}

impl ResultSeries {
    /// An empty series in the defining state.
    pub fn new(config: SeriesConfig) -> Result<Self, SeriesError> {
        config.validate()?;
        Ok(Self {
            config,
            state: SeriesState::Defining,
            descriptors: Vec::new(),
            keys: IndexMap::new(),
            elapsed: Vec::new(),
            rows: Vec::new(),
        })
    }

    /// A sealed series assembled from persisted parts.
    pub(crate) fn from_parts(
        config: SeriesConfig,
        descriptors: Vec<VariableDescriptor>,
        elapsed: Vec<f64>,
        rows: Vec<Vec<f32>>,
    ) -> Result<Self, SeriesError> {
        let mut series = Self::new(config)?;
        for d in descriptors {
            series.register(d)?;
        }
        series.state = SeriesState::Sealed;
        series.elapsed = elapsed;
        series.rows = rows;
        Ok(series)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SeriesState {
        self.state
    }

    /// Configuration the series was created with.
    pub fn config(&self) -> &SeriesConfig {
        &self.config
    }

    /// Replace the report-step rule. Affects queries only.
    pub fn set_report_rule(&mut self, rule: ReportStepRule) -> Result<(), SeriesError> {
        rule.validate()?;
        self.config.report_rule = rule;
        Ok(())
    }

    // ── Defining ───────────────────────────────────────────────────

    /// Add a variable to the header.
    ///
    /// When two descriptors share a general key, lookups by key resolve
    /// to the first one registered.
    pub fn register(&mut self, descriptor: VariableDescriptor) -> Result<SlotHandle, SeriesError> {
        if self.state == SeriesState::Sealed {
            return Err(ProtocolError::RegisterAfterSeal {
                key: descriptor
                    .general_key(self.config.grid_dims)
                    .unwrap_or_else(|| descriptor.keyword().to_string()),
            }
            .into());
        }
        let slot = SlotHandle(self.descriptors.len());
        if let Some(key) = descriptor.general_key(self.config.grid_dims) {
            self.keys.entry(key).or_insert(slot);
        }
        self.descriptors.push(descriptor);
        Ok(slot)
    }

    // ── Sealed ─────────────────────────────────────────────────────

    /// Start a new ministep at `elapsed_days`, sealing the header if this
    /// is the first one.
    ///
    /// Every value starts at its descriptor's default; `TIME` variables
    /// are set to `elapsed_days`.
    pub fn append_ministep(&mut self, elapsed_days: f64) -> Result<usize, SeriesError> {
        if self.descriptors.is_empty() {
            return Err(ProtocolError::NoVariables.into());
        }
        let previous = self.elapsed.last().copied().unwrap_or(f64::NEG_INFINITY);
        if !elapsed_days.is_finite() || elapsed_days <= previous {
            return Err(ProtocolError::NonIncreasingTime {
                previous,
                found: elapsed_days,
            }
            .into());
        }
        if self.state == SeriesState::Defining {
            debug!(nvars = self.descriptors.len(), "sealed series header");
            self.state = SeriesState::Sealed;
        }
        let row = self
            .descriptors
            .iter()
            .map(|d| {
                if d.is_time() {
                    elapsed_days as f32
                } else {
                    d.initial_value()
                }
            })
            .collect();
        self.rows.push(row);
        self.elapsed.push(elapsed_days);
        Ok(self.rows.len() - 1)
    }

    /// Set a variable in the latest ministep.
    pub fn set(&mut self, slot: SlotHandle, value: f32) -> Result<(), SeriesError> {
        let nvars = self.descriptors.len();
        let row = self.rows.last_mut().ok_or(ProtocolError::NoMinistep)?;
        let cell = row
            .get_mut(slot.0)
            .ok_or_else(|| NotFound::new(format!("slot {slot} (series has {nvars})")))?;
        *cell = value;
        Ok(())
    }

    /// Set the variable with general key `key` in the latest ministep.
    pub fn set_by_key(&mut self, key: &str, value: f32) -> Result<(), SeriesError> {
        if self.rows.is_empty() {
            return Err(ProtocolError::NoMinistep.into());
        }
        let slot = self.slot(key)?;
        self.set(slot, value)
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Registered descriptors, in slot order.
    pub fn descriptors(&self) -> &[VariableDescriptor] {
        &self.descriptors
    }

    /// Number of registered variables.
    pub fn nvars(&self) -> usize {
        self.descriptors.len()
    }

    /// Descriptor of a slot.
    pub fn descriptor(&self, slot: SlotHandle) -> Option<&VariableDescriptor> {
        self.descriptors.get(slot.0)
    }

    /// Whether `key` names a registered variable.
    pub fn has_key(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// General keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Slot of the first variable with general key `key`.
    pub fn slot(&self, key: &str) -> Result<SlotHandle, SeriesError> {
        self.keys
            .get(key)
            .copied()
            .ok_or_else(|| NotFound::new(format!("summary key {key}")).into())
    }

    /// Number of ministeps.
    pub fn ministep_count(&self) -> usize {
        self.rows.len()
    }

    /// Elapsed days of every ministep.
    pub fn elapsed_days(&self) -> &[f64] {
        &self.elapsed
    }

    /// Values of one ministep, in slot order.
    pub fn ministep(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Index of the first ministep of each report step.
    pub fn report_starts(&self) -> Vec<usize> {
        let n = self.rows.len();
        match &self.config.report_rule {
            ReportStepRule::EveryMinistep => (0..n).collect(),
            ReportStepRule::OnChange(slot) => (0..n)
                .filter(|&m| {
                    m == 0 || self.rows[m].get(slot.0) != self.rows[m - 1].get(slot.0)
                })
                .collect(),
            ReportStepRule::Explicit(starts) => {
                starts.iter().copied().filter(|&s| s < n).collect()
            }
        }
    }

    /// Index of the last ministep of each report step.
    pub fn report_ends(&self) -> Vec<usize> {
        let starts = self.report_starts();
        let mut ends: Vec<usize> = starts.iter().skip(1).map(|&s| s - 1).collect();
        if !starts.is_empty() {
            ends.push(self.rows.len() - 1);
        }
        ends
    }

    /// Number of report steps.
    pub fn report_step_count(&self) -> usize {
        self.report_starts().len()
    }

    /// Value of `key` at the last ministep of report step `report`.
    ///
    /// `Ok(None)` when the series has not reached that report step.
    pub fn value_at_report(&self, key: &str, report: usize) -> Result<Option<f32>, SeriesError> {
        let slot = self.slot(key)?;
        Ok(self
            .report_ends()
            .get(report)
            .and_then(|&m| self.rows[m].get(slot.0).copied()))
    }

    /// Every ministep value of `key`.
    pub fn values(&self, key: &str) -> Result<Vec<f32>, SeriesError> {
        let slot = self.slot(key)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| row.get(slot.0).copied())
            .collect())
    }

    /// Calendar times of the report steps: the start date, then the end of
    /// each report step.
    pub fn time_map(&self) -> Result<TimeMap, SeriesError> {
        let ends: Vec<f64> = self.report_ends().iter().map(|&m| self.elapsed[m]).collect();
        TimeMap::from_elapsed(self.config.start_date, &ends)
    }
}
