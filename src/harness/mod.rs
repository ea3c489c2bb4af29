// src/harness/mod.rs

//! Conformance checks for annotated QCDL programs.
//!
//! A program carrying a `?` annotation is compiled, run in exact mode, and its
//! outcome percentages are compared with the annotation. Outcomes at or below
//! [`HarnessConfig::min_percentage`] are dropped from both sides, the remaining
//! outcome sets must be identical, and every shared outcome must agree within a
//! relative tolerance.

use crate::circuits::Circuit;
use crate::compiler::compile;
use crate::core::constants::qcdl_constants::{DEFAULT_RELATIVE_TOLERANCE, MIN_REPORTED_PERCENTAGE};
use crate::core::{Outcome, QcdlError};
use crate::simulation::Simulator;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Failures that prevent a program from being checked at all.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("no expected result found; expected a line starting with '?'")]
    MissingExpectation,

    #[error(transparent)]
    Qcdl(#[from] QcdlError),

    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Comparison settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarnessConfig {
    /// Allowed `|actual - expected| / |expected|`.
    ///
    /// Default: 0.05
    pub relative_tolerance: f64,
    /// Outcomes with a percentage at or below this value are ignored.
    ///
    /// Default: 1e-6
    pub min_percentage: f64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            min_percentage: MIN_REPORTED_PERCENTAGE,
        }
    }
}

impl HarnessConfig {
    pub fn with_relative_tolerance(mut self, tolerance: f64) -> Self {
        self.relative_tolerance = tolerance;
        self
    }

    fn agrees(&self, actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= self.relative_tolerance * expected.abs()
    }
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeDiff {
    pub outcome: Outcome,
    /// Annotated percentage, `None` if the annotation omits the outcome.
    pub expected: Option<f64>,
    /// Simulated percentage, `None` if the outcome was filtered out or never occurs.
    pub actual: Option<f64>,
    pub within_tolerance: bool,
}

/// Result of checking one program.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformanceReport {
    rows: Vec<OutcomeDiff>,
}

impl ConformanceReport {
    /// Whether the outcome sets match and every shared outcome agrees.
    pub fn passed(&self) -> bool {
        self.rows.iter().all(|row| row.within_tolerance)
    }

    /// Every outcome present on either side, in outcome order.
    pub fn rows(&self) -> &[OutcomeDiff] {
        &self.rows
    }

    /// Rows that caused the check to fail.
    pub fn mismatches(&self) -> impl Iterator<Item = &OutcomeDiff> {
        self.rows.iter().filter(|row| !row.within_tolerance)
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(43))?;
        for row in &self.rows {
            let expected = row.expected.unwrap_or(0.0);
            let actual = row.actual.unwrap_or(0.0);
            write!(f, "{} | Expected: {:.3} | Actual: {:.3}", row.outcome, expected, actual)?;
            if !row.within_tolerance {
                write!(f, " (Diff: {:.3})", (expected - actual).abs())?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", "-".repeat(43))
    }
}

/// Compares the exact-mode distribution of `circuit` with its annotation.
pub fn check_circuit(circuit: &Circuit, config: &HarnessConfig) -> Result<ConformanceReport, HarnessError> {
    let expected = circuit.expected_result().ok_or(HarnessError::MissingExpectation)?;
    let result = Simulator::new().run_exact(circuit)?;

    let actual: BTreeMap<Outcome, f64> = result
        .percentages()
        .into_iter()
        .filter(|(_, p)| *p > config.min_percentage)
        .collect();
    let expected: BTreeMap<&Outcome, f64> = expected
        .iter()
        .filter(|(_, p)| *p > config.min_percentage)
        .collect();

    let outcomes: BTreeSet<&Outcome> = actual.keys().chain(expected.keys().copied()).collect();
    let rows = outcomes
        .into_iter()
        .map(|outcome| {
            let expected = expected.get(outcome).copied();
            let actual = actual.get(outcome).copied();
            let within_tolerance = match (actual, expected) {
                (Some(a), Some(e)) => config.agrees(a, e),
                _ => false,
            };
            OutcomeDiff { outcome: outcome.clone(), expected, actual, within_tolerance }
        })
        .collect();

    let report = ConformanceReport { rows };
    debug!(passed = report.passed(), rows = report.rows.len(), "conformance check");
    Ok(report)
}

/// Compiles `source` and checks it.
pub fn check_source(source: &str, config: &HarnessConfig) -> Result<ConformanceReport, HarnessError> {
    let circuit = compile(source)?;
    check_circuit(&circuit, config)
}

/// Reads, compiles and checks the program at `path`.
pub fn check_file(path: impl AsRef<Path>, config: &HarnessConfig) -> Result<ConformanceReport, HarnessError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| HarnessError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let report = check_source(&source, config)?;
    info!(file = %path.display(), passed = report.passed(), "checked");
    Ok(report)
}

/// Expands `paths` into the `.qcdl` files to check: directories contribute their
/// `*.qcdl` entries (non-recursive, sorted), files are taken as given.
pub fn collect_programs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>, HarnessError> {
    let mut programs = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if !path.is_dir() {
            programs.push(path.to_path_buf());
            continue;
        }
        let io_err = |source| HarnessError::Io { path: path.to_path_buf(), source };
        let mut found = Vec::new();
        for entry in std::fs::read_dir(path).map_err(io_err)? {
            let entry_path = entry.map_err(io_err)?.path();
            if entry_path.extension().is_some_and(|ext| ext == "qcdl") {
                found.push(entry_path);
            }
        }
        found.sort();
        programs.extend(found);
    }
    Ok(programs)
}

/// Pass/fail tally over several programs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
}

impl Summary {
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        }
    }

    pub fn failed(&self) -> usize {
        self.total - self.passed
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test Summary:")?;
        writeln!(f, "{}", "-".repeat(20))?;
        writeln!(f, "{:<12} {:>4}", "Total Tests:", self.total)?;
        writeln!(f, "{:<12} {:>4}", "Passed:", self.passed)?;
        writeln!(f, "{:<12} {:>4}", "Failed:", self.failed())?;
        write!(f, "{}", "-".repeat(20))
    }
}
