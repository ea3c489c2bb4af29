// src/simulation/results.rs
use crate::core::constants::qcdl_constants::PRINT_CUTOFF;
use crate::core::{Outcome, StateVector};
use num_complex::Complex64;
use std::collections::BTreeMap;
use std::fmt;

/// Formats `value` with three decimals, then strips trailing zeros while
/// keeping at least one digit after the point (`50.000` -> `50.0`, `0.125` -> `0.125`).
pub fn format_trimmed(value: f64) -> String {
    let fixed = format!("{:.3}", value);
    let trimmed = fixed.trim_end_matches('0');
    let out = if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    };
    if out == "-0.0" { "0.0".to_string() } else { out }
}

/// Formats one amplitude for the final-state printout.
///
/// Both parts are always printed, with the sign of the imaginary part between
/// them: `0.5 - 0.5j`, `0.0 + 0.707j`, `-1.0 + 0.0j`. An imaginary part that
/// rounds to zero takes the `+` sign.
pub fn format_amplitude(amplitude: Complex64) -> String {
    let re = format_trimmed(amplitude.re);
    let im = format_trimmed(amplitude.im.abs());
    let sign = if amplitude.im < 0.0 && im != "0.0" { '-' } else { '+' };
    format!("{} {} {}j", re, sign, im)
}

/// Outcome of an exact-mode run: the state vector at the first `measure` (or at
/// the end of the program) and the exact distribution it implies.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactResult {
    qubit_names: Vec<String>,
    state: StateVector,
    measured: bool,
}

impl ExactResult {
    pub(crate) fn new(qubit_names: Vec<String>, state: StateVector, measured: bool) -> Self {
        Self { qubit_names, state, measured }
    }

    /// Qubit names in bit order, most significant first.
    pub fn qubit_names(&self) -> &[String] {
        &self.qubit_names
    }

    pub fn num_qubits(&self) -> usize {
        self.qubit_names.len()
    }

    /// The final state vector.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Whether replay stopped at a `measure` rather than running out of operations.
    pub fn measured(&self) -> bool {
        self.measured
    }

    /// Exact probability of every basis outcome, indexed by basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state.probabilities()
    }

    /// Probability of a single outcome. Outcomes of the wrong width have probability 0.
    pub fn probability(&self, outcome: &Outcome) -> f64 {
        if outcome.width() != self.num_qubits() {
            return 0.0;
        }
        self.state.vector()[outcome.index()].norm_sqr()
    }

    /// Every outcome mapped to its probability in percent, zero entries included.
    pub fn percentages(&self) -> BTreeMap<Outcome, f64> {
        let n = self.num_qubits();
        self.probabilities()
            .into_iter()
            .enumerate()
            .map(|(index, p)| (Outcome::from_index(index, n), p * 100.0))
            .collect()
    }
}

impl fmt::Display for ExactResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.num_qubits();
        let rule_width = n + 20;

        writeln!(f, "Final State Vector:")?;
        writeln!(f, "{}", "-".repeat(rule_width))?;
        for (index, amplitude) in self.state.vector().iter().enumerate() {
            if amplitude.norm() <= PRINT_CUTOFF {
                continue;
            }
            writeln!(f, "{}: {}", Outcome::from_index(index, n), format_amplitude(*amplitude))?;
        }
        writeln!(f, "{}", "-".repeat(rule_width))?;
        writeln!(f)?;

        writeln!(f, "Outcome Probabilities:")?;
        writeln!(f, "{}", "-".repeat(rule_width))?;
        for (index, p) in self.probabilities().iter().enumerate() {
            writeln!(f, "{}\t| {}%", Outcome::from_index(index, n), format_trimmed(p * 100.0))?;
        }
        write!(f, "{}", "-".repeat(rule_width))
    }
}

/// Outcome of a stochastic-mode run: per-outcome counts over `shots` trials.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledResult {
    num_qubits: usize,
    shots: usize,
    counts: BTreeMap<Outcome, usize>,
}

impl SampledResult {
    pub(crate) fn new(num_qubits: usize, shots: usize, counts: BTreeMap<Outcome, usize>) -> Self {
        Self { num_qubits, shots, counts }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of trials that were run.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Observed outcomes and how often each occurred. Unobserved outcomes are absent.
    pub fn counts(&self) -> &BTreeMap<Outcome, usize> {
        &self.counts
    }

    /// How often `outcome` was observed.
    pub fn count(&self, outcome: &Outcome) -> usize {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// `100 * count / shots` for one outcome.
    pub fn percentage(&self, outcome: &Outcome) -> f64 {
        100.0 * self.count(outcome) as f64 / self.shots as f64
    }

    /// Every observed outcome mapped to its share of the trials in percent.
    pub fn percentages(&self) -> BTreeMap<Outcome, f64> {
        self.counts
            .iter()
            .map(|(outcome, count)| (outcome.clone(), 100.0 * *count as f64 / self.shots as f64))
            .collect()
    }
}

impl fmt::Display for SampledResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[QCDL] Number of simulations: {}", self.shots)?;
        writeln!(f, "[QCDL] Qubits: {}", self.num_qubits)?;
        write!(f, "[QCDL] Results:")?;
        for (outcome, percentage) in self.percentages() {
            write!(f, "\n       {} : {:.3}%", outcome, percentage)?;
        }
        Ok(())
    }
}
