// src/core/qubit.rs

use super::error::Result;
use crate::validation::check_amplitude_pair;
use num_complex::Complex64;
use std::fmt;

/// A qubit as declared by a `def` statement.
///
/// The record is fixed at compile time. Its position in the definition order
/// fixes the qubit's bit in the joint state (first-defined is the most
/// significant bit); the evolving amplitudes live only in the engine's
/// state vector.
#[derive(Debug, Clone, PartialEq)]
pub struct QubitDefinition {
    name: String,
    alpha: Complex64,
    beta: Complex64,
}

impl QubitDefinition {
    /// Creates a definition after checking `|alpha|^2 + |beta|^2 == 1`.
    ///
    /// `index` is the statement index reported if the check fails.
    pub fn new(name: impl Into<String>, alpha: Complex64, beta: Complex64, index: usize) -> Result<Self> {
        check_amplitude_pair(alpha, beta, index)?;
        Ok(Self { name: name.into(), alpha, beta })
    }

    /// A qubit initialized to `|0>`.
    pub fn zero(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alpha: Complex64::new(1.0, 0.0),
            beta: Complex64::new(0.0, 0.0),
        }
    }

    /// The qubit's identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Amplitude of `|0>`.
    pub fn alpha(&self) -> Complex64 {
        self.alpha
    }

    /// Amplitude of `|1>`.
    pub fn beta(&self) -> Complex64 {
        self.beta
    }
}

impl fmt::Display for QubitDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(α={:.3}, β={:.3})", self.name, self.alpha, self.beta)
    }
}
