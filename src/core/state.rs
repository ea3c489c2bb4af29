// src/core/state.rs

use num_complex::Complex64;
use std::fmt;

/// The joint amplitude vector of an `n`-qubit register.
///
/// Index bit `j`, counted from the most significant bit, holds the
/// computational-basis value of the `j`-th defined qubit. The vector always
/// has length `2^n`.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Wraps an amplitude vector. The caller guarantees the length is a power of two.
    pub(crate) fn new(amplitudes: Vec<Complex64>) -> Self {
        debug_assert!(amplitudes.len().is_power_of_two());
        Self { amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Mutable access for in-place gate application.
    pub(crate) fn vector_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Number of amplitudes (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits `n` encoded by the vector.
    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// Squared 2-norm, `Σ |a_i|^2`.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Outcome probabilities `|a_i|^2`, indexed by basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

/// A computational-basis outcome: one bit per qubit, in definition order.
///
/// Ordering is lexicographic over the bit tuple, which for outcomes of equal
/// width is the same as numeric order of the basis index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Outcome {
    bits: Vec<u8>,
}

impl Outcome {
    /// Builds the outcome for basis index `index` of a `width`-qubit register.
    pub fn from_index(index: usize, width: usize) -> Self {
        let bits = (0..width)
            .map(|j| ((index >> (width - 1 - j)) & 1) as u8)
            .collect();
        Self { bits }
    }

    /// Builds an outcome from explicit bits. Returns `None` if any entry is not 0 or 1.
    pub fn from_bits(bits: Vec<u8>) -> Option<Self> {
        if bits.iter().all(|b| *b <= 1) {
            Some(Self { bits })
        } else {
            None
        }
    }

    /// The bit tuple, most significant (first-defined qubit) first.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Number of qubits in the outcome.
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// The basis index this outcome denotes.
    pub fn index(&self) -> usize {
        self.bits.iter().fold(0, |acc, b| (acc << 1) | *b as usize)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for b in &self.bits {
            write!(f, "{}", b)?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_index_round_trip() {
        let outcome = Outcome::from_index(5, 3);
        assert_eq!(outcome.bits(), &[1, 0, 1]);
        assert_eq!(outcome.index(), 5);
        assert_eq!(outcome.to_string(), "|101>");
    }

    #[test]
    fn test_outcome_order_matches_index_order() {
        let mut outcomes: Vec<Outcome> = [3usize, 0, 2, 1].iter().map(|i| Outcome::from_index(*i, 2)).collect();
        outcomes.sort();
        let indices: Vec<usize> = outcomes.iter().map(Outcome::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_from_bits_rejects_non_binary() {
        assert!(Outcome::from_bits(vec![0, 2]).is_none());
        assert!(Outcome::from_bits(vec![1, 0]).is_some());
    }

    #[test]
    fn test_state_vector_queries() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let state = StateVector::new(vec![
            Complex64::new(h, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, h),
        ]);
        assert_eq!(state.num_qubits(), 2);
        assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
        let probs = state.probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!((probs[3] - 0.5).abs() < 1e-12);
    }
}
