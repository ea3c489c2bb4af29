// src/validation/mod.rs

//! Normalization checks for qubit definitions and norm-drift checks for joint state vectors.

use crate::core::constants::qcdl_constants::NORM_TOLERANCE;
use crate::core::{QcdlError, Result, StateVector};
use num_complex::Complex64;

/// Checks that a single-qubit amplitude pair satisfies `|alpha|^2 + |beta|^2 == 1`.
///
/// # Arguments
/// * `alpha`, `beta` - The amplitudes of `|0>` and `|1>`.
/// * `index` - Statement index reported on failure.
///
/// # Returns
/// * `Err(QcdlError::InvalidAmplitude)` if a component is not finite or the
///   squared norm deviates from 1 by more than 1e-9.
pub fn check_amplitude_pair(alpha: Complex64, beta: Complex64, index: usize) -> Result<()> {
    if !(alpha.is_finite() && beta.is_finite()) {
        return Err(QcdlError::InvalidAmplitude {
            index,
            message: format!("amplitudes ({}, {}) are not finite", alpha, beta),
        });
    }
    let norm_sq = alpha.norm_sqr() + beta.norm_sqr();
    if (norm_sq - 1.0).abs() > NORM_TOLERANCE {
        return Err(QcdlError::InvalidAmplitude {
            index,
            message: format!("|alpha|^2 + |beta|^2 = {} (must equal 1)", norm_sq),
        });
    }
    Ok(())
}

/// Checks that evolution kept the squared norm at `reference`, the squared
/// norm the state started from.
///
/// Accepted definitions may each sit up to 1e-9 away from unit norm, so their
/// product can start further from 1 than any single pair. Only the drift
/// introduced after initialization is bounded here.
///
/// # Returns
/// * `Err(QcdlError::Simulation)` if `|Σ|c_i|^2 - reference|` exceeds the tolerance (default 1e-9).
pub fn check_norm_preserved(state: &StateVector, reference: f64, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - reference).abs() > effective_tolerance {
        Err(QcdlError::Simulation {
            message: format!(
                "state vector norm drifted: Σ|c_i|^2 = {} but started at {} (deviation > {})",
                norm_sq, reference, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}
