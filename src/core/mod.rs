// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod qubit;
pub mod state;

pub use error::{QcdlError, Result};
pub use qubit::QubitDefinition;
pub use state::{Outcome, StateVector};

pub mod constants;
pub use constants::qcdl_constants::{FRAC_1_SQRT_2, NORM_TOLERANCE}; // Re-export
