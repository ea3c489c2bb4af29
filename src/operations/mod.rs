// src/operations/mod.rs

//! Defines the typed operations produced by the compiler.
//!
//! The set is closed: every consumer matches on all four variants, so a new
//! kind of operation shows up as a compile error wherever it is not handled.

use crate::core::QubitDefinition;
use crate::gates::{ControlledGate, UnitaryGate};
use std::fmt;

/// A compiled QCDL statement.
///
/// Every variant carries `index`, the 1-based statement index it was compiled
/// from, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Declares a qubit and its initial single-qubit state. Order of `Define`
    /// operations fixes bit positions; replay treats them as no-ops.
    Define {
        /// The declared qubit
        qubit: QubitDefinition,
        /// Statement index
        index: usize,
    },

    /// Applies a single-qubit gate to `target`.
    Unitary {
        /// Gate from the unitary name set
        gate: UnitaryGate,
        /// Target qubit name
        target: String,
        /// Statement index
        index: usize,
    },

    /// Applies the base matrix of `gate` to `target` on the subspace where every
    /// controller is 1.
    Controlled {
        /// Gate from the controlled name set
        gate: ControlledGate,
        /// Target qubit name
        target: String,
        /// Controller names; distinct, in source order, never containing `target`
        controllers: Vec<String>,
        /// Statement index
        index: usize,
    },

    /// Ends replay. In exact mode it has no effect on the state; in stochastic
    /// mode a single outcome is sampled here.
    Measurement {
        /// Statement index
        index: usize,
    },
}

impl Operation {
    /// The statement index this operation was compiled from.
    pub fn index(&self) -> usize {
        match self {
            Operation::Define { index, .. }
            | Operation::Unitary { index, .. }
            | Operation::Controlled { index, .. }
            | Operation::Measurement { index } => *index,
        }
    }

    /// Whether this is the `measure` marker.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measurement { .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Define { qubit, .. } => {
                write!(f, "def {}: {}, {}", qubit.name(), qubit.alpha(), qubit.beta())
            }
            Operation::Unitary { gate, target, .. } => write!(f, "{}({})", gate, target),
            Operation::Controlled { gate, target, controllers, .. } => {
                write!(f, "{}({}: {})", gate, target, controllers.join(", "))
            }
            Operation::Measurement { .. } => write!(f, "measure"),
        }
    }
}
