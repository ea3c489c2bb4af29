// src/simulation/engine.rs
use crate::core::constants::qcdl_constants::MAX_QUBITS;
use crate::core::{Outcome, QcdlError, QubitDefinition, Result, StateVector};
use crate::gates::Matrix2;
use crate::operations::Operation;
use num_complex::Complex64;
use num_traits::{One, Zero};
use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

/// What the caller should do after an operation has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Keep replaying.
    Continue,
    /// A `measure` was reached; replay stops here.
    Halt,
}

/// Owns the joint amplitude vector of one run and evolves it in place.
///
/// One engine is one run: exact mode uses a single engine, stochastic mode
/// clones a freshly initialized engine per trial so trials never share state.
#[derive(Debug, Clone)]
pub(crate) struct SimulationEngine {
    /// Maps qubit names to their position (0..n-1) in definition order.
    qubit_indices: HashMap<String, usize>,
    /// The `2^n` amplitudes; position `j` occupies bit `n-1-j` of an index.
    state: StateVector,
    num_qubits: usize,
    /// Squared norm of the initial product state. Gates preserve it; it may sit
    /// slightly off 1 when definitions are only normalized within tolerance.
    initial_norm_sqr: f64,
}

impl SimulationEngine {
    /// Builds the initial state as the Kronecker product of every qubit's
    /// `(alpha, beta)` pair, taken in definition order.
    pub(crate) fn init(qubits: &[QubitDefinition]) -> Result<Self> {
        if qubits.is_empty() {
            return Err(QcdlError::EmptyCircuit);
        }
        let num_qubits = qubits.len();
        if num_qubits > MAX_QUBITS {
            return Err(QcdlError::Simulation {
                message: format!("{} qubits exceeds the supported maximum of {}", num_qubits, MAX_QUBITS),
            });
        }
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| QcdlError::Simulation {
            message: "number of qubits too large, state vector dimension overflows usize".to_string(),
        })?;

        let mut qubit_indices = HashMap::with_capacity(num_qubits);
        let mut amplitudes: Vec<Complex64> = Vec::with_capacity(dim);
        amplitudes.push(Complex64::one());

        for (position, qubit) in qubits.iter().enumerate() {
            if qubit_indices.insert(qubit.name().to_string(), position).is_some() {
                return Err(QcdlError::Simulation {
                    message: format!("qubit '{}' defined twice", qubit.name()),
                });
            }
            // kron(state, [alpha, beta]): the new qubit becomes the least significant bit.
            let mut next = Vec::with_capacity(amplitudes.len() * 2);
            for a in &amplitudes {
                next.push(a * qubit.alpha());
                next.push(a * qubit.beta());
            }
            amplitudes = next;
        }

        let state = StateVector::new(amplitudes);
        let initial_norm_sqr = state.norm_sqr();
        Ok(Self {
            qubit_indices,
            state,
            num_qubits,
            initial_norm_sqr,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<()> {
        if state.dim() != self.state.dim() {
            Err(QcdlError::Simulation {
                message: format!(
                    "cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            })
        } else {
            self.state = state;
            Ok(())
        }
    }

    /// The current joint state.
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Squared norm the run started from.
    pub(crate) fn initial_norm_sqr(&self) -> f64 {
        self.initial_norm_sqr
    }

    /// Consumes the engine, yielding its state.
    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    /// Applies operations in order until the first `Measurement`.
    ///
    /// Returns `true` if replay stopped at a `Measurement`, `false` if the
    /// sequence ran out.
    pub(crate) fn run(&mut self, ops: &[Operation]) -> Result<bool> {
        for op in ops {
            if self.apply_operation(op)? == Step::Halt {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Applies a single operation to the state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<Step> {
        match op {
            Operation::Define { qubit, .. } => {
                // Already folded into the initial product state.
                self.get_qubit_index(qubit.name())?;
            }
            Operation::Unitary { gate, target, index } => {
                let target_idx = self.get_qubit_index(target)?;
                debug!(index, gate = gate.name(), target = %target, "apply unitary");
                self.apply_single_qubit_gate(target_idx, gate.matrix());
            }
            Operation::Controlled { gate, target, controllers, index } => {
                let target_idx = self.get_qubit_index(target)?;
                let mut control_mask = 0usize;
                for controller in controllers {
                    let control_idx = self.get_qubit_index(controller)?;
                    if control_idx == target_idx {
                        return Err(QcdlError::Simulation {
                            message: format!("qubit '{}' is both target and controller of {}", target, gate),
                        });
                    }
                    control_mask |= self.bit_mask(control_idx);
                }
                debug!(index, gate = gate.name(), target = %target, controllers = controllers.len(), "apply controlled");
                self.apply_controlled_gate(target_idx, control_mask, gate.matrix());
            }
            Operation::Measurement { index } => {
                debug!(index, "measurement reached");
                return Ok(Step::Halt);
            }
        }
        Ok(Step::Continue)
    }

    /// Helper to get a qubit's position, returning a specific error if not found.
    fn get_qubit_index(&self, name: &str) -> Result<usize> {
        self.qubit_indices.get(name).copied().ok_or_else(|| QcdlError::Simulation {
            message: format!("qubit '{}' not found in simulation context", name),
        })
    }

    /// Mask selecting the index bit that encodes qubit `position`.
    fn bit_mask(&self, position: usize) -> usize {
        1 << (self.num_qubits - 1 - position)
    }

    /// Applies a 2x2 matrix to qubit `target_idx` by visiting every index pair
    /// `(i0, i0 | mask)` whose target bit is clear in `i0`. `O(2^n)`, in place.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &Matrix2) {
        self.apply_pairs(target_idx, 0, matrix);
    }

    /// As [`apply_single_qubit_gate`](Self::apply_single_qubit_gate), restricted to
    /// pairs where every bit of `control_mask` is set. Other pairs are untouched,
    /// which leaves the controller qubits unchanged.
    fn apply_controlled_gate(&mut self, target_idx: usize, control_mask: usize, matrix: &Matrix2) {
        self.apply_pairs(target_idx, control_mask, matrix);
    }

    fn apply_pairs(&mut self, target_idx: usize, control_mask: usize, matrix: &Matrix2) {
        let k_mask = self.bit_mask(target_idx);
        let lower_mask = k_mask - 1; // bits below the target
        let half = self.state.dim() / 2;
        let vector = self.state.vector_mut();

        for i in 0..half {
            // Insert a 0 at the target position.
            let i0 = ((i & !lower_mask) << 1) | (i & lower_mask);
            if i0 & control_mask != control_mask {
                continue;
            }
            let i1 = i0 | k_mask;

            let psi_0 = vector[i0];
            let psi_1 = vector[i1];
            vector[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            vector[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Exact outcome probabilities `|a_i|^2`.
    pub(crate) fn probabilities(&self) -> Vec<f64> {
        self.state.probabilities()
    }

    /// Draws one basis outcome from the distribution `{|a_i|^2}`.
    ///
    /// Does not collapse the state; a run ends after its single sample.
    pub(crate) fn sample<R: Rng>(&self, rng: &mut R) -> Outcome {
        let probabilities = self.probabilities();
        let total: f64 = probabilities.iter().sum();
        let p_sample: f64 = rng.random::<f64>() * total;

        let mut cumulative = 0.0;
        // Fallback for p_sample landing on `total` through rounding: the last
        // outcome with non-zero weight.
        let mut chosen = probabilities.iter().rposition(|p| !p.is_zero()).unwrap_or(0);
        for (index, p) in probabilities.iter().enumerate() {
            cumulative += p;
            if p_sample < cumulative {
                chosen = index;
                break;
            }
        }
        Outcome::from_index(chosen, self.num_qubits)
    }
}
