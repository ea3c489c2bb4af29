// src/simulation/mod.rs

//! Executes compiled `qcdl::circuits::Circuit`s on a dense state vector.
//! This module contains the `Simulator` entry point, the internal `SimulationEngine`
//! that owns and evolves one run's amplitudes, and the `Aggregator` that
//! repeats stochastic runs.

pub mod aggregator;
mod config;
pub(crate) mod engine;
mod results;

pub use aggregator::Aggregator;
pub use config::SimulationConfig;
pub use results::{ExactResult, SampledResult, format_amplitude, format_trimmed};

use crate::circuits::Circuit;
use crate::core::{Outcome, Result};
use crate::validation::check_norm_preserved;
use engine::SimulationEngine;
use rand::Rng;
use tracing::{info, warn};

/// The main simulator orchestrating the execution of circuits.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator whose stochastic runs follow `config`.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Exact mode: replays the circuit once up to the first `measure` and
    /// reports the resulting state and its exact distribution. The state is
    /// not collapsed.
    ///
    /// # Returns
    /// * `Ok(ExactResult)` with the final amplitudes.
    /// * `Err(QcdlError::EmptyCircuit)` if no qubit was defined.
    /// * `Err(QcdlError::Simulation)` on an internal inconsistency, including a
    ///   final state whose norm drifted from the initial product state's.
    pub fn run_exact(&self, circuit: &Circuit) -> Result<ExactResult> {
        let mut engine = SimulationEngine::init(circuit.qubits())?;
        let measured = engine.run(circuit.operations())?;
        if !measured {
            warn!("circuit has no measure; reporting the state after the last operation");
        }
        check_norm_preserved(engine.state(), engine.initial_norm_sqr(), None)?;
        info!(qubits = circuit.num_qubits(), measured, "exact run complete");

        let names = circuit.qubit_names().into_iter().map(str::to_string).collect();
        Ok(ExactResult::new(names, engine.into_state(), measured))
    }

    /// A single stochastic run drawing from the caller's random source.
    pub fn run_once<R: Rng>(&self, circuit: &Circuit, rng: &mut R) -> Result<Outcome> {
        let mut engine = SimulationEngine::init(circuit.qubits())?;
        engine.run(circuit.operations())?;
        Ok(engine.sample(rng))
    }

    /// Stochastic mode: `config.shots` independent runs via the [`Aggregator`].
    pub fn sample(&self, circuit: &Circuit) -> Result<SampledResult> {
        Aggregator::new(circuit, self.config.clone()).run()
    }
}
