// src/simulation/aggregator.rs

//! Stochastic mode: many independent single-sample runs of one circuit.

use super::config::SimulationConfig;
use super::engine::SimulationEngine;
use super::results::SampledResult;
use crate::circuits::Circuit;
use crate::core::{Outcome, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

type Counts = BTreeMap<Outcome, usize>;

/// Derives the seed of trial `trial` from the base seed (splitmix64 finalizer).
///
/// Every trial gets an independent stream that depends only on `(base, trial)`,
/// so the outcome of a run does not depend on how trials are scheduled.
pub(crate) fn trial_seed(base: u64, trial: u64) -> u64 {
    let mut z = base.wrapping_add(trial.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Runs a circuit `shots` times and tallies the sampled outcomes.
pub struct Aggregator<'a> {
    circuit: &'a Circuit,
    config: SimulationConfig,
}

impl<'a> Aggregator<'a> {
    pub fn new(circuit: &'a Circuit, config: SimulationConfig) -> Self {
        Self { circuit, config }
    }

    /// Executes every trial and returns the per-outcome counts.
    ///
    /// Each trial starts from a fresh copy of the initial product state, replays
    /// the operations up to the first `measure`, then draws one outcome.
    ///
    /// # Errors
    /// * `InvalidConfiguration` if `shots == 0`.
    /// * `EmptyCircuit` if the circuit defines no qubits.
    /// * `Simulation` if the engine hits an internal inconsistency in any trial.
    pub fn run(&self) -> Result<SampledResult> {
        self.config.validate()?;
        let template = SimulationEngine::init(self.circuit.qubits())?;
        if !self.circuit.has_measurement() {
            warn!("circuit has no measure; sampling the state after the last operation");
        }

        let shots = self.config.shots;
        let base_seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let parallel = self.config.runs_parallel();
        debug!(shots, base_seed, parallel, "starting trials");

        let trial = |k: usize| -> Result<Outcome> {
            let mut engine = template.clone();
            let mut rng = StdRng::seed_from_u64(trial_seed(base_seed, k as u64));
            engine.run(self.circuit.operations())?;
            Ok(engine.sample(&mut rng))
        };

        let counts = if parallel {
            (0..shots)
                .into_par_iter()
                .map(trial)
                .try_fold(Counts::new, |mut acc: Counts, outcome: Result<Outcome>| -> Result<Counts> {
                    *acc.entry(outcome?).or_insert(0) += 1;
                    Ok(acc)
                })
                .try_reduce(Counts::new, |a, b| Ok(merge_counts(a, b)))?
        } else {
            let mut acc = Counts::new();
            for k in 0..shots {
                *acc.entry(trial(k)?).or_insert(0) += 1;
            }
            acc
        };

        info!(shots, distinct_outcomes = counts.len(), "stochastic run complete");
        Ok(SampledResult::new(self.circuit.num_qubits(), shots, counts))
    }
}

fn merge_counts(mut into: Counts, from: Counts) -> Counts {
    for (outcome, count) in from {
        *into.entry(outcome).or_insert(0) += count;
    }
    into
}
