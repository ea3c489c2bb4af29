//! Property-based tests for qcdl using proptest
//!
//! Programs are generated as QCDL source text and pushed through the public
//! compile and simulate API.

use proptest::prelude::*;
use qcdl::{Outcome, SimulationConfig, Simulator, compile};

const UNITARY: [&str; 7] = ["I", "X", "Y", "Z", "H", "S", "T"];
const CONTROLLED: [&str; 6] = ["CX", "CY", "CZ", "CH", "CS", "CT"];
const QUBITS: [&str; 3] = ["a", "b", "c"];

/// Definitions of `a`, `b`, `c` as `cos(t)|0> + sin(t)|1>`.
fn definitions(angles: &[f64]) -> String {
    QUBITS
        .iter()
        .zip(angles)
        .map(|(name, t)| format!("def {}: {}, {};\n", name, t.cos(), t.sin()))
        .collect()
}

/// Gate calls from `(gate, target, control)` triples; gates past the unitary
/// set select a controlled gate.
fn gate_calls(ops: &[(usize, usize, usize)]) -> String {
    ops.iter()
        .map(|&(gate, target, control)| {
            if gate < UNITARY.len() {
                format!("{}({});\n", UNITARY[gate], QUBITS[target])
            } else {
                let control = if control == target { (target + 1) % QUBITS.len() } else { control };
                format!("{}({}: {});\n", CONTROLLED[gate - UNITARY.len()], QUBITS[target], QUBITS[control])
            }
        })
        .collect()
}

fn final_state(source: &str) -> Vec<num_complex::Complex64> {
    let circuit = compile(source).unwrap();
    Simulator::new().run_exact(&circuit).unwrap().state().vector().to_vec()
}

fn ops_strategy() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0usize..13, 0usize..3, 0usize..3), 0..12)
}

fn angles_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-3.2f64..3.2, 3)
}

proptest! {
    /// Property: P(00) of two fresh qubits is the product of their |alpha|^2
    #[test]
    fn initial_state_is_product(t0 in -3.2f64..3.2, t1 in -3.2f64..3.2) {
        let source = format!("def a: {}, {}; def b: {}, {}; measure", t0.cos(), t0.sin(), t1.cos(), t1.sin());
        let circuit = compile(&source).unwrap();
        let result = Simulator::new().run_exact(&circuit).unwrap();
        let p00 = result.probability(&Outcome::from_index(0, 2));
        let expected = t0.cos().powi(2) * t1.cos().powi(2);
        prop_assert!((p00 - expected).abs() < 1e-9, "P(00) = {} != {}", p00, expected);
    }

    /// Property: X applied twice is the identity
    #[test]
    fn x_is_an_involution(angles in angles_strategy(), ops in ops_strategy(), target in 0usize..3) {
        let prefix = format!("{}{}", definitions(&angles), gate_calls(&ops));
        let before = final_state(&prefix);
        let after = final_state(&format!("{}X({q}); X({q});", prefix, q = QUBITS[target]));
        for (x, y) in before.iter().zip(&after) {
            prop_assert!((x - y).norm() < 1e-9, "{} != {}", x, y);
        }
    }

    /// Property: H applied twice is the identity
    #[test]
    fn h_is_an_involution(angles in angles_strategy(), ops in ops_strategy(), target in 0usize..3) {
        let prefix = format!("{}{}", definitions(&angles), gate_calls(&ops));
        let before = final_state(&prefix);
        let after = final_state(&format!("{}H({q}); H({q});", prefix, q = QUBITS[target]));
        for (x, y) in before.iter().zip(&after) {
            prop_assert!((x - y).norm() < 1e-9, "{} != {}", x, y);
        }
    }

    /// Property: gates preserve the squared norm
    #[test]
    fn norm_is_preserved(angles in angles_strategy(), ops in ops_strategy()) {
        let state = final_state(&format!("{}{}measure", definitions(&angles), gate_calls(&ops)));
        let norm: f64 = state.iter().map(|c| c.norm_sqr()).sum();
        prop_assert!((norm - 1.0).abs() < 1e-9, "norm drifted to {}", norm);
    }

    /// Property: a controlled gate on a clear controller leaves the state alone
    #[test]
    fn clear_controller_is_identity(t in -3.2f64..3.2, gate in 0usize..6) {
        let base = format!("def c; def t: {}, {};", t.cos(), t.sin());
        let before = final_state(&base);
        let after = final_state(&format!("{} {}(t: c);", base, CONTROLLED[gate]));
        for (x, y) in before.iter().zip(&after) {
            prop_assert!((x - y).norm() < 1e-12);
        }
    }

    /// Property: sampled percentages sum to 100 for any shot count
    #[test]
    fn sampled_percentages_sum_to_100(ops in ops_strategy(), shots in 1usize..300, seed in any::<u64>()) {
        let source = format!("def a; def b; def c;\n{}measure", gate_calls(&ops));
        let circuit = compile(&source).unwrap();
        let config = SimulationConfig::deterministic(seed).with_shots(shots);
        let result = Simulator::with_config(config).sample(&circuit).unwrap();
        let total: f64 = result.percentages().values().sum();
        prop_assert!((total - 100.0).abs() < 1e-9, "percentages sum to {}", total);
        prop_assert_eq!(result.counts().values().sum::<usize>(), shots);
    }
}
