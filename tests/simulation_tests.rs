// tests/simulation_tests.rs

use qcdl::{
    Outcome, QcdlError, SimulationConfig, Simulator, compile,
    simulation::{format_amplitude, format_trimmed},
};
use num_complex::Complex64;

const TEST_TOLERANCE: f64 = 1e-9;

fn outcome(bits: &[u8]) -> Outcome {
    Outcome::from_bits(bits.to_vec()).expect("binary outcome")
}

fn assert_probability(actual: f64, expected: f64, context: &str) {
    assert!(
        (actual - expected).abs() < TEST_TOLERANCE,
        "Probability mismatch - Actual: {}, Expected: {}, Context: {}",
        actual, expected, context
    );
}

#[test]
fn test_bell_pair_exact() -> Result<(), QcdlError> {
    let circuit = compile("def q0; def q1; H(q0); CX(q1:q0); measure")?;
    let result = Simulator::new().run_exact(&circuit)?;

    assert_probability(result.probability(&outcome(&[0, 0])), 0.5, "|00>");
    assert_probability(result.probability(&outcome(&[0, 1])), 0.0, "|01>");
    assert_probability(result.probability(&outcome(&[1, 0])), 0.0, "|10>");
    assert_probability(result.probability(&outcome(&[1, 1])), 0.5, "|11>");

    let text = result.to_string();
    assert!(text.contains("|00>\t| 50.0%"), "{}", text);
    assert!(text.contains("|11>\t| 50.0%"), "{}", text);
    Ok(())
}

#[test]
fn test_initial_product_state() -> Result<(), QcdlError> {
    // P(00) = |alpha_0|^2 * |alpha_1|^2
    let circuit = compile("def a: 0.6, 0.8; def b: 0.8, -0.6; measure")?;
    let result = Simulator::new().run_exact(&circuit)?;
    assert_probability(result.probability(&outcome(&[0, 0])), 0.36 * 0.64, "|00>");
    assert_probability(result.probability(&outcome(&[1, 1])), 0.64 * 0.36, "|11>");
    Ok(())
}

#[test]
fn test_first_defined_qubit_is_most_significant() -> Result<(), QcdlError> {
    let circuit = compile("def hi; def mid; def lo; X(lo); measure")?;
    let result = Simulator::new().run_exact(&circuit)?;
    assert_probability(result.probabilities()[1], 1.0, "X on the last-defined qubit sets the lowest bit");
    Ok(())
}

#[test]
fn test_y_gate_phases() -> Result<(), QcdlError> {
    // Y|0> = i|1>
    let circuit = compile("def q; Y(q); measure")?;
    let result = Simulator::new().run_exact(&circuit)?;
    let amplitude = result.state().vector()[1];
    assert!((amplitude - Complex64::new(0.0, 1.0)).norm() < TEST_TOLERANCE);
    assert!(result.to_string().contains("|1>: 0.0 + 1.0j"));
    Ok(())
}

#[test]
fn test_controlled_hadamard_and_t_gates() -> Result<(), QcdlError> {
    let circuit = compile("def c: 0, 1; def t; CH(t: c); measure")?;
    let result = Simulator::new().run_exact(&circuit)?;
    assert_probability(result.probability(&outcome(&[1, 0])), 0.5, "CH on |10>");
    assert_probability(result.probability(&outcome(&[1, 1])), 0.5, "CH on |10>");

    // CT and CS are phases only; the distribution of |+>|1> is unchanged.
    let circuit = compile("def t; def c: 0, 1; H(t); CT(t: c); CS(t: c); measure")?;
    let result = Simulator::new().run_exact(&circuit)?;
    assert_probability(result.probability(&outcome(&[0, 1])), 0.5, "phase on |01>");
    let phased = result.state().vector()[3];
    // T then S: e^{i 3pi/4} / sqrt(2)
    let expected = Complex64::from_polar(std::f64::consts::FRAC_1_SQRT_2, 3.0 * std::f64::consts::PI / 4.0);
    assert!((phased - expected).norm() < TEST_TOLERANCE, "got {}", phased);
    Ok(())
}

#[test]
fn test_controlled_gate_with_clear_controller_is_identity() -> Result<(), QcdlError> {
    let circuit = compile("def c; def t: 0.6, 0.8; CY(t: c); CZ(t: c); measure")?;
    let result = Simulator::new().run_exact(&circuit)?;
    let vector = result.state().vector();
    assert!((vector[0] - Complex64::new(0.6, 0.0)).norm() < TEST_TOLERANCE);
    assert!((vector[1] - Complex64::new(0.8, 0.0)).norm() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_empty_program_cannot_run() -> Result<(), QcdlError> {
    let circuit = compile("measure")?;
    assert_eq!(Simulator::new().run_exact(&circuit).unwrap_err(), QcdlError::EmptyCircuit);
    assert_eq!(Simulator::new().sample(&circuit).unwrap_err(), QcdlError::EmptyCircuit);
    Ok(())
}

#[test]
fn test_stochastic_bell_pair() -> Result<(), QcdlError> {
    let circuit = compile("def q0; def q1; H(q0); CX(q1:q0); measure")?;
    let config = SimulationConfig::deterministic(2024).with_shots(4000);
    let result = Simulator::with_config(config).sample(&circuit)?;

    assert_eq!(result.shots(), 4000);
    assert_eq!(result.num_qubits(), 2);
    assert_eq!(result.count(&outcome(&[0, 1])), 0);
    assert_eq!(result.count(&outcome(&[1, 0])), 0);
    let p00 = result.percentage(&outcome(&[0, 0]));
    assert!((45.0..55.0).contains(&p00), "|00> at {}%", p00);

    let total: f64 = result.percentages().values().sum();
    assert!((total - 100.0).abs() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_stochastic_runs_are_reproducible() -> Result<(), QcdlError> {
    let circuit = compile("def a; def b; def c; H(a); H(b); H(c); measure")?;
    let config = SimulationConfig::deterministic(7).with_shots(300);
    let first = Simulator::with_config(config.clone()).sample(&circuit)?;
    let second = Simulator::with_config(config.clone().with_parallel(false)).sample(&circuit)?;
    assert_eq!(first, second);

    let other_seed = Simulator::with_config(config.with_seed(8)).sample(&circuit)?;
    assert_ne!(first.counts(), other_seed.counts());
    Ok(())
}

#[test]
fn test_single_shot_is_one_hundred_percent() -> Result<(), QcdlError> {
    let circuit = compile("def q; H(q); measure")?;
    let result = Simulator::with_config(SimulationConfig::deterministic(1).with_shots(1)).sample(&circuit)?;
    assert_eq!(result.counts().len(), 1);
    assert_eq!(result.percentages().values().sum::<f64>(), 100.0);
    Ok(())
}

#[test]
fn test_result_formatting_helpers() {
    assert_eq!(format_trimmed(50.0), "50.0");
    assert_eq!(format_trimmed(14.6446609), "14.645");
    assert_eq!(format_amplitude(Complex64::new(0.5, -0.5)), "0.5 - 0.5j");
}
