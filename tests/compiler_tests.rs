// tests/compiler_tests.rs

use qcdl::{ControlledGate, Operation, Outcome, QcdlError, UnitaryGate, compile};

#[test]
fn test_full_program_compiles_in_order() -> Result<(), QcdlError> {
    let source = "\
# a commented program
? [0,0]: 50; [1,1]: 50
def q0;
def q1: 1, 0;
H(q0); CX(q1: q0);
measure
";
    let circuit = compile(source)?;
    assert_eq!(circuit.qubit_names(), vec!["q0", "q1"]);
    assert_eq!(circuit.qubit_index("q1"), Some(1));

    let ops = circuit.operations();
    assert_eq!(ops.len(), 5);
    assert_eq!(
        ops[2],
        Operation::Unitary { gate: UnitaryGate::H, target: "q0".to_string(), index: 3 }
    );
    assert_eq!(
        ops[3],
        Operation::Controlled {
            gate: ControlledGate::CX,
            target: "q1".to_string(),
            controllers: vec!["q0".to_string()],
            index: 4,
        }
    );
    assert!(ops[4].is_measurement());

    let expected = circuit.expected_result().expect("annotation");
    assert_eq!(expected.get(&Outcome::from_index(0b11, 2)), Some(50.0));
    Ok(())
}

#[test]
fn test_normalized_and_unnormalized_definitions() {
    assert!(compile("def q0: 0, 1").is_ok());
    assert!(compile("def q0: 0.70710678118654752, -0.70710678118654752").is_ok());
    let err = compile("def q0: 1, 1").unwrap_err();
    assert!(matches!(err, QcdlError::InvalidAmplitude { index: 1, .. }), "{:?}", err);
}

#[test]
fn test_undefined_qubit_names_the_qubit() {
    let err = compile("X(q5)").unwrap_err();
    assert_eq!(
        err,
        QcdlError::UndefinedQubit {
            name: "q5".to_string(),
            gate: "X".to_string(),
            statement: "X(q5)".to_string(),
            index: 1,
        }
    );
    assert!(err.to_string().contains("q5"));
}

#[test]
fn test_use_before_definition_is_rejected() {
    let err = compile("def a; CX(a: b); def b").unwrap_err();
    assert!(matches!(err, QcdlError::UndefinedQubit { ref name, index: 2, .. } if name == "b"));
}

#[test]
fn test_duplicate_definition() {
    let err = compile("def q; def q").unwrap_err();
    assert_eq!(
        err,
        QcdlError::DuplicateDefinition { name: "q".to_string(), statement: "def q".to_string(), index: 2 }
    );
    assert!(err.to_string().contains("'def q'"));
}

#[test]
fn test_controller_equal_to_target_is_rejected() {
    let err = compile("def a; def b; CZ(a: b, a)").unwrap_err();
    assert!(matches!(err, QcdlError::DuplicateController { .. }));
    let err = compile("def a; def b; def c; CZ(a: b, b)").unwrap_err();
    assert!(matches!(err, QcdlError::DuplicateController { .. }));
}

#[test]
fn test_unknown_gates() {
    for source in ["def q; SWAP(q)", "def q; CX(q)", "def a; def b; H(a: b)"] {
        let err = compile(source).unwrap_err();
        assert!(matches!(err, QcdlError::UnknownGate { .. }), "{} gave {:?}", source, err);
        assert!(err.is_compile_error());
    }
}

#[test]
fn test_syntax_errors_report_statement_text() {
    let err = compile("def q;\nH q").unwrap_err();
    assert_eq!(err, QcdlError::Syntax { statement: "H q".to_string(), index: 2 });
    assert_eq!(err.statement_index(), Some(2));
    assert!(err.to_string().contains("H q"));
}

#[test]
fn test_annotation_errors() {
    let err = compile("? [0]: 100\n? [0]: 100\ndef q").unwrap_err();
    assert!(matches!(err, QcdlError::DuplicateAnnotation { line: 2 }));
    let err = compile("? [0,x]: 100\ndef q").unwrap_err();
    assert!(matches!(err, QcdlError::MalformedAnnotation { .. }));
}

#[test]
fn test_operations_after_measure_are_still_validated() {
    let err = compile("def q; measure; X(r)").unwrap_err();
    assert!(matches!(err, QcdlError::UndefinedQubit { index: 3, .. }));
}

#[test]
fn test_circuit_diagram() -> Result<(), QcdlError> {
    let circuit = compile("def q0; def q1; H(q0); CX(q1: q0); measure")?;
    let diagram = circuit.to_string();
    assert!(diagram.starts_with("qcdl::Circuit[3 operations on 2 qubits]"), "{}", diagram);
    assert!(diagram.contains('@'));
    assert!(diagram.contains('M'));
    Ok(())
}
