// src/compiler/mod.rs

//! Compiles QCDL source text into a [`Circuit`].
//!
//! The pipeline is lexer (statement splitting and annotation extraction),
//! then parser (statement grammar), then the circuit builder, which keeps the
//! qubit registry and rejects duplicate definitions and references to
//! undefined qubits. The first error aborts compilation.

pub mod lexer;
pub mod parser;

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::Result;
use tracing::{debug, info};

pub use lexer::{Statement, SplitSource};

/// Stateful QCDL compiler. Each instance compiles one source.
#[derive(Default)]
pub struct Compiler {
    builder: CircuitBuilder,
}

impl Compiler {
    /// Creates a compiler with an empty qubit registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `source`, consuming the compiler.
    ///
    /// # Returns
    /// * `Ok(Circuit)` holding the qubit registry, the operation sequence and the
    ///   optional expected-result annotation.
    /// * `Err(QcdlError)` for the first lexical, syntactic or cross-reference error.
    pub fn compile(mut self, source: &str) -> Result<Circuit> {
        let SplitSource { statements, expected } = lexer::split(source)?;
        if let Some(expected) = expected {
            self.builder = self.builder.with_expected(expected);
        }

        for statement in &statements {
            let op = parser::parse_statement(statement)?;
            debug!(index = statement.index, op = %op, "compiled statement");
            self.builder = self.builder.add_op(op).map_err(|e| e.with_statement(&statement.text))?;
        }

        let circuit = self.builder.build();
        info!(
            qubits = circuit.num_qubits(),
            operations = circuit.len(),
            annotated = circuit.expected_result().is_some(),
            "compilation successful"
        );
        Ok(circuit)
    }
}

/// Compiles `source` with a fresh [`Compiler`].
pub fn compile(source: &str) -> Result<Circuit> {
    Compiler::new().compile(source)
}
