//! Error handling logic

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QcdlError>;

/// Failures raised while compiling or simulating a QCDL circuit.
///
/// Compiler variants carry the 1-based statement index assigned by the
/// statement splitter. That index counts `;`-separated statements, not
/// physical source lines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QcdlError {
    /// A statement matches neither the definition, measurement nor gate-call grammar.
    #[error("statement {index}: syntax error in '{statement}'")]
    Syntax {
        /// The trimmed statement text
        statement: String,
        /// Statement index
        index: usize,
    },

    /// A qubit name was defined twice.
    #[error("statement {index}: qubit '{name}' already defined in '{statement}'")]
    DuplicateDefinition {
        /// The repeated qubit name
        name: String,
        /// The offending statement
        statement: String,
        /// Statement index
        index: usize,
    },

    /// More than one `?` annotation line appeared in the source.
    #[error("line {line}: multiple expected-result annotations found")]
    DuplicateAnnotation {
        /// 1-based physical line of the second annotation
        line: usize,
    },

    /// An annotation clause is not of the form `[b,b,...]: percentage`.
    #[error("invalid expected result clause '{clause}'")]
    MalformedAnnotation {
        /// The offending clause
        clause: String,
    },

    /// An amplitude literal failed to parse, or the pair is not normalized.
    #[error("statement {index}: invalid amplitude: {message}")]
    InvalidAmplitude {
        /// Statement index
        index: usize,
        /// Failure detail
        message: String,
    },

    /// A gate references a qubit that has not been defined yet.
    #[error("statement {index}: qubit '{name}' is not defined for gate {gate} in '{statement}'")]
    UndefinedQubit {
        /// The undefined identifier
        name: String,
        /// The gate that referenced it
        gate: String,
        /// The offending statement
        statement: String,
        /// Statement index
        index: usize,
    },

    /// A gate call names a gate outside the unitary/controlled name sets.
    #[error("statement {index}: unknown gate '{gate}' in '{statement}'")]
    UnknownGate {
        /// The unrecognized gate name
        gate: String,
        /// The offending statement
        statement: String,
        /// Statement index
        index: usize,
    },

    /// A controlled gate lists the same qubit twice, or uses its target as a controller.
    #[error("statement {index}: qubit '{name}' appears more than once in gate {gate} in '{statement}'")]
    DuplicateController {
        /// The repeated identifier
        name: String,
        /// The gate being compiled
        gate: String,
        /// The offending statement
        statement: String,
        /// Statement index
        index: usize,
    },

    /// Simulation was requested for a circuit with no qubit definitions.
    #[error("no qubits defined in the circuit")]
    EmptyCircuit,

    /// A configuration value is out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Failure detail
        message: String,
    },

    /// Internal inconsistency between the compiled operations and the engine.
    #[error("simulation error: {message}")]
    Simulation {
        /// Failure detail
        message: String,
    },
}

impl QcdlError {
    /// Statement index attached to the error, if any.
    pub fn statement_index(&self) -> Option<usize> {
        match self {
            QcdlError::Syntax { index, .. }
            | QcdlError::DuplicateDefinition { index, .. }
            | QcdlError::InvalidAmplitude { index, .. }
            | QcdlError::UndefinedQubit { index, .. }
            | QcdlError::UnknownGate { index, .. }
            | QcdlError::DuplicateController { index, .. } => Some(*index),
            QcdlError::DuplicateAnnotation { .. }
            | QcdlError::MalformedAnnotation { .. }
            | QcdlError::EmptyCircuit
            | QcdlError::InvalidConfiguration { .. }
            | QcdlError::Simulation { .. } => None,
        }
    }

    /// Replaces the statement text carried by statement-level variants with
    /// `text`. Other variants are returned unchanged.
    pub fn with_statement(mut self, text: &str) -> Self {
        match &mut self {
            QcdlError::Syntax { statement, .. }
            | QcdlError::DuplicateDefinition { statement, .. }
            | QcdlError::UndefinedQubit { statement, .. }
            | QcdlError::UnknownGate { statement, .. }
            | QcdlError::DuplicateController { statement, .. } => *statement = text.to_string(),
            QcdlError::DuplicateAnnotation { .. }
            | QcdlError::MalformedAnnotation { .. }
            | QcdlError::InvalidAmplitude { .. }
            | QcdlError::EmptyCircuit
            | QcdlError::InvalidConfiguration { .. }
            | QcdlError::Simulation { .. } => {}
        }
        self
    }

    /// Whether the error was raised by the compiler rather than the engine.
    pub fn is_compile_error(&self) -> bool {
        !matches!(
            self,
            QcdlError::EmptyCircuit
                | QcdlError::InvalidConfiguration { .. }
                | QcdlError::Simulation { .. }
        )
    }
}
