//! Statement grammar.
//!
//! ```text
//!   statement   := definition | 'measure' | gate_call
//!   definition  := 'def' WS IDENT [ ':' REAL ',' REAL ]
//!   gate_call   := GATE '(' IDENT ')'
//!                | GATE '(' IDENT ':' IDENT (',' IDENT)* ')'
//!   IDENT       := letter (letter | digit | '_')*
//! ```
//!
//! Parsing here is purely syntactic. Gate-name membership is checked because
//! the two call forms select different name sets; qubit cross-references are
//! checked by the circuit builder.

use super::lexer::Statement;
use crate::core::{QcdlError, QubitDefinition, Result};
use crate::gates::{ControlledGate, UnitaryGate};
use crate::operations::Operation;
use num_complex::Complex64;

/// Parses one statement into an operation.
pub fn parse_statement(statement: &Statement) -> Result<Operation> {
    let text = statement.text.as_str();
    let index = statement.index;

    if text == "measure" {
        return Ok(Operation::Measurement { index });
    }
    if let Some(rest) = text.strip_prefix("def") {
        if rest.starts_with(char::is_whitespace) {
            return parse_definition(rest, statement);
        }
    }
    parse_gate_call(statement)
}

fn syntax_error(statement: &Statement) -> QcdlError {
    QcdlError::Syntax { statement: statement.text.clone(), index: statement.index }
}

/// Whether `s` is a letter followed by word characters.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

fn parse_definition(rest: &str, statement: &Statement) -> Result<Operation> {
    let index = statement.index;
    let (name, amplitudes) = match rest.split_once(':') {
        Some((name, amplitudes)) => (name.trim(), Some(amplitudes)),
        None => (rest.trim(), None),
    };
    if !is_identifier(name) {
        return Err(syntax_error(statement));
    }

    let qubit = match amplitudes {
        None => QubitDefinition::zero(name),
        Some(pair) => {
            let parts: Vec<&str> = pair.split(',').map(str::trim).collect();
            if parts.len() != 2 {
                return Err(syntax_error(statement));
            }
            let alpha = parse_real(parts[0], index)?;
            let beta = parse_real(parts[1], index)?;
            QubitDefinition::new(name, Complex64::new(alpha, 0.0), Complex64::new(beta, 0.0), index)?
        }
    };
    Ok(Operation::Define { qubit, index })
}

/// Parses a signed decimal literal such as `1`, `-0.5`, `.707` or `7.07e-1`.
fn parse_real(literal: &str, index: usize) -> Result<f64> {
    let invalid = || QcdlError::InvalidAmplitude {
        index,
        message: format!("'{}' is not a real number", literal),
    };
    if literal.is_empty()
        || !literal.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        || !literal.chars().any(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    literal.parse::<f64>().map_err(|_| invalid())
}

fn parse_gate_call(statement: &Statement) -> Result<Operation> {
    let index = statement.index;
    let text = statement.text.as_str();

    let (gate_name, inner) = text
        .split_once('(')
        .and_then(|(gate, rest)| rest.strip_suffix(')').map(|inner| (gate.trim(), inner)))
        .ok_or_else(|| syntax_error(statement))?;
    if !is_identifier(gate_name) || inner.contains('(') || inner.contains(')') {
        return Err(syntax_error(statement));
    }

    match inner.split_once(':') {
        None => {
            let target = inner.trim();
            if !is_identifier(target) {
                return Err(syntax_error(statement));
            }
            let gate = UnitaryGate::from_name(gate_name).ok_or_else(|| QcdlError::UnknownGate {
                gate: gate_name.to_string(),
                statement: text.to_string(),
                index,
            })?;
            Ok(Operation::Unitary { gate, target: target.to_string(), index })
        }
        Some((target, controller_list)) => {
            let target = target.trim();
            let controllers: Vec<String> = controller_list.split(',').map(|c| c.trim().to_string()).collect();
            if !is_identifier(target) || !controllers.iter().all(|c| is_identifier(c)) {
                return Err(syntax_error(statement));
            }
            let gate = ControlledGate::from_name(gate_name).ok_or_else(|| QcdlError::UnknownGate {
                gate: gate_name.to_string(),
                statement: text.to_string(),
                index,
            })?;
            Ok(Operation::Controlled { gate, target: target.to_string(), controllers, index })
        }
    }
}
