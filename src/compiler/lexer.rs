//! Statement splitter for QCDL source text.
//!
//! Works line by line: blank lines and `#` comment lines are dropped, the single
//! `?` line (if any) is parsed as the expected-result annotation, and what
//! remains is joined and split on `;` into trimmed, non-empty statements.

use crate::circuits::ExpectedResult;
use crate::core::{Outcome, QcdlError, Result};

/// One `;`-delimited statement with its 1-based sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Sequence number used in diagnostics; not a physical line number.
    pub index: usize,
    /// The trimmed statement text.
    pub text: String,
}

/// Output of [`split`].
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSource {
    /// Statements in source order.
    pub statements: Vec<Statement>,
    /// The parsed annotation, if the source carried one.
    pub expected: Option<ExpectedResult>,
}

/// Splits raw source into statements and extracts the optional annotation.
///
/// # Errors
/// * `DuplicateAnnotation` on a second `?` line.
/// * `MalformedAnnotation` if a clause of the annotation does not parse or
///   repeats an outcome.
pub fn split(source: &str) -> Result<SplitSource> {
    let mut expected: Option<ExpectedResult> = None;
    let mut kept: Vec<&str> = Vec::new();

    for (line_no, line) in source.lines().enumerate() {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }
        if let Some(body) = stripped.strip_prefix('?') {
            if expected.is_some() {
                return Err(QcdlError::DuplicateAnnotation { line: line_no + 1 });
            }
            expected = Some(parse_annotation(body.trim())?);
            continue;
        }
        kept.push(line);
    }

    let joined = kept.join("\n");
    let statements = joined
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, text)| Statement { index: i + 1, text: text.to_string() })
        .collect();

    Ok(SplitSource { statements, expected })
}

/// Parses the body of an annotation line: `[b,b,...]: pct ; [b,...]: pct ; ...`.
///
/// A clause that does not parse, or that repeats an earlier outcome, is a
/// `MalformedAnnotation`.
pub fn parse_annotation(body: &str) -> Result<ExpectedResult> {
    let mut expected = ExpectedResult::new();
    for clause in body.split(';').map(str::trim).filter(|c| !c.is_empty()) {
        let malformed = || QcdlError::MalformedAnnotation { clause: clause.to_string() };
        let (outcome, percentage) = parse_clause(clause).ok_or_else(malformed)?;
        // An outcome may be listed once.
        if expected.insert(outcome, percentage).is_some() {
            return Err(malformed());
        }
    }
    Ok(expected)
}

fn parse_clause(clause: &str) -> Option<(Outcome, f64)> {
    let rest = clause.strip_prefix('[')?;
    let close = rest.find(']')?;
    let (bit_list, tail) = (&rest[..close], &rest[close + 1..]);

    let mut bits = Vec::new();
    for bit in bit_list.split(',') {
        match bit.trim() {
            "0" => bits.push(0u8),
            "1" => bits.push(1u8),
            _ => return None,
        }
    }

    let value = tail.trim_start().strip_prefix(':')?.trim();
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let percentage: f64 = value.parse().ok()?;
    Some((Outcome::from_bits(bits)?, percentage))
}
