//! Line-oriented parser for M3UG filter files
//!
//! Parsing validates everything the evaluator relies on: operator symbols
//! are known and operand types are compatible with their operator. A
//! failure carries the source identifier and 1-based line number and aborts
//! the whole file; there are no partial rule sets.

use thiserror::Error;

use super::types::{FLOAT_RE, INT_RE, Operand, Operator, Rule, RuleSet};

/// A rejected filter file, pointing at the offending line
#[derive(Debug, Error)]
pub enum ParseError {
    /// Line did not split into `<tag> <operator> <value>`
    #[error("{origin}:{line}: invalid filter syntax")]
    InvalidSyntax { origin: String, line: usize },

    /// Operator symbol is not one of the seven known operators
    #[error("{origin}:{line}: unrecognized operator: {operator}")]
    UnknownOperator {
        origin: String,
        line: usize,
        operator: String,
    },

    /// An ordering operator was given a non-numeric operand
    #[error("{origin}:{line}: operator {operator} requires a numeric value, got: {operand}")]
    NumberRequired {
        origin: String,
        line: usize,
        operator: Operator,
        operand: String,
    },

    /// `~=` was given a numeric operand
    #[error("{origin}:{line}: operator {operator} requires a string value")]
    TextRequired {
        origin: String,
        line: usize,
        operator: Operator,
    },
}

impl ParseError {
    /// 1-based line number of the offending line
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::InvalidSyntax { line, .. }
            | Self::UnknownOperator { line, .. }
            | Self::NumberRequired { line, .. }
            | Self::TextRequired { line, .. } => *line,
        }
    }

    /// Source identifier the content was parsed under
    #[must_use]
    pub fn origin(&self) -> &str {
        match self {
            Self::InvalidSyntax { origin, .. }
            | Self::UnknownOperator { origin, .. }
            | Self::NumberRequired { origin, .. }
            | Self::TextRequired { origin, .. } => origin,
        }
    }
}

/// Parse M3UG text into an ordered `RuleSet`
///
/// `origin` identifies the source in diagnostics (typically the filter
/// file path). Lines starting with `#` and whitespace-only lines are
/// skipped. Every other line must split into exactly three components on
/// single spaces; the value component is the raw remainder of the line and
/// may itself contain spaces.
///
/// # Errors
///
/// Returns `ParseError` on the first malformed line, unknown operator, or
/// operator/operand type mismatch.
pub fn parse_rules(content: &str, origin: &str) -> Result<RuleSet, ParseError> {
    let mut rules = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;

        if line.starts_with('#') {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let mut components = line.splitn(3, ' ');
        let (Some(name), Some(symbol), Some(value)) =
            (components.next(), components.next(), components.next())
        else {
            return Err(ParseError::InvalidSyntax {
                origin: origin.to_string(),
                line: line_no,
            });
        };

        let operator =
            Operator::from_symbol(symbol).ok_or_else(|| ParseError::UnknownOperator {
                origin: origin.to_string(),
                line: line_no,
                operator: symbol.to_string(),
            })?;
        let operand = lex_operand(value);
        check_operand(operator, &operand, origin, line_no)?;

        rules.push(Rule::new(name, operator, operand));
    }

    Ok(RuleSet::new(rules))
}

/// Type an operand: pure decimal or integer text becomes a number,
/// everything else stays text
fn lex_operand(raw: &str) -> Operand {
    if FLOAT_RE.is_match(raw) || INT_RE.is_match(raw) {
        if let Ok(number) = raw.parse::<f64>() {
            return Operand::Number(number);
        }
    }
    Operand::Text(raw.to_string())
}

fn check_operand(
    operator: Operator,
    operand: &Operand,
    origin: &str,
    line: usize,
) -> Result<(), ParseError> {
    match operand {
        Operand::Number(_) if operator == Operator::Contains => Err(ParseError::TextRequired {
            origin: origin.to_string(),
            line,
            operator,
        }),
        Operand::Text(text) if operator.is_ordering() => Err(ParseError::NumberRequired {
            origin: origin.to_string(),
            line,
            operator,
            operand: text.clone(),
        }),
        _ => Ok(()),
    }
}
