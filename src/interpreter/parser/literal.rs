use crate::{
    error::Diagnostic,
    interpreter::{
        parser::core::ParseResult,
        value::{core::Value, matrix::Matrix},
    },
};

/// Returns `true` if `text` should be read as a literal: it starts with `[`,
/// `-` or a decimal digit.
#[must_use]
pub fn is_literal(text: &str) -> bool {
    text.starts_with(|c: char| c == '[' || c == '-' || c.is_ascii_digit())
}

/// Parses a scalar or matrix literal.
///
/// Scalars follow the usual floating point syntax (`5`, `-2.5`, `1e-3`).
/// Matrices are written `[a,b;c,d]`: rows separated by `;`, entries by `,`.
/// Every row must have the same number of entries.
///
/// # Errors
/// - `SyntaxError` for text that is not a number or a bracketed matrix.
/// - `DimensionError` for matrices whose rows differ in length.
///
/// # Example
/// ```
/// use openmat::interpreter::{parser::literal::parse_literal, value::core::Value};
///
/// assert_eq!(parse_literal("-2.5", 1).unwrap(), Value::Scalar(-2.5));
///
/// let m = parse_literal("[1,2;3,4]", 1).unwrap();
/// assert_eq!(m.as_matrix(1).unwrap().shape(), (2, 2));
///
/// assert!(parse_literal("[1,2;3]", 1).is_err());
/// ```
pub fn parse_literal(text: &str, line: usize) -> ParseResult<Value> {
    if text.starts_with('[') {
        return parse_matrix(text, line).map(Value::from);
    }
    parse_number(text, line).map(Value::Scalar)
}

fn parse_matrix(text: &str, line: usize) -> ParseResult<Matrix> {
    let body = text.strip_prefix('[')
                   .and_then(|rest| rest.strip_suffix(']'))
                   .ok_or_else(|| {
                       Diagnostic::syntax(format!("matrix literal '{text}' is missing its closing ']'"),
                                          line)
                   })?;

    let rows = body.split(';')
                   .map(|row| row.split(',').map(|cell| parse_number(cell, line)).collect())
                   .collect::<ParseResult<Vec<Vec<f64>>>>()?;

    Matrix::from_rows(rows).map_err(|e| e.at(line))
}

fn parse_number(text: &str, line: usize) -> ParseResult<f64> {
    let starts_numeric = text.starts_with(|c: char| c == '-' || c == '.' || c.is_ascii_digit());
    match text.parse::<f64>() {
        Ok(value) if starts_numeric && value.is_finite() => Ok(value),
        _ => Err(Diagnostic::syntax(format!("'{text}' is not a number"), line)),
    }
}
