use std::rc::Rc;

use crate::{
    error::Diagnostic,
    interpreter::{evaluator::core::EvalResult, value::matrix::Matrix},
};

/// The two kinds of value a script can work with.
///
/// Used for declarations (`MAT` / `NUM`) and for builtin operand signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A single `f64`.
    Scalar,
    /// A [`Matrix`].
    Matrix,
}

impl ValueKind {
    /// The kind a declaration keyword introduces, if `keyword` is one.
    ///
    /// # Example
    /// ```
    /// use openmat::interpreter::value::core::ValueKind;
    ///
    /// assert_eq!(ValueKind::from_keyword("MAT"), Some(ValueKind::Matrix));
    /// assert_eq!(ValueKind::from_keyword("NUM"), Some(ValueKind::Scalar));
    /// assert_eq!(ValueKind::from_keyword("OUT"), None);
    /// ```
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "MAT" => Some(Self::Matrix),
            "NUM" => Some(Self::Scalar),
            _ => None,
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar => f.write_str("scalar"),
            Self::Matrix => f.write_str("matrix"),
        }
    }
}

/// Represents a runtime value in the interpreter.
///
/// Matrices sit behind an `Rc` so that reading a variable out of the depot
/// does not copy its entries.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A double precision number.
    Scalar(f64),
    /// A dense matrix.
    Matrix(Rc<Matrix>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Self::Matrix(Rc::new(m))
    }
}

impl Value {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Matrix(_) => ValueKind::Matrix,
        }
    }

    /// Returns the number held by a scalar.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a scalar.
    /// - `Err(Diagnostic::TypeError)`: If it is a matrix.
    ///
    /// # Example
    /// ```
    /// use openmat::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Scalar(2.5).as_scalar(1).unwrap(), 2.5);
    /// ```
    pub fn as_scalar(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Scalar(s) => Ok(*s),
            Self::Matrix(_) => Err(self.kind_mismatch(ValueKind::Scalar, line)),
        }
    }

    /// Returns the matrix held by a matrix value.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(&Matrix)`: If the value is a matrix.
    /// - `Err(Diagnostic::TypeError)`: If it is a scalar.
    pub fn as_matrix(&self, line: usize) -> EvalResult<&Matrix> {
        match self {
            Self::Matrix(m) => Ok(m),
            Self::Scalar(_) => Err(self.kind_mismatch(ValueKind::Matrix, line)),
        }
    }

    fn kind_mismatch(&self, expected: ValueKind, line: usize) -> Diagnostic {
        Diagnostic::TypeError { details: format!("expected a {expected} but found a {}",
                                                 self.kind()),
                                line }
    }
}

/// Scalars print with six decimals; matrices print one row per line.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{s:.6}"),
            Self::Matrix(m) => write!(f, "{m}"),
        }
    }
}
