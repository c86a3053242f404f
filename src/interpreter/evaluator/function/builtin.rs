use crate::{
    error::Diagnostic,
    interpreter::{
        evaluator::{core::EvalResult, function::core::expect_args},
        value::{
            core::Value,
            matrix::{self, Matrix},
        },
    },
};

/// Generates a builtin combining two scalars with a binary operator.
macro_rules! scalar_builtin {
    ($fname:ident, $name:literal, $op:tt) => {
        #[doc = concat!("`", $name, "(a, b)`: combines two scalars with `", stringify!($op), "`.")]
        pub fn $fname(args: &[Value], line: usize) -> EvalResult<Value> {
            let [a, b] = expect_args::<2>(args, $name, line)?;
            Ok(Value::Scalar(a.as_scalar(line)? $op b.as_scalar(line)?))
        }
    };
}

scalar_builtin!(add, "ADD", +);
scalar_builtin!(mul, "MUL", *);

/// Adds two matrices of the same shape entry by entry.
///
/// # Parameters
/// - `args`: Two matrices.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// A `DimensionError` if the shapes differ, otherwise the sum.
///
/// # Example
/// ```
/// use openmat::interpreter::{
///     evaluator::function::builtin::mat_add,
///     value::{core::Value, matrix::Matrix},
/// };
///
/// let a: Value = Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap().into();
/// let b: Value = Matrix::from_rows(vec![vec![3.0, 4.0]]).unwrap().into();
///
/// let sum = mat_add(&[a, b], 1).unwrap();
/// assert_eq!(sum.to_string(), "4.000000 6.000000");
/// ```
pub fn mat_add(args: &[Value], line: usize) -> EvalResult<Value> {
    let [a, b] = expect_args::<2>(args, "MAT_ADD", line)?;
    let (a, b) = (a.as_matrix(line)?, b.as_matrix(line)?);

    if a.shape() != b.shape() {
        return Err(shape_error("MAT_ADD needs equal shapes", a, b, line));
    }

    Ok(matrix::elementwise_add(a, b).map_err(|e| e.at(line))?
                                     .into())
}

/// Multiplies every entry of a matrix by a scalar.
///
/// The scalar comes first: `SCAL_MUL(s, M)`.
pub fn scal_mul(args: &[Value], line: usize) -> EvalResult<Value> {
    let [scalar, m] = expect_args::<2>(args, "SCAL_MUL", line)?;

    Ok(matrix::scale(m.as_matrix(line)?, scalar.as_scalar(line)?).into())
}

/// Matrix product.
///
/// The column count of the left operand must equal the row count of the
/// right one; otherwise a `DimensionError` is returned.
pub fn mat_mul(args: &[Value], line: usize) -> EvalResult<Value> {
    let [a, b] = expect_args::<2>(args, "MAT_MUL", line)?;
    let (a, b) = (a.as_matrix(line)?, b.as_matrix(line)?);

    if a.cols() != b.rows() {
        return Err(shape_error("MAT_MUL needs the left column count to match the right row count",
                               a,
                               b,
                               line));
    }

    Ok(matrix::matrix_multiply(a, b).map_err(|e| e.at(line))?
                                     .into())
}

fn shape_error(reason: &str, a: &Matrix, b: &Matrix, line: usize) -> Diagnostic {
    Diagnostic::DimensionError { details: format!("{reason}, got {}x{} and {}x{}",
                                                  a.rows(),
                                                  a.cols(),
                                                  b.rows(),
                                                  b.cols()),
                                 line }
}
