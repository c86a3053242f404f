use crate::{
    error::Diagnostic,
    interpreter::{
        evaluator::{core::EvalResult, function::core::expect_args},
        value::{core::Value, matrix},
    },
};

/// Solves a linear system given as an augmented matrix.
///
/// For `n` unknowns the input must be `n x (n + 1)`: the coefficients followed
/// by the right-hand side column. The system is row-reduced with partial
/// pivoting and then back-substituted.
///
/// # Parameters
/// - `args`: Slice containing the augmented matrix.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The `n x 1` solution vector, a `DimensionError` for any other shape, or a
/// `SingularSystem` error when the coefficients have a zero determinant.
///
/// # Example
/// ```
/// use openmat::interpreter::{
///     evaluator::function::solve::solve,
///     value::{core::Value, matrix::Matrix},
/// };
///
/// // 2x + y = 5, x - y = 1
/// let system: Value = Matrix::from_rows(vec![vec![2.0, 1.0, 5.0],
///                                            vec![1.0, -1.0, 1.0]]).unwrap()
///                                                                  .into();
///
/// let x = solve(&[system], 1).unwrap();
/// assert_eq!(x.to_string(), "2.000000\n1.000000");
/// ```
pub fn solve(args: &[Value], line: usize) -> EvalResult<Value> {
    let [system] = expect_args::<1>(args, "SOLVE", line)?;
    let system = system.as_matrix(line)?;
    let (rows, cols) = system.shape();

    if cols != rows + 1 {
        return Err(Diagnostic::DimensionError { details: format!("SOLVE needs an augmented n x (n+1) matrix, got {rows}x{cols}"),
                                                line });
    }

    let coefficients = system.sub_matrix(0..rows, 0..rows);
    let det = matrix::determinant(&coefficients).map_err(|e| e.at(line))?;
    if det == 0.0 {
        return Err(Diagnostic::SingularSystem { line });
    }

    let reduced = matrix::row_reduce(system).map_err(|e| e.at(line))?;
    Ok(matrix::back_substitute(&reduced).map_err(|e| e.at(line))?
                                        .into())
}
