use crate::interpreter::{
    evaluator::{core::EvalResult, function::core::expect_args},
    value::{core::Value, matrix},
};

/// Transposes a matrix, swapping its rows and columns.
///
/// # Parameters
/// - `args`: Slice containing exactly one matrix.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The `cols x rows` transpose.
///
/// # Example
/// ```
/// use openmat::interpreter::{
///     evaluator::function::transpose::transpose,
///     value::{core::Value, matrix::Matrix},
/// };
///
/// // [1,2,3] -> [1;2;3]
/// let input: Value = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]]).unwrap().into();
///
/// let r = transpose(&[input], 1).unwrap();
///
/// assert_eq!(r.as_matrix(1).unwrap().shape(), (3, 1));
/// assert_eq!(r.to_string(), "1.000000\n2.000000\n3.000000");
/// ```
pub fn transpose(args: &[Value], line: usize) -> EvalResult<Value> {
    let [input] = expect_args::<1>(args, "TRAN", line)?;

    Ok(matrix::transpose(input.as_matrix(line)?).into())
}
