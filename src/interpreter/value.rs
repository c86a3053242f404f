/// Dense matrices and the numeric kernels that operate on them.
///
/// Provides the `Matrix` type together with addition, scaling, multiplication,
/// transposition, Gaussian elimination, back-substitution and determinants.
/// Each kernel either returns a correctly shaped result or a `MatrixError`.
pub mod matrix;

pub mod core;
