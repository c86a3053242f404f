/// Scalar and matrix arithmetic builtins.
///
/// `ADD`, `MUL`, `MAT_ADD`, `SCAL_MUL` and `MAT_MUL`. Shape requirements are
/// checked here before the numeric kernels are called.
pub mod builtin;
/// The `SOLVE` builtin.
///
/// Solves a linear system given as an augmented matrix.
pub mod solve;
/// The `TRAN` builtin.
pub mod transpose;

pub mod core;
