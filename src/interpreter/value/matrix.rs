use std::{num::NonZeroUsize, ops::Range, thread};

use thiserror::Error;

use crate::error::Diagnostic;

/// Output cells at which [`matrix_multiply`] starts splitting rows across
/// worker threads.
pub const PARALLEL_THRESHOLD: usize = 64 * 64;

/// Relative pivot tolerance. A pivot is treated as zero when its magnitude is
/// at most this times the largest coefficient of the matrix being reduced.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Failures reported by the numeric kernels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// A matrix had no rows or no columns.
    #[error("matrices must have at least one row and one column")]
    Empty,
    /// Rows of different lengths were supplied.
    #[error("row {row} has {found} entries but row 1 has {expected}")]
    Ragged {
        /// 1-based index of the offending row.
        row:      usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found:    usize,
    },
    /// Two operands have shapes the operation cannot combine.
    #[error("cannot apply {operation} to a {}x{} and a {}x{} matrix", left.0, left.1, right.0, right.1)]
    ShapeMismatch {
        /// The operation that was attempted.
        operation: &'static str,
        /// Shape of the left operand as `(rows, cols)`.
        left:      (usize, usize),
        /// Shape of the right operand as `(rows, cols)`.
        right:     (usize, usize),
    },
    /// A square matrix was required.
    #[error("expected a square matrix but found a {rows}x{cols} one")]
    NotSquare {
        /// Rows of the offending matrix.
        rows: usize,
        /// Columns of the offending matrix.
        cols: usize,
    },
    /// An `n x (n + 1)` augmented matrix was required.
    #[error("expected an augmented n x (n+1) matrix but found a {rows}x{cols} one")]
    NotAugmented {
        /// Rows of the offending matrix.
        rows: usize,
        /// Columns of the offending matrix.
        cols: usize,
    },
    /// Elimination hit a zero pivot.
    #[error("the system is singular")]
    Singular,
}

impl MatrixError {
    /// Converts the kernel failure into a diagnostic for `line`.
    #[must_use]
    pub fn at(self, line: usize) -> Diagnostic {
        match self {
            Self::Singular => Diagnostic::SingularSystem { line },
            other => Diagnostic::DimensionError { details: other.to_string(),
                                                  line },
        }
    }
}

/// A dense, row-major matrix of `f64`.
///
/// Matrices built through [`Matrix::from_rows`] always have at least one row
/// and one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Builds a matrix from a list of rows.
    ///
    /// # Errors
    /// Returns [`MatrixError::Empty`] when there are no rows or the first row
    /// is empty, and [`MatrixError::Ragged`] when rows differ in length.
    ///
    /// # Example
    /// ```
    /// use openmat::interpreter::value::matrix::{Matrix, MatrixError};
    ///
    /// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    ///
    /// let ragged = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
    /// assert!(matches!(ragged, Err(MatrixError::Ragged { row: 2, .. })));
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(MatrixError::Empty);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::Ragged { row:      index + 1,
                                                 expected: cols,
                                                 found:    row.len(), });
            }
            data.extend_from_slice(row);
        }

        Ok(Self { rows: rows.len(),
                  cols,
                  data })
    }

    /// A `rows x cols` matrix of zeroes.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows,
               cols,
               data: vec![0.0; rows * cols] }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Shape as `(rows, cols)`.
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The entry at `row`, `col`.
    ///
    /// # Panics
    /// Panics if the position is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// The entries of one row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterates over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols.max(1))
    }

    /// Copies the block spanning `rows` and `cols` into a new matrix.
    #[must_use]
    pub fn sub_matrix(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for row in rows.clone() {
            data.extend_from_slice(&self.row(row)[cols.clone()]);
        }
        Self { rows: rows.len(),
               cols: cols.len(),
               data }
    }

    fn at_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        &mut self.data[row * self.cols + col]
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.cols {
            self.data.swap(a * self.cols + col, b * self.cols + col);
        }
    }

    /// Subtracts `factor` times row `source` from row `target`, starting at
    /// column `from`.
    fn eliminate(&mut self, target: usize, source: usize, factor: f64, from: usize) {
        for col in from..self.cols {
            let value = self.get(source, col);
            *self.at_mut(target, col) -= factor * value;
        }
    }

    /// Magnitude at or below which a pivot taken from `cols` counts as zero.
    ///
    /// Scales with the largest entry in those columns, so systems with tiny
    /// coefficients are not mistaken for singular ones. An all-zero block
    /// gives a tolerance of zero, which still rejects a zero pivot.
    fn pivot_tolerance(&self, cols: Range<usize>) -> f64 {
        let scale = self.iter_rows()
                        .flat_map(|row| &row[cols.clone()])
                        .fold(0.0_f64, |max, x| max.max(x.abs()));
        scale * SINGULAR_EPSILON
    }

    /// Index of the row at or below `col` with the largest entry in `col`.
    fn pivot_row(&self, col: usize) -> usize {
        (col..self.rows).max_by(|&a, &b| self.get(a, col).abs().total_cmp(&self.get(b, col).abs()))
                        .unwrap_or(col)
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, row) in self.iter_rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for (col, value) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{value:.6}")?;
            }
        }
        Ok(())
    }
}

/// Adds two equally shaped matrices entry by entry.
///
/// # Errors
/// [`MatrixError::ShapeMismatch`] if the shapes differ.
pub fn elementwise_add(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    if a.shape() != b.shape() {
        return Err(MatrixError::ShapeMismatch { operation: "elementwise addition",
                                                left:      a.shape(),
                                                right:     b.shape(), });
    }

    let data = a.data.iter().zip(&b.data).map(|(x, y)| x + y).collect();
    Ok(Matrix { rows: a.rows,
                cols: a.cols,
                data })
}

/// Multiplies every entry of `m` by `scalar`.
#[must_use]
pub fn scale(m: &Matrix, scalar: f64) -> Matrix {
    Matrix { rows: m.rows,
             cols: m.cols,
             data: m.data.iter().map(|x| x * scalar).collect() }
}

/// Computes the matrix product `a * b`.
///
/// Large products are split into bands of rows that are computed on scoped
/// worker threads and joined before returning.
///
/// # Errors
/// [`MatrixError::ShapeMismatch`] unless `a.cols() == b.rows()`.
///
/// # Example
/// ```
/// use openmat::interpreter::value::matrix::{Matrix, matrix_multiply};
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let b = Matrix::from_rows(vec![vec![5.0], vec![6.0]]).unwrap();
///
/// let product = matrix_multiply(&a, &b).unwrap();
/// assert_eq!(product.shape(), (2, 1));
/// assert_eq!(product.get(0, 0), 17.0);
/// assert_eq!(product.get(1, 0), 39.0);
/// ```
pub fn matrix_multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    if a.cols != b.rows {
        return Err(MatrixError::ShapeMismatch { operation: "matrix multiplication",
                                                left:      a.shape(),
                                                right:     b.shape(), });
    }

    let mut out = Matrix::zeros(a.rows, b.cols);
    if out.data.is_empty() {
        return Ok(out);
    }

    let width = b.cols;
    if out.data.len() < PARALLEL_THRESHOLD || a.rows < 2 {
        for (row, cells) in out.data.chunks_mut(width).enumerate() {
            multiply_row(a, b, row, cells);
        }
        return Ok(out);
    }

    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get)
                                                 .min(a.rows);
    let rows_per_worker = a.rows.div_ceil(workers);
    log::trace!("multiplying {}x{} by {}x{} on {workers} workers",
                a.rows,
                a.cols,
                b.rows,
                b.cols);

    thread::scope(|scope| {
        for (band, cells) in out.data.chunks_mut(rows_per_worker * width).enumerate() {
            scope.spawn(move || {
                     let first = band * rows_per_worker;
                     for (offset, row_cells) in cells.chunks_mut(width).enumerate() {
                         multiply_row(a, b, first + offset, row_cells);
                     }
                 });
        }
    });

    Ok(out)
}

fn multiply_row(a: &Matrix, b: &Matrix, row: usize, out: &mut [f64]) {
    let lhs = a.row(row);
    for (col, cell) in out.iter_mut().enumerate() {
        *cell = lhs.iter()
                   .enumerate()
                   .map(|(k, x)| x * b.get(k, col))
                   .sum();
    }
}

/// Swaps rows and columns.
#[must_use]
pub fn transpose(m: &Matrix) -> Matrix {
    let mut out = Matrix::zeros(m.cols, m.rows);
    for row in 0..m.rows {
        for col in 0..m.cols {
            *out.at_mut(col, row) = m.get(row, col);
        }
    }
    out
}

/// Forward elimination with partial pivoting.
///
/// Returns an upper-triangular copy of the augmented matrix. Only the
/// coefficient columns (all but the last) are used as pivot columns.
///
/// # Errors
/// [`MatrixError::Singular`] when a pivot column has no usable entry.
pub fn row_reduce(augmented: &Matrix) -> Result<Matrix, MatrixError> {
    let mut m = augmented.clone();
    let pivots = m.rows.min(m.cols.saturating_sub(1));
    let tolerance = m.pivot_tolerance(0..m.cols.saturating_sub(1));

    for col in 0..pivots {
        let pivot_row = m.pivot_row(col);
        if m.get(pivot_row, col).abs() <= tolerance {
            return Err(MatrixError::Singular);
        }
        m.swap_rows(col, pivot_row);

        let pivot = m.get(col, col);
        for row in col + 1..m.rows {
            let factor = m.get(row, col) / pivot;
            m.eliminate(row, col, factor, col);
        }
    }

    Ok(m)
}

/// Solves an upper-triangular augmented `n x (n + 1)` system.
///
/// Returns the `n x 1` solution vector.
///
/// # Errors
/// [`MatrixError::NotAugmented`] for any other shape and
/// [`MatrixError::Singular`] when a diagonal entry is zero.
pub fn back_substitute(reduced: &Matrix) -> Result<Matrix, MatrixError> {
    let n = reduced.rows;
    if reduced.cols != n + 1 {
        return Err(MatrixError::NotAugmented { rows: reduced.rows,
                                               cols: reduced.cols, });
    }

    let tolerance = reduced.pivot_tolerance(0..n);
    let mut solution = Matrix::zeros(n, 1);
    for row in (0..n).rev() {
        let mut acc = reduced.get(row, n);
        for col in row + 1..n {
            acc -= reduced.get(row, col) * solution.get(col, 0);
        }

        let pivot = reduced.get(row, row);
        if pivot.abs() <= tolerance {
            return Err(MatrixError::Singular);
        }
        *solution.at_mut(row, 0) = acc / pivot;
    }

    Ok(solution)
}

/// Determinant of a square matrix, computed by elimination.
///
/// Returns exactly `0.0` when elimination meets a pivot within the relative
/// tolerance of [`SINGULAR_EPSILON`].
///
/// # Errors
/// [`MatrixError::NotSquare`] if the matrix is not square.
///
/// # Example
/// ```
/// use openmat::interpreter::value::matrix::{Matrix, determinant};
///
/// let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert!((determinant(&m).unwrap() + 2.0).abs() < 1e-9);
/// ```
pub fn determinant(m: &Matrix) -> Result<f64, MatrixError> {
    if m.rows != m.cols {
        return Err(MatrixError::NotSquare { rows: m.rows,
                                            cols: m.cols, });
    }

    let mut work = m.clone();
    let tolerance = m.pivot_tolerance(0..m.cols);
    let mut det = 1.0;
    for col in 0..work.rows {
        let pivot_row = work.pivot_row(col);
        let pivot = work.get(pivot_row, col);
        if pivot.abs() <= tolerance {
            return Ok(0.0);
        }
        if pivot_row != col {
            work.swap_rows(col, pivot_row);
            det = -det;
        }
        det *= pivot;

        for row in col + 1..work.rows {
            let factor = work.get(row, col) / pivot;
            work.eliminate(row, col, factor, col);
        }
    }

    Ok(det)
}
