use openmat::{
    error::DiagnosticKind,
    interpreter::{
        evaluator::function::{
            builtin::{add, mat_add, mat_mul, mul, scal_mul},
            solve::solve,
            transpose::transpose,
        },
        value::{
            core::Value,
            matrix::{self, Matrix, MatrixError, PARALLEL_THRESHOLD},
        },
    },
};
use pretty_assertions::assert_eq;

fn m(rows: &[&[f64]]) -> Matrix {
    Matrix::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

fn v(rows: &[&[f64]]) -> Value {
    m(rows).into()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 0.001 * b.abs().max(1.0)
}

#[test]
fn scalar_builtins() {
    for (a, b) in [(2.0, 3.0), (-1.5, 4.0), (0.0, 7.25)] {
        let args = [Value::Scalar(a), Value::Scalar(b)];
        assert_eq!(add(&args, 1).unwrap(), Value::Scalar(a + b));
        assert_eq!(mul(&args, 1).unwrap(), Value::Scalar(a * b));
    }
}

#[test]
fn mat_add_is_elementwise() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let b = m(&[&[0.5, -2.0, 1.0], &[10.0, 0.0, -6.0]]);

    let sum = mat_add(&[Value::from(a.clone()), Value::from(b.clone())], 1).unwrap();
    let sum = sum.as_matrix(1).unwrap();

    assert_eq!(sum.shape(), (2, 3));
    for i in 0..2 {
        for j in 0..3 {
            assert_eq!(sum.get(i, j), a.get(i, j) + b.get(i, j));
        }
    }
}

#[test]
fn mat_add_rejects_mismatched_shapes() {
    let err = mat_add(&[v(&[&[1.0, 2.0]]), v(&[&[1.0], &[2.0]])], 7).unwrap_err();
    assert_eq!(err.kind(), DiagnosticKind::DimensionError);
    assert_eq!(err.line(), 7);
}

#[test]
fn scal_mul_scales_every_entry() {
    let base = m(&[&[1.0, -2.0], &[3.5, 0.0]]);

    let identity = scal_mul(&[Value::Scalar(1.0), Value::from(base.clone())], 1).unwrap();
    assert_eq!(identity, Value::from(base.clone()));

    let tripled = scal_mul(&[Value::Scalar(3.0), Value::from(base.clone())], 1).unwrap();
    let tripled = tripled.as_matrix(1).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_eq!(tripled.get(i, j), 3.0 * base.get(i, j));
        }
    }
}

#[test]
fn mat_mul_shapes_and_entries() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let b = m(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);

    let product = mat_mul(&[Value::from(a), Value::from(b)], 1).unwrap();
    assert_eq!(product, v(&[&[58.0, 64.0], &[139.0, 154.0]]));

    let err = mat_mul(&[v(&[&[1.0, 2.0]]), v(&[&[1.0, 2.0]])], 2).unwrap_err();
    assert_eq!(err.kind(), DiagnosticKind::DimensionError);
}

#[test]
fn large_products_match_the_sequential_result() {
    let n = 80;
    assert!(n * n >= PARALLEL_THRESHOLD);

    let rows: Vec<Vec<f64>> = (0..n).map(|i| (0..n).map(|j| ((i * 7 + j * 3) % 11) as f64 - 5.0).collect())
                                    .collect();
    let a = Matrix::from_rows(rows).unwrap();
    let identity = Matrix::from_rows((0..n).map(|i| (0..n).map(|j| f64::from(u8::from(i == j))).collect())
                                           .collect()).unwrap();

    assert_eq!(matrix::matrix_multiply(&a, &identity).unwrap(), a);

    let product = matrix::matrix_multiply(&a, &a).unwrap();
    for (i, j) in [(0, 0), (13, 57), (79, 1), (40, 40)] {
        let expected: f64 = (0..n).map(|k| a.get(i, k) * a.get(k, j)).sum();
        assert_eq!(product.get(i, j), expected);
    }
}

#[test]
fn transpose_is_an_involution() {
    let original = v(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);

    let once = transpose(&[original.clone()], 1).unwrap();
    assert_eq!(once, v(&[&[1.0, 4.0], &[2.0, 5.0], &[3.0, 6.0]]));

    let twice = transpose(&[once], 1).unwrap();
    assert_eq!(twice, original);
}

#[test]
fn solve_satisfies_the_original_equations() {
    let system = m(&[&[2.0, 1.0, 5.0], &[1.0, -1.0, 1.0]]);

    let x = solve(&[Value::from(system.clone())], 1).unwrap();
    let x = x.as_matrix(1).unwrap();
    assert_eq!(x.shape(), (2, 1));

    for row in system.iter_rows() {
        let lhs = row[0] * x.get(0, 0) + row[1] * x.get(1, 0);
        assert!(approx(lhs, row[2]), "{lhs} != {}", row[2]);
    }
}

#[test]
fn solve_needs_pivoting() {
    // A zero in the top-left corner.
    let system = m(&[&[0.0, 1.0, 2.0], &[1.0, 1.0, 3.0]]);
    let x = solve(&[Value::from(system)], 1).unwrap();

    assert_eq!(x.to_string(), "1.000000\n2.000000");
}

#[test]
fn solve_is_scale_independent() {
    let system = m(&[&[2e-9, 1e-9, 5e-9], &[1e-9, -1e-9, 1e-9]]);
    let x = solve(&[Value::from(system)], 1).unwrap();

    assert_eq!(x.to_string(), "2.000000\n1.000000");
}

#[test]
fn solve_rejects_singular_and_misshapen_systems() {
    let singular = solve(&[v(&[&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]])], 3).unwrap_err();
    assert_eq!(singular.kind(), DiagnosticKind::SingularSystem);

    let square = solve(&[v(&[&[1.0, 2.0], &[3.0, 4.0]])], 3).unwrap_err();
    assert_eq!(square.kind(), DiagnosticKind::DimensionError);
}

#[test]
fn determinant_and_elimination() {
    assert!((matrix::determinant(&m(&[&[4.0, 3.0], &[6.0, 3.0]])).unwrap() + 6.0).abs() < 1e-9);
    assert_eq!(matrix::determinant(&m(&[&[1.0, 2.0], &[2.0, 4.0]])).unwrap(), 0.0);
    assert_eq!(matrix::determinant(&m(&[&[1.0, 2.0]])),
               Err(MatrixError::NotSquare { rows: 1, cols: 2 }));

    let tiny = matrix::determinant(&m(&[&[1e-7, 0.0], &[0.0, 1e-7]])).unwrap();
    assert!((tiny - 1e-14).abs() < 1e-20, "{tiny}");

    let reduced = matrix::row_reduce(&m(&[&[1.0, 1.0, 3.0], &[2.0, 1.0, 4.0]])).unwrap();
    assert_eq!(reduced.get(1, 0), 0.0);
    assert_eq!(matrix::back_substitute(&reduced).unwrap().to_string(),
               "1.000000\n2.000000");
}

#[test]
fn display_format() {
    assert_eq!(Value::Scalar(5.0).to_string(), "5.000000");
    assert_eq!(Value::Scalar(-0.125).to_string(), "-0.125000");
    assert_eq!(v(&[&[1.0, 2.5], &[-3.0, 4.0]]).to_string(),
               "1.000000 2.500000\n-3.000000 4.000000");
}

#[test]
fn literals_must_be_rectangular() {
    assert_eq!(Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]),
               Err(MatrixError::Ragged { row:      2,
                                         expected: 2,
                                         found:    1, }));
    assert_eq!(Matrix::from_rows(vec![]), Err(MatrixError::Empty));
}
