use openmat::{
    error::DiagnosticKind,
    interpreter::{
        depot::{Depot, DepotError},
        value::{core::Value, matrix::Matrix},
    },
};
use pretty_assertions::assert_eq;

fn matrix(rows: Vec<Vec<f64>>) -> Value {
    Matrix::from_rows(rows).unwrap().into()
}

#[test]
fn insert_and_lookup() {
    let mut depot = Depot::new();
    depot.insert("x", Value::Scalar(5.0)).unwrap();
    depot.insert("m", matrix(vec![vec![1.0, 2.0]])).unwrap();

    assert_eq!(depot.lookup("x"), Ok(&Value::Scalar(5.0)));
    assert_eq!(depot.lookup("m"), Ok(&matrix(vec![vec![1.0, 2.0]])));
    assert_eq!(depot.len(), 2);
}

#[test]
fn names_are_case_sensitive() {
    let mut depot = Depot::new();
    depot.insert("x", Value::Scalar(1.0)).unwrap();

    assert!(depot.contains("x"));
    assert!(!depot.contains("X"));
    assert_eq!(depot.lookup("X"), Err(DepotError::Undeclared("X".to_string())));
}

#[test]
fn duplicate_insert_keeps_the_original() {
    let mut depot = Depot::new();
    depot.insert("m", matrix(vec![vec![1.0]])).unwrap();

    let err = depot.insert("m", Value::Scalar(2.0)).unwrap_err();
    assert_eq!(err.clone().at(4).kind(), DiagnosticKind::DuplicateDeclaration);
    assert_eq!(err.at(4).line(), 4);
    assert_eq!(depot.lookup("m"), Ok(&matrix(vec![vec![1.0]])));
    assert_eq!(depot.len(), 1);
}

#[test]
fn reassign_replaces_and_may_change_kind() {
    let mut depot = Depot::new();
    depot.insert("v", Value::Scalar(1.0)).unwrap();
    depot.reassign("v", matrix(vec![vec![3.0], vec![4.0]])).unwrap();

    assert_eq!(depot.lookup("v"), Ok(&matrix(vec![vec![3.0], vec![4.0]])));
    assert_eq!(depot.len(), 1);
}

#[test]
fn reassign_requires_a_declaration() {
    let mut depot = Depot::new();

    let err = depot.reassign("x", Value::Scalar(3.0)).unwrap_err();
    assert_eq!(err.at(1).kind(), DiagnosticKind::UndeclaredVariable);
    assert!(depot.is_empty());
}

#[test]
fn iterates_in_declaration_order() {
    let mut depot = Depot::new();
    for name in ["c", "a", "b"] {
        depot.insert(name, Value::Scalar(0.0)).unwrap();
    }
    depot.reassign("a", Value::Scalar(1.0)).unwrap();

    let names: Vec<&str> = depot.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn teardown_releases_everything() {
    let mut depot = Depot::new();
    depot.insert("a", Value::Scalar(1.0)).unwrap();
    depot.insert("b", matrix(vec![vec![1.0, 2.0]])).unwrap();

    assert_eq!(depot.teardown(), 2);
    assert!(depot.is_empty());
    assert_eq!(depot.teardown(), 0);

    depot.insert("a", Value::Scalar(2.0)).unwrap();
    assert_eq!(depot.lookup("a"), Ok(&Value::Scalar(2.0)));
}
