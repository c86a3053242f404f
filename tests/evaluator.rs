use std::sync::atomic::{AtomicUsize, Ordering};

use openmat::{
    ast::{ExprTree, Node},
    error::{DiagnosticKind, ErrorLog, ScriptError},
    interpreter::{
        depot::Depot,
        evaluator::{
            core::{EvalResult, Session},
            function::core::{BUILTIN_FUNCTIONS, BuiltinDef, Registry},
        },
        value::core::{Value, ValueKind},
    },
};
use pretty_assertions::assert_eq;

static NEGATE_CALLS: AtomicUsize = AtomicUsize::new(0);

fn twice(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Scalar(args[0].as_scalar(line)? * 2.0))
}

// Only called by `resolving_twice_calls_the_builtin_once`.
fn negate(args: &[Value], line: usize) -> EvalResult<Value> {
    NEGATE_CALLS.fetch_add(1, Ordering::SeqCst);
    Ok(Value::Scalar(-args[0].as_scalar(line)?))
}

const TWICE: BuiltinDef = BuiltinDef { name:     "TWICE",
                                       operands: &[ValueKind::Scalar],
                                       result:   ValueKind::Scalar,
                                       func:     twice, };

fn broken(_: &[Value], _: usize) -> EvalResult<Value> {
    Ok(Value::Scalar(0.0))
}

#[test]
fn standard_registry_has_every_builtin() {
    let registry = Registry::standard();
    let names: Vec<&str> = registry.names().collect();

    assert_eq!(names, BUILTIN_FUNCTIONS.to_vec());
    assert_eq!(registry.get("ADD").map(BuiltinDef::arity), Some(2));
    assert_eq!(registry.get("TRAN").map(BuiltinDef::arity), Some(1));
    assert!(registry.get("ADD(").is_none());
}

#[test]
fn registering_replaces_an_existing_entry() {
    let mut registry = Registry::empty();
    assert!(registry.register(TWICE).is_none());
    assert!(registry.register(TWICE).is_some());
    assert!(registry.contains("TWICE"));
    assert!(!registry.contains("ADD"));
}

#[test]
fn resolving_twice_calls_the_builtin_once() {
    let mut registry = Registry::standard();
    registry.register(BuiltinDef { name:     "NEG",
                                   operands: &[ValueKind::Scalar],
                                   result:   ValueKind::Scalar,
                                   func:     negate, });
    let depot = Depot::new();
    let mut errors = ErrorLog::new();

    let mut tree = ExprTree::build("ADD(NEG(3),1)", &registry, 1, &mut errors).unwrap();

    let first = tree.resolve(&depot, 1, &mut errors).unwrap();
    let second = tree.resolve(&depot, 1, &mut errors).unwrap();

    assert_eq!(first, Value::Scalar(-2.0));
    assert_eq!(second, first);
    assert_eq!(NEGATE_CALLS.load(Ordering::SeqCst), 1);
    assert!(errors.is_empty());
}

#[test]
fn resolved_children_are_released() {
    let registry = Registry::standard();
    let depot = Depot::new();
    let mut errors = ErrorLog::new();

    let mut tree = ExprTree::build("MUL(ADD(1,2),3)", &registry, 1, &mut errors).unwrap();
    tree.resolve(&depot, 1, &mut errors).unwrap();

    let Node::Call { cached: Some(value),
                     children,
                     .. } = tree.root()
    else {
        panic!("root was not resolved: {:?}", tree.root());
    };
    assert_eq!(value, &Value::Scalar(9.0));
    assert!(children.is_empty());
    assert!(tree.is_resolved());
}

#[test]
fn variables_are_looked_up_at_resolution() {
    let registry = Registry::standard();
    let mut depot = Depot::new();
    let mut errors = ErrorLog::new();

    let mut tree = ExprTree::build("ADD(x,x)", &registry, 2, &mut errors).unwrap();
    let err = tree.resolve(&depot, 2, &mut errors).unwrap_err();
    assert_eq!(err.kind(), DiagnosticKind::UndeclaredVariable);
    assert_eq!(errors.len(), 1);

    errors.clear();
    depot.insert("x", Value::Scalar(1.5)).unwrap();
    assert_eq!(tree.resolve(&depot, 2, &mut errors).unwrap(), Value::Scalar(3.0));
}

#[test]
fn failed_calls_keep_their_arguments() {
    let registry = Registry::standard();
    let mut depot = Depot::new();
    let mut errors = ErrorLog::new();

    let mut tree = ExprTree::build("ADD(y,MUL(2,TRAN(5)))", &registry, 1, &mut errors).unwrap();
    let err = tree.resolve(&depot, 1, &mut errors).unwrap_err();
    assert_eq!(err.kind(), DiagnosticKind::TypeError);
    let logged: Vec<DiagnosticKind> = errors.iter().map(|d| d.kind()).collect();
    assert_eq!(logged, vec![DiagnosticKind::UndeclaredVariable]);

    errors.clear();
    depot.insert("y", Value::Scalar(1.0)).unwrap();
    let again = tree.resolve(&depot, 1, &mut errors).unwrap_err();
    assert_eq!(again.kind(), DiagnosticKind::TypeError);
    assert!(errors.is_empty());
}

#[test]
fn build_collects_failing_arguments() {
    let registry = Registry::standard();
    let mut errors = ErrorLog::new();

    let err = ExprTree::build("ADD(FOO(1),[1;2,3])", &registry, 5, &mut errors).unwrap_err();

    assert_eq!(err.kind(), DiagnosticKind::DimensionError);
    let logged: Vec<DiagnosticKind> = errors.iter().map(|d| d.kind()).collect();
    assert_eq!(logged, vec![DiagnosticKind::UnknownFunction]);
}

#[test]
fn builtins_must_return_their_declared_kind() {
    let mut registry = Registry::standard();
    registry.register(BuiltinDef { name:     "BROKEN",
                                   operands: &[],
                                   result:   ValueKind::Matrix,
                                   func:     broken, });

    let mut session = Session::with_registry(Vec::new(), registry);
    let err = session.run_line("OUT = BROKEN()").unwrap_err();
    assert_eq!(err.kind(), DiagnosticKind::TypeError);
}

#[test]
fn invoke_rejects_stale_argument_counts() {
    let registry = Registry::standard();
    let add = registry.get("ADD").unwrap();

    let err = add.invoke(&[Value::Scalar(1.0)], 3).unwrap_err();
    assert_eq!(err.kind(), DiagnosticKind::ArityError);
    assert_eq!(err.line(), 3);
}

#[test]
fn custom_builtins_are_callable_from_scripts() {
    let mut registry = Registry::standard();
    registry.register(TWICE);

    let mut session = Session::with_registry(Vec::new(), registry);
    session.run("NUM x = TWICE(TWICE(1.5))\nOUT = x\n".as_bytes())
           .unwrap();

    assert_eq!(String::from_utf8(session.into_output()).unwrap(), "6.000000\n");
}

#[test]
fn session_counts_lines_and_clears_the_log() {
    let mut session = Session::new(Vec::new());

    session.run_line("OUT = ADD(a,b)").unwrap_err();
    assert_eq!(session.errors().len(), 2);

    session.run_line("NUM a = 1").unwrap();
    assert!(session.errors().is_empty());
    assert_eq!(session.line(), 2);
    assert!(session.depot().contains("a"));
}

#[test]
fn run_tears_down_the_depot() {
    let mut session = Session::new(Vec::new());
    session.run("NUM a = 1\nMAT b = [1,2]\n".as_bytes()).unwrap();

    assert!(session.depot().is_empty());
    assert_eq!(session.line(), 2);
}

#[test]
fn run_stops_reading_at_the_failing_line() {
    let mut session = Session::new(Vec::new());
    let err = session.run("OUT = 1\nMAT m = [1,2;3]\nOUT = 2\n".as_bytes())
                     .unwrap_err();

    assert!(matches!(err, ScriptError::Aborted { line: 2, .. }));
    assert_eq!(session.line(), 2);
    assert_eq!(String::from_utf8(session.into_output()).unwrap(), "1.000000\n");
}

#[test]
fn invalid_utf8_is_an_io_error() {
    let mut session = Session::new(Vec::new());
    let err = session.run(&b"OUT = 1\n\xff\n"[..]).unwrap_err();

    assert!(matches!(err, ScriptError::Io(_)));
    assert!(err.diagnostics().is_empty());
}
