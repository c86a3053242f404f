//! # openmat
//!
//! openmat is an interpreter for OpenMat, a tiny line-oriented language for
//! scalar and matrix arithmetic. Scripts declare typed variables, combine them
//! with builtin functions such as `MAT_MUL` or `SOLVE` and print results.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use crate::{error::ScriptError, interpreter::evaluator::core::Session};

/// Defines the structure of parsed statements.
///
/// This module declares the arena-based expression tree built for each
/// statement, along with the statement targets and evaluated statements that
/// flow from the parser to the evaluator.
pub mod ast;
/// Provides the error types for parsing and evaluation.
///
/// Every failure of a line is a `Diagnostic` carrying its kind and line
/// number. Diagnostics of one line are collected in an `ErrorLog`, and a run
/// that stops early reports them through `ScriptError`.
pub mod error;
/// Orchestrates the execution of scripts.
///
/// This module ties together lexing, parsing, evaluation and the value types
/// to provide a complete runtime for OpenMat scripts.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and depot.
/// - Provides the `Session` entry point for running scripts.
pub mod interpreter;
/// The embedded self-test suite run when no script is given.
pub mod selftest;

/// Runs a whole script, writing the output of its `OUT` statements to `out`.
///
/// Execution stops at the first line that fails; anything printed before that
/// line stays in `out`.
///
/// # Errors
/// [`ScriptError::Aborted`] with the failing line and its diagnostics, most
/// recent first.
///
/// # Examples
/// ```
/// use openmat::{error::DiagnosticKind, run_script};
///
/// let mut out = Vec::new();
/// run_script("NUM x = 5\nOUT = x\n", &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "5.000000\n");
///
/// // 'y' was never declared.
/// let err = run_script("OUT = y", &mut Vec::new()).unwrap_err();
/// assert_eq!(err.diagnostics()[0].kind(), DiagnosticKind::UndeclaredVariable);
/// ```
pub fn run_script<W: Write>(source: &str, out: &mut W) -> Result<(), ScriptError> {
    Session::new(out).run(source.as_bytes())
}
