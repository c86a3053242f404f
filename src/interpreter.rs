/// The depot module holds the variables of a running script.
///
/// Variables live in a single flat namespace for the whole run and are
/// released together when the run ends.
pub mod depot;
/// The evaluator module resolves expression trees and executes statements.
///
/// The evaluator looks up variables, calls builtins bottom-up and applies the
/// resulting value to the depot or the output. It also hosts the `Session`
/// that drives a script one line at a time.
///
/// # Responsibilities
/// - Resolves expression trees, caching every call's result.
/// - Declares, reassigns and prints values.
/// - Collects the diagnostics of a failing line.
pub mod evaluator;
/// The lexer module splits a line into words.
///
/// Statements are made of space-separated words, and an expression is a
/// single word, so the lexer has only one kind of token.
pub mod lexer;
/// The parser module turns a line's words into a statement shape and an
/// expression tree.
///
/// # Responsibilities
/// - Recognises the declaration, reassignment and output statement forms.
/// - Reads scalar and matrix literals.
/// - Splits builtin calls into their arguments and builds the tree.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// A value is either a scalar or a dense matrix. The module also provides the
/// matrix kernels used by the builtins.
pub mod value;
