/// Line-level diagnostics.
///
/// Defines every problem the engine can report about a single statement:
/// malformed text, unknown or misused builtins, kind and shape mismatches, and
/// symbol table violations. Each carries the line it occurred on.
pub mod diagnostic;
/// The per-line error log.
///
/// Collects diagnostics while a line is processed and hands them back most
/// recent first when the line fails.
pub mod error_log;
/// Whole-run errors.
///
/// The error returned when a script stops early, either because a line failed
/// or because the script could not be read.
pub mod script_error;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error_log::ErrorLog;
pub use script_error::ScriptError;
