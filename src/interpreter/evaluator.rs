/// Session state and the line driver.
///
/// Contains the `Session` that owns the depot, the registry and the error log,
/// and runs scripts line by line.
pub mod core;

/// Expression tree resolution.
///
/// Collapses a built tree into one value, looking up variables and invoking
/// builtins bottom-up.
pub mod resolver;

/// Statement execution.
///
/// Binds, rebinds or prints the value of an evaluated statement.
pub mod executor;

/// Builtin functions.
///
/// The registry of callable builtins and their implementations.
pub mod function;
