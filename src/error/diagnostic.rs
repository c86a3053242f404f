use thiserror::Error;

/// The category of a [`Diagnostic`], without its payload.
///
/// Used when a caller only cares about what went wrong, not the details, such
/// as the self-test runner or tests asserting on the failure of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The statement's tokens did not match any statement form, or a literal or
    /// call was malformed.
    SyntaxError,
    /// A call named a function that is not registered.
    UnknownFunction,
    /// A call supplied the wrong number of arguments.
    ArityError,
    /// A value had the wrong kind for where it was used.
    TypeError,
    /// Matrix shapes were incompatible.
    DimensionError,
    /// A variable was referenced or reassigned before being declared.
    UndeclaredVariable,
    /// A variable was declared twice.
    DuplicateDeclaration,
    /// A linear system had no unique solution.
    SingularSystem,
    /// A result could not be written to the output.
    OutputFailed,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::SyntaxError => "SyntaxError",
            Self::UnknownFunction => "UnknownFunction",
            Self::ArityError => "ArityError",
            Self::TypeError => "TypeError",
            Self::DimensionError => "DimensionError",
            Self::UndeclaredVariable => "UndeclaredVariable",
            Self::DuplicateDeclaration => "DuplicateDeclaration",
            Self::SingularSystem => "SingularSystem",
            Self::OutputFailed => "OutputFailed",
        };
        f.write_str(name)
    }
}

/// A single problem found while processing one line of a script.
///
/// Every variant carries the 1-based line it was raised on. Any diagnostic
/// aborts the whole run; see [`crate::error::ErrorLog`] for how they are
/// collected and reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Malformed statement, literal or call expression.
    #[error("Error on line {line}: Syntax error: {details}.")]
    SyntaxError {
        /// What was wrong with the text.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Called a function that is not in the registry.
    #[error("Error on line {line}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function with the wrong number of arguments.
    #[error("Error on line {line}: Function '{name}' expects {expected} argument(s) but was given {found}.")]
    ArityError {
        /// The name of the function.
        name:     String,
        /// The arity recorded in the registry.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A value had an unexpected kind.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the kind mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Matrix shapes are incompatible with the operation.
    #[error("Error on line {line}: Dimension error: {details}.")]
    DimensionError {
        /// Details about the offending shapes.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Used a variable that has not been declared.
    #[error("Error on line {line}: Undeclared variable '{name}'.")]
    UndeclaredVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared a variable that already exists.
    #[error("Error on line {line}: Variable '{name}' is already declared.")]
    DuplicateDeclaration {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// `SOLVE` was given a system without a unique solution.
    #[error("Error on line {line}: The system is singular and has no unique solution.")]
    SingularSystem {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing an `OUT` result failed.
    #[error("Error on line {line}: Failed to write output: {details}.")]
    OutputFailed {
        /// The underlying I/O failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl Diagnostic {
    /// Returns the category of this diagnostic.
    ///
    /// # Example
    /// ```
    /// use openmat::error::{Diagnostic, DiagnosticKind};
    ///
    /// let d = Diagnostic::UndeclaredVariable { name: "x".to_string(),
    ///                                          line: 3, };
    /// assert_eq!(d.kind(), DiagnosticKind::UndeclaredVariable);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        match self {
            Self::SyntaxError { .. } => DiagnosticKind::SyntaxError,
            Self::UnknownFunction { .. } => DiagnosticKind::UnknownFunction,
            Self::ArityError { .. } => DiagnosticKind::ArityError,
            Self::TypeError { .. } => DiagnosticKind::TypeError,
            Self::DimensionError { .. } => DiagnosticKind::DimensionError,
            Self::UndeclaredVariable { .. } => DiagnosticKind::UndeclaredVariable,
            Self::DuplicateDeclaration { .. } => DiagnosticKind::DuplicateDeclaration,
            Self::SingularSystem { .. } => DiagnosticKind::SingularSystem,
            Self::OutputFailed { .. } => DiagnosticKind::OutputFailed,
        }
    }

    /// Returns the 1-based line this diagnostic was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::SyntaxError { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::ArityError { line, .. }
            | Self::TypeError { line, .. }
            | Self::DimensionError { line, .. }
            | Self::UndeclaredVariable { line, .. }
            | Self::DuplicateDeclaration { line, .. }
            | Self::SingularSystem { line }
            | Self::OutputFailed { line, .. } => *line,
        }
    }

    /// Shorthand for a [`Diagnostic::SyntaxError`].
    pub(crate) fn syntax(details: impl Into<String>, line: usize) -> Self {
        Self::SyntaxError { details: details.into(),
                            line }
    }
}
