use thiserror::Error;

use crate::error::Diagnostic;

/// Why a script run stopped before reaching the end of its input.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// A line failed. `diagnostics` holds everything logged for that line,
    /// most recent first.
    #[error("Execution aborted on line {line} with {} diagnostic(s).", diagnostics.len())]
    Aborted {
        /// The line that failed.
        line:        usize,
        /// The drained error log.
        diagnostics: Vec<Diagnostic>,
    },
    /// The script itself could not be read.
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),
}

impl ScriptError {
    /// The diagnostics of an aborted run, or an empty slice for I/O failures.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Aborted { diagnostics, .. } => diagnostics,
            Self::Io(_) => &[],
        }
    }
}
