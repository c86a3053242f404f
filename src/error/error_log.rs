use crate::error::Diagnostic;

/// Ordered collection of the diagnostics raised while processing one line.
///
/// Components record every failure they see here instead of stopping at the
/// first one, so a line such as `NUM z = ADD(a,b)` with neither `a` nor `b`
/// declared reports both. The log is cleared before each line and drained,
/// most recent first, when a line fails.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Vec<Diagnostic>,
}

impl ErrorLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends a diagnostic to the log.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        log::trace!("recorded diagnostic: {diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Returns `true` if nothing has been recorded since the last clear.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates the diagnostics in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Discards every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Empties the log, returning its entries most recent first.
    ///
    /// # Example
    /// ```
    /// use openmat::error::{Diagnostic, ErrorLog};
    ///
    /// let mut log = ErrorLog::new();
    /// log.record(Diagnostic::SingularSystem { line: 1 });
    /// log.record(Diagnostic::SingularSystem { line: 2 });
    ///
    /// let drained = log.drain_recent_first();
    /// assert_eq!(drained[0].line(), 2);
    /// assert_eq!(drained[1].line(), 1);
    /// assert!(log.is_empty());
    /// ```
    pub fn drain_recent_first(&mut self) -> Vec<Diagnostic> {
        let mut drained: Vec<_> = self.entries.drain(..).collect();
        drained.reverse();
        drained
    }
}
