use std::io::{self, BufRead, Write};

use crate::{
    ast::ExprTree,
    error::{Diagnostic, ErrorLog, ScriptError},
    interpreter::{
        depot::Depot, evaluator::function::core::Registry, lexer::tokenize,
        parser::statement::classify,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or the
/// `Diagnostic` describing the failure.
pub type EvalResult<T> = Result<T, Diagnostic>;

/// Stores the state of one script run.
///
/// A session owns the depot of variables, the builtin registry, the error log
/// and the sink that `OUT` statements print to. Lines are numbered from 1 in
/// the order they are fed to the session.
///
/// ## Usage
///
/// Feed a whole script with [`Session::run`], or drive it line by line with
/// [`Session::run_line`]. The depot is torn down when `run` returns, whether
/// the script finished or aborted.
pub struct Session<W: Write> {
    depot:    Depot,
    registry: Registry,
    log:      ErrorLog,
    line:     usize,
    out:      W,
}

impl<W: Write> Session<W> {
    /// Creates a session with the standard builtins that prints to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self::with_registry(out, Registry::standard())
    }

    /// Creates a session with a custom set of builtins.
    #[must_use]
    pub fn with_registry(out: W, registry: Registry) -> Self {
        Self { depot: Depot::new(),
               registry,
               log: ErrorLog::new(),
               line: 0,
               out }
    }

    /// The variables declared so far.
    #[must_use]
    pub const fn depot(&self) -> &Depot {
        &self.depot
    }

    /// The builtins available to expressions.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of the last line processed, 0 before the first.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Diagnostics recorded while processing the last line.
    #[must_use]
    pub const fn errors(&self) -> &ErrorLog {
        &self.log
    }

    /// Processes one line of a script.
    ///
    /// The line is tokenized, classified, built into an expression tree,
    /// resolved and executed. On failure every diagnostic raised for the line,
    /// the returned one included, is left in [`Session::errors`].
    ///
    /// # Example
    /// ```
    /// use openmat::interpreter::evaluator::core::Session;
    ///
    /// let mut session = Session::new(Vec::new());
    /// session.run_line("NUM x = ADD(1,2)").unwrap();
    /// session.run_line("OUT = x").unwrap();
    /// assert!(session.run_line("OUT = y").is_err());
    ///
    /// assert_eq!(session.line(), 3);
    /// assert_eq!(session.errors().len(), 1);
    /// assert_eq!(String::from_utf8(session.into_output()).unwrap(), "3.000000\n");
    /// ```
    pub fn run_line(&mut self, text: &str) -> EvalResult<()> {
        self.line += 1;
        self.log.clear();
        log::debug!("line {}: {text:?}", self.line);

        self.process_line(text).inspect_err(|e| self.log.record(e.clone()))
    }

    fn process_line(&mut self, text: &str) -> EvalResult<()> {
        let line = self.line;
        let tokens = tokenize(text);
        let shape = classify(&tokens, &self.registry, line)?;
        let mut tree = ExprTree::build(shape.expression, &self.registry, line, &mut self.log)?;
        let value = tree.resolve(&self.depot, line, &mut self.log)?;
        self.execute(shape.target.with_value(value))
    }

    /// Runs a script to completion or to its first failing line.
    ///
    /// Lines are separated by LF; a final LF does not start another line.
    /// Whatever happens, the depot is torn down before returning.
    ///
    /// # Errors
    /// - [`ScriptError::Aborted`] with the failing line's diagnostics, most
    ///   recent first.
    /// - [`ScriptError::Io`] if the input cannot be read or is not UTF-8.
    ///
    /// # Example
    /// ```
    /// use openmat::{error::ScriptError, interpreter::evaluator::core::Session};
    ///
    /// let script = "NUM x = 5\nOUT = x\nOUT = y\nOUT = x\n";
    /// let mut session = Session::new(Vec::new());
    ///
    /// let Err(ScriptError::Aborted { line, .. }) = session.run(script.as_bytes()) else {
    ///     panic!("expected the script to abort");
    /// };
    /// assert_eq!(line, 3);
    /// assert!(session.depot().is_empty());
    /// assert_eq!(String::from_utf8(session.into_output()).unwrap(), "5.000000\n");
    /// ```
    pub fn run<R: BufRead>(&mut self, mut reader: R) -> Result<(), ScriptError> {
        log::info!("running script with {} builtin(s)", self.registry.names().count());
        let result = self.run_lines(&mut reader);
        let released = self.depot.teardown();

        match &result {
            Ok(()) => log::info!("script finished after {} line(s), released {released} variable(s)",
                                 self.line),
            Err(e) => log::warn!("{e}"),
        }
        result
    }

    fn run_lines<R: BufRead>(&mut self, reader: &mut R) -> Result<(), ScriptError> {
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                return Ok(());
            }
            if buffer.last() == Some(&b'\n') {
                buffer.pop();
            }

            let text = std::str::from_utf8(&buffer).map_err(|e| {
                           io::Error::new(io::ErrorKind::InvalidData,
                                          format!("line {} is not valid UTF-8: {e}", self.line + 1))
                       })?;

            if self.run_line(text).is_err() {
                return Err(ScriptError::Aborted { line:        self.line,
                                                  diagnostics: self.log.drain_recent_first(), });
            }
        }
    }

    /// Consumes the session and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    pub(crate) fn output(&mut self) -> &mut W {
        &mut self.out
    }

    pub(crate) fn depot_mut(&mut self) -> &mut Depot {
        &mut self.depot
    }
}
