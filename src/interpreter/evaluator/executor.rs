use std::io::Write;

use crate::{
    ast::Statement,
    error::Diagnostic,
    interpreter::evaluator::core::{EvalResult, Session},
};

impl<W: Write> Session<W> {
    /// Applies an evaluated statement to the session.
    ///
    /// Declarations check that the value matches the declared kind before
    /// binding it. Reassignments replace the old value, whatever its kind.
    /// Output statements print the value followed by a newline.
    pub(crate) fn execute(&mut self, statement: Statement) -> EvalResult<()> {
        let line = self.line();
        match statement {
            Statement::Declare { name, kind, value } => {
                if value.kind() != kind {
                    return Err(Diagnostic::TypeError { details: format!("'{name}' is declared as a \
                                                                         {kind} but was given a {}",
                                                                        value.kind()),
                                                       line });
                }
                self.depot_mut().insert(&name, value).map_err(|e| e.at(line))
            },
            Statement::Assign { name, value } => {
                self.depot_mut().reassign(&name, value).map_err(|e| e.at(line))
            },
            Statement::Output(value) => {
                writeln!(self.output(), "{value}").map_err(|e| Diagnostic::OutputFailed { details:
                                                                                             e.to_string(),
                                                                                         line })
            },
        }
    }
}
