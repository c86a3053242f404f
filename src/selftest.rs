use std::io::{self, Write};

use crate::{
    error::{DiagnosticKind, ScriptError},
    run_script,
};

/// What an embedded script is expected to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Run to completion, printing exactly this.
    Output(&'static str),
    /// Abort on `line`, the most recent diagnostic being of `kind`.
    Abort {
        /// Kind of the diagnostic returned for the failing line.
        kind: DiagnosticKind,
        /// The failing line.
        line: usize,
    },
}

/// One embedded script of the self-test suite.
#[derive(Debug, Clone, Copy)]
pub struct Case {
    /// Short description printed next to the verdict.
    pub name:     &'static str,
    /// Script source, lines separated by LF.
    pub script:   &'static str,
    /// What the run should produce.
    pub expected: Expectation,
}

const fn output(name: &'static str, script: &'static str, out: &'static str) -> Case {
    Case { name,
           script,
           expected: Expectation::Output(out) }
}

const fn abort(name: &'static str,
               script: &'static str,
               kind: DiagnosticKind,
               line: usize)
               -> Case {
    Case { name,
           script,
           expected: Expectation::Abort { kind, line } }
}

/// The embedded suite run when no script is given on the command line.
pub const CASES: &[Case] = &[
    output("scalar declaration", "NUM x = 5\nOUT = x\n", "5.000000\n"),
    output("nested scalar calls", "NUM y = ADD(MUL(2,3),4)\nOUT = y\n", "10.000000\n"),
    output("reassignment", "NUM x = 1\nx = ADD(x,x)\nOUT = x\n", "2.000000\n"),
    output("matrix output", "MAT m = [1,2;3,4]\nOUT = m\n", "1.000000 2.000000\n3.000000 4.000000\n"),
    output("matrix add", "OUT = MAT_ADD([1,2;3,4],[4,3;2,1])\n", "5.000000 5.000000\n5.000000 5.000000\n"),
    output("scalar multiply", "OUT = SCAL_MUL(2,[1,-1])\n", "2.000000 -2.000000\n"),
    output("matrix multiply", "OUT = MAT_MUL([1,2;3,4],[5;6])\n", "17.000000\n39.000000\n"),
    output("transpose", "OUT = TRAN([1,2,3])\n", "1.000000\n2.000000\n3.000000\n"),
    output("solve", "OUT = SOLVE([2,1,5;1,-1,1])\n", "2.000000\n1.000000\n"),
    output("depot keeps variables across lines",
           "MAT a = [1,0;0,1]\nNUM s = 3\nMAT b = SCAL_MUL(s,a)\nOUT = MAT_MUL(b,a)\n",
           "3.000000 0.000000\n0.000000 3.000000\n"),
    abort("undeclared reassignment", "x = 3\n", DiagnosticKind::UndeclaredVariable, 1),
    abort("duplicate declaration",
          "MAT m = [1,2;3,4]\nMAT m = [5,6;7,8]\n",
          DiagnosticKind::DuplicateDeclaration,
          2),
    abort("missing equals", "NUM x = 1\nMAT z 5\n", DiagnosticKind::SyntaxError, 2),
    abort("unknown function", "NUM x = POW(2,3)\n", DiagnosticKind::UnknownFunction, 1),
    abort("wrong arity", "NUM x = ADD(1,2,3)\n", DiagnosticKind::ArityError, 1),
    abort("scalar where matrix expected", "MAT m = TRAN(5)\n", DiagnosticKind::TypeError, 1),
    abort("declared kind mismatch", "NUM x = [1,2]\n", DiagnosticKind::TypeError, 1),
    abort("mismatched shapes", "OUT = MAT_ADD([1,2],[1;2])\n", DiagnosticKind::DimensionError, 1),
    abort("ragged literal", "MAT m = [1,2;3]\n", DiagnosticKind::DimensionError, 1),
    abort("singular system", "OUT = SOLVE([1,2,3;2,4,6])\n", DiagnosticKind::SingularSystem, 1),
    abort("empty line", "NUM x = 1\n\nOUT = x\n", DiagnosticKind::SyntaxError, 2),
];

impl Case {
    /// Runs the case, returning a description of the mismatch if it failed.
    #[must_use]
    pub fn check(&self) -> Option<String> {
        let mut out = Vec::new();
        let result = run_script(self.script, &mut out);
        let printed = String::from_utf8_lossy(&out);

        match (self.expected, result) {
            (Expectation::Output(expected), Ok(())) if printed == expected => None,
            (Expectation::Output(expected), Ok(())) => {
                Some(format!("expected output {expected:?}, got {printed:?}"))
            },
            (Expectation::Abort { kind, line }, Err(ScriptError::Aborted { line: found,
                                                                          diagnostics, }))
                if found == line && diagnostics.first().map(|d| d.kind()) == Some(kind) =>
            {
                None
            },
            (expected, result) => Some(format!("expected {expected:?}, got {result:?}")),
        }
    }
}

/// Runs every embedded case, writing one `PASS`/`FAIL` line per case and a
/// summary to `report`.
///
/// # Returns
/// `true` if every case passed.
pub fn run_self_tests(report: &mut impl Write) -> io::Result<bool> {
    let mut failed = 0;
    for case in CASES {
        match case.check() {
            None => writeln!(report, "PASS  {}", case.name)?,
            Some(reason) => {
                failed += 1;
                writeln!(report, "FAIL  {}: {reason}", case.name)?;
            },
        }
    }

    writeln!(report,
             "\n{} passed, {failed} failed, {} total",
             CASES.len() - failed,
             CASES.len())?;
    Ok(failed == 0)
}
