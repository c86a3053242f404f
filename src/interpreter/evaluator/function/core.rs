use indexmap::IndexMap;

use crate::{
    error::Diagnostic,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::{builtin, solve, transpose},
        },
        value::core::{Value, ValueKind},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of resolved argument values and the line number.
/// Operand kinds have already been checked against the entry's signature when
/// it is called through [`BuiltinDef::invoke`].
pub type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// A registry entry: everything the engine needs to know about one builtin.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinDef {
    /// The name scripts call it by.
    pub name:     &'static str,
    /// Expected kind of each operand, in order. Its length is the arity.
    pub operands: &'static [ValueKind],
    /// Kind of the value it produces.
    pub result:   ValueKind,
    /// The implementation.
    pub func:     BuiltinFn,
}

/// Defines the standard builtins by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the operand kinds (which also fix the arity),
/// - the result kind,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `STANDARD_BUILTINS` (static table used to seed a [`Registry`]),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                operands: [$($operand:ident),* $(,)?],
                result: $result:ident,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static STANDARD_BUILTINS: &[BuiltinDef] = &[
            $(
                BuiltinDef { name:     $name,
                             operands: &[$(ValueKind::$operand),*],
                             result:   ValueKind::$result,
                             func:     $func },
            )*
        ];
        /// Names of every builtin in the standard registry.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "ADD"      => { operands: [Scalar, Scalar], result: Scalar, func: builtin::add },
    "MUL"      => { operands: [Scalar, Scalar], result: Scalar, func: builtin::mul },
    "MAT_ADD"  => { operands: [Matrix, Matrix], result: Matrix, func: builtin::mat_add },
    "SCAL_MUL" => { operands: [Scalar, Matrix], result: Matrix, func: builtin::scal_mul },
    "MAT_MUL"  => { operands: [Matrix, Matrix], result: Matrix, func: builtin::mat_mul },
    "TRAN"     => { operands: [Matrix],         result: Matrix, func: transpose::transpose },
    "SOLVE"    => { operands: [Matrix],         result: Matrix, func: solve::solve },
}

impl BuiltinDef {
    /// Number of arguments the builtin takes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.operands.len()
    }

    /// Checks the arguments against the signature and runs the builtin.
    ///
    /// # Errors
    /// - `ArityError` if the argument count differs from the arity.
    /// - `TypeError` if an operand has the wrong kind, or the implementation
    ///   returned a value of a kind other than the declared result.
    /// - Whatever the implementation itself reports.
    ///
    /// # Example
    /// ```
    /// use openmat::interpreter::{evaluator::function::core::Registry, value::core::Value};
    ///
    /// let registry = Registry::standard();
    /// let add = registry.get("ADD").unwrap();
    ///
    /// let sum = add.invoke(&[Value::Scalar(2.0), Value::Scalar(3.0)], 1).unwrap();
    /// assert_eq!(sum, Value::Scalar(5.0));
    /// ```
    pub fn invoke(&self, args: &[Value], line: usize) -> EvalResult<Value> {
        self.check_arity(args.len(), line)?;

        for (index, (arg, expected)) in args.iter().zip(self.operands).enumerate() {
            if arg.kind() != *expected {
                return Err(Diagnostic::TypeError { details: format!("argument {} of {} must be a {expected} but is a {}",
                                                                    index + 1,
                                                                    self.name,
                                                                    arg.kind()),
                                                   line });
            }
        }

        let value = (self.func)(args, line)?;
        if value.kind() != self.result {
            return Err(Diagnostic::TypeError { details: format!("{} produced a {} instead of a {}",
                                                                self.name,
                                                                value.kind(),
                                                                self.result),
                                               line });
        }
        Ok(value)
    }

    /// Fails with `ArityError` unless `found` equals the arity.
    pub fn check_arity(&self, found: usize, line: usize) -> EvalResult<()> {
        if found == self.arity() {
            return Ok(());
        }
        Err(Diagnostic::ArityError { name: self.name.to_string(),
                                     expected: self.arity(),
                                     found,
                                     line })
    }
}

/// Maps builtin names to their definitions.
///
/// Built once per session, normally from [`Registry::standard`]. Adding a
/// builtin only needs a new [`BuiltinDef`]; nothing else in the engine
/// dispatches on names.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: IndexMap<&'static str, BuiltinDef>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl Registry {
    /// A registry with no builtins.
    #[must_use]
    pub fn empty() -> Self {
        Self { entries: IndexMap::new() }
    }

    /// A registry holding every standard builtin.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for def in STANDARD_BUILTINS {
            registry.register(*def);
        }
        registry
    }

    /// Adds a builtin, returning the definition it replaced, if any.
    pub fn register(&mut self, def: BuiltinDef) -> Option<BuiltinDef> {
        self.entries.insert(def.name, def)
    }

    /// Looks up a builtin by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BuiltinDef> {
        self.entries.get(name)
    }

    /// Returns `true` if `name` is a registered builtin.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates the registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

/// Destructures `args` into exactly `N` operands.
///
/// Builtins use this instead of indexing so that being handed a slice of the
/// wrong length reports an `ArityError` instead of panicking.
///
/// # Example
/// ```
/// use openmat::interpreter::{evaluator::function::core::expect_args, value::core::Value};
///
/// let args = [Value::Scalar(1.0), Value::Scalar(2.0)];
/// let [a, b] = expect_args::<2>(&args, "ADD", 1).unwrap();
/// assert_eq!((a, b), (&Value::Scalar(1.0), &Value::Scalar(2.0)));
///
/// assert!(expect_args::<1>(&args, "TRAN", 1).is_err());
/// ```
pub fn expect_args<'a, const N: usize>(args: &'a [Value],
                                       name: &str,
                                       line: usize)
                                       -> EvalResult<&'a [Value; N]> {
    <&[Value; N]>::try_from(args).map_err(|_| Diagnostic::ArityError { name: name.to_string(),
                                                                       expected: N,
                                                                       found: args.len(),
                                                                       line })
}
