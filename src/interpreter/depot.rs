use indexmap::IndexMap;
use thiserror::Error;

use crate::{error::Diagnostic, interpreter::value::core::Value};

/// Failures of depot operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepotError {
    /// The name is already bound.
    #[error("variable '{0}' is already declared")]
    Duplicate(String),
    /// The name is not bound.
    #[error("variable '{0}' has not been declared")]
    Undeclared(String),
}

impl DepotError {
    /// Converts the failure into a diagnostic for `line`.
    #[must_use]
    pub fn at(self, line: usize) -> Diagnostic {
        match self {
            Self::Duplicate(name) => Diagnostic::DuplicateDeclaration { name, line },
            Self::Undeclared(name) => Diagnostic::UndeclaredVariable { name, line },
        }
    }
}

/// The symbol table of one script run.
///
/// A single flat namespace mapping case-sensitive names to values. Every value
/// stored here is owned by its binding; reassigning or tearing down the depot
/// drops the values it held. Bindings iterate in declaration order, so
/// identical scripts always produce identical depots.
#[derive(Debug, Default)]
pub struct Depot {
    bindings: IndexMap<String, Value>,
}

impl Depot {
    /// Creates an empty depot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a new name.
    ///
    /// # Errors
    /// [`DepotError::Duplicate`] if `name` is already bound. The existing
    /// binding is left untouched.
    ///
    /// # Example
    /// ```
    /// use openmat::interpreter::{depot::{Depot, DepotError}, value::core::Value};
    ///
    /// let mut depot = Depot::new();
    /// depot.insert("x", Value::Scalar(1.0)).unwrap();
    ///
    /// let again = depot.insert("x", Value::Scalar(2.0));
    /// assert_eq!(again, Err(DepotError::Duplicate("x".to_string())));
    /// assert_eq!(depot.lookup("x"), Ok(&Value::Scalar(1.0)));
    /// ```
    pub fn insert(&mut self, name: &str, value: Value) -> Result<(), DepotError> {
        if self.bindings.contains_key(name) {
            return Err(DepotError::Duplicate(name.to_string()));
        }
        log::debug!("declared '{name}' as a {}", value.kind());
        self.bindings.insert(name.to_string(), value);
        Ok(())
    }

    /// Returns the value bound to `name`.
    ///
    /// # Errors
    /// [`DepotError::Undeclared`] if `name` is not bound.
    pub fn lookup(&self, name: &str) -> Result<&Value, DepotError> {
        self.bindings
            .get(name)
            .ok_or_else(|| DepotError::Undeclared(name.to_string()))
    }

    /// Replaces the value bound to `name`, dropping the old one.
    ///
    /// The new value may be of a different kind than the old one.
    ///
    /// # Errors
    /// [`DepotError::Undeclared`] if `name` is not bound.
    pub fn reassign(&mut self, name: &str, value: Value) -> Result<(), DepotError> {
        let slot = self.bindings
                       .get_mut(name)
                       .ok_or_else(|| DepotError::Undeclared(name.to_string()))?;
        log::debug!("reassigned '{name}' from a {} to a {}",
                    slot.kind(),
                    value.kind());
        *slot = value;
        Ok(())
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Releases every binding. Returns how many were released.
    pub fn teardown(&mut self) -> usize {
        let released = self.bindings.len();
        self.bindings.clear();
        log::debug!("depot torn down, released {released} binding(s)");
        released
    }
}
