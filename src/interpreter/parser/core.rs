use crate::error::Diagnostic;

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, Diagnostic>;

/// Words with a fixed meaning at the start of a statement.
pub const KEYWORDS: &[&str] = &["MAT", "NUM", "OUT"];

/// Returns `true` if `name` has the shape of an identifier:
/// `[A-Za-z_][A-Za-z0-9_]*`.
///
/// # Example
/// ```
/// use openmat::interpreter::parser::core::is_identifier;
///
/// assert!(is_identifier("x_1"));
/// assert!(!is_identifier("1x"));
/// assert!(!is_identifier("a(b)"));
/// assert!(!is_identifier(""));
/// ```
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next()
         .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
