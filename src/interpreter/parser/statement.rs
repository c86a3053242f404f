use crate::{
    ast::Target,
    error::Diagnostic,
    interpreter::{
        evaluator::function::core::Registry,
        parser::core::{KEYWORDS, ParseResult, is_identifier},
        value::core::ValueKind,
    },
};

/// A statement whose shape has been recognised but whose expression has not
/// been parsed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementShape<'a> {
    /// What to do with the expression's value.
    pub target:     Target,
    /// The raw expression text.
    pub expression: &'a str,
}

/// Matches the tokens of a line against the four statement forms.
///
/// - `OUT = expr` prints.
/// - `name = expr` reassigns.
/// - `MAT name = expr` and `NUM name = expr` declare.
///
/// Declared names must be identifiers that are neither keywords nor
/// registered builtin names.
///
/// # Parameters
/// - `tokens`: The words of the line.
/// - `registry`: Used to reject declarations that reuse a builtin's name.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The recognised shape, or a `SyntaxError` when the tokens fit no form.
///
/// # Example
/// ```
/// use openmat::{
///     ast::Target,
///     interpreter::{
///         evaluator::function::core::Registry, parser::statement::classify,
///         value::core::ValueKind,
///     },
/// };
///
/// let registry = Registry::standard();
/// let shape = classify(&["NUM", "x", "=", "5"], &registry, 1).unwrap();
///
/// assert_eq!(shape.target,
///            Target::Declare { name: "x".to_string(),
///                              kind: ValueKind::Scalar, });
/// assert_eq!(shape.expression, "5");
///
/// assert!(classify(&["MAT", "z", "5"], &registry, 1).is_err());
/// ```
pub fn classify<'a>(tokens: &[&'a str],
                    registry: &Registry,
                    line: usize)
                    -> ParseResult<StatementShape<'a>> {
    let (target, expression) = match *tokens {
        ["OUT", "=", expression] => (Target::Output, expression),
        [name, "=", expression] => (Target::Assign { name: name.to_string() }, expression),
        [keyword, name, "=", expression] => {
            let kind = ValueKind::from_keyword(keyword).ok_or_else(|| {
                           Diagnostic::syntax(format!("expected MAT or NUM but found '{keyword}'"),
                                              line)
                       })?;
            validate_declared_name(name, registry, line)?;
            (Target::Declare { name: name.to_string(),
                               kind },
             expression)
        },
        _ => return Err(shape_error(tokens, line)),
    };

    log::trace!("line {line} classified as {target:?} of {expression:?}");
    Ok(StatementShape { target, expression })
}

fn validate_declared_name(name: &str, registry: &Registry, line: usize) -> ParseResult<()> {
    if !is_identifier(name) {
        return Err(Diagnostic::syntax(format!("'{name}' is not a valid variable name"), line));
    }
    if KEYWORDS.contains(&name) || registry.contains(name) {
        return Err(Diagnostic::syntax(format!("'{name}' is reserved"), line));
    }
    Ok(())
}

fn shape_error(tokens: &[&str], line: usize) -> Diagnostic {
    let details = match tokens.len() {
        0 => "empty statement".to_string(),
        3 | 4 => format!("expected '=' in '{}'", tokens.join(" ")),
        n => format!("a statement has 3 or 4 words but '{}' has {n}", tokens.join(" ")),
    };
    Diagnostic::syntax(details, line)
}
