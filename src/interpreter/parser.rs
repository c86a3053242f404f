/// Shared parser definitions.
///
/// The parser result type, reserved keywords and identifier checks.
pub mod core;
/// Literal parsing.
///
/// Reads scalar literals and bracketed matrix literals, validating that
/// matrices are rectangular.
pub mod literal;
/// Call expression splitting.
///
/// Separates a call into its function name and top-level arguments while
/// respecting nested parentheses and brackets.
pub mod splitter;
/// Statement classification.
///
/// Recognises the four statement forms from a line's tokens.
pub mod statement;
/// Expression tree construction.
///
/// Turns an expression into an arena of literal, variable and call nodes.
pub mod tree;
