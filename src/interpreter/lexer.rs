use logos::Logos;

/// Represents a lexical token of a statement line.
///
/// Statements are split on ASCII spaces only, so there is a single token kind:
/// a maximal run of non-space characters. Whatever structure a word has
/// (calls, matrix literals) is handled later by the parser.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// A run of non-space characters such as `MAT`, `=` or `ADD(x,[1,2])`.
    #[regex(r"[^ ]+", allow_greedy = true)]
    Word,
    /// Spaces between words.
    #[regex(r" +", logos::skip)]
    Ignored,
}

/// Splits a line into its space-separated words.
///
/// Runs of spaces count as one separator and leading or trailing spaces are
/// ignored. There is no quoting or escaping. Every character other than a
/// space belongs to some word, so this never fails.
///
/// # Example
/// ```
/// use openmat::interpreter::lexer::tokenize;
///
/// assert_eq!(tokenize("MAT  m = [1,2;3,4] "), vec!["MAT", "m", "=", "[1,2;3,4]"]);
/// assert!(tokenize("").is_empty());
/// ```
#[must_use]
pub fn tokenize(line: &str) -> Vec<&str> {
    let tokens: Vec<&str> = Token::lexer(line).spanned()
                                              .filter(|(token, _)| token.is_ok())
                                              .map(|(_, span)| &line[span])
                                              .collect();
    log::trace!("tokenized {line:?} into {tokens:?}");
    tokens
}
