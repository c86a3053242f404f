use crate::{error::Diagnostic, interpreter::parser::core::ParseResult};

/// A call expression split into its function name and raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallParts<'a> {
    /// Text before the first `(`.
    pub name:      &'a str,
    /// Top-level argument substrings, in order.
    pub arguments: Vec<&'a str>,
}

/// Splits a call expression such as `ADD(MUL(2,3),4)` into its name and
/// top-level arguments.
///
/// Scanning starts after the first `(`. Every `(` or `[` opens a nesting
/// level and every `)` or `]` closes one; commas only separate arguments
/// while no nested level is open. The parenthesis matching the first `(` must
/// be the last character of the expression.
///
/// An empty argument list (`F()`) yields no arguments. There is no limit on
/// the number of arguments.
///
/// # Errors
/// A `SyntaxError` when the expression has no `(`, its brackets are
/// unbalanced, text follows the closing parenthesis, or an argument is empty.
///
/// # Example
/// ```
/// use openmat::interpreter::parser::splitter::split_call;
///
/// let parts = split_call("MAT_ADD(TRAN([1,2;3,4]),m)", 1).unwrap();
///
/// assert_eq!(parts.name, "MAT_ADD");
/// assert_eq!(parts.arguments, vec!["TRAN([1,2;3,4])", "m"]);
/// ```
pub fn split_call(text: &str, line: usize) -> ParseResult<CallParts<'_>> {
    let open = text.find('(')
                   .ok_or_else(|| Diagnostic::syntax(format!("'{text}' is not a call"), line))?;
    let name = &text[..open];

    let mut depth = 0usize;
    let mut start = open + 1;
    let mut arguments = Vec::new();
    let mut close = None;

    for (index, c) in text.char_indices().skip_while(|&(i, _)| i <= open) {
        match c {
            '(' | '[' => depth += 1,
            ')' if depth == 0 => {
                close = Some(index);
                break;
            },
            ')' | ']' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                                                 Diagnostic::syntax(format!("unbalanced '{c}' in '{text}'"),
                                                                    line)
                                             })?;
            },
            ',' if depth == 0 => {
                arguments.push(&text[start..index]);
                start = index + 1;
            },
            _ => {},
        }
    }

    let close = close.ok_or_else(|| {
                         Diagnostic::syntax(format!("missing closing parenthesis in '{text}'"), line)
                     })?;
    if close + 1 != text.len() {
        return Err(Diagnostic::syntax(format!("unexpected '{}' after the call to '{name}'",
                                              &text[close + 1..]),
                                      line));
    }

    let last = &text[start..close];
    if !(arguments.is_empty() && last.is_empty()) {
        arguments.push(last);
    }
    if arguments.iter().any(|argument| argument.is_empty()) {
        return Err(Diagnostic::syntax(format!("empty argument in '{text}'"), line));
    }

    log::trace!("split {text:?} into {name:?} with arguments {arguments:?}");
    Ok(CallParts { name, arguments })
}
