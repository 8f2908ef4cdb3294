//! Parsing of `{parameter}` and `(optional)` groups used by the lexer.

use crate::errors::{PatternError, expression_error};

use super::lexer::Cursor;

/// Consume a parameter after its opening `{` at `start` and return the name.
pub(crate) fn parse_parameter(cursor: &mut Cursor<'_>, start: usize) -> Result<String, PatternError> {
    let mut name = String::new();
    for (_, c) in cursor.by_ref() {
        match c {
            '}' => return Ok(name),
            '{' | '(' | ')' | '/' | '\\' => {
                return Err(expression_error(
                    "invalid character in parameter type name",
                    start,
                    Some(name),
                ));
            }
            c if c.is_whitespace() => {
                return Err(expression_error(
                    "invalid character in parameter type name",
                    start,
                    Some(name),
                ));
            }
            other => name.push(other),
        }
    }
    Err(expression_error(
        "missing closing '}' for parameter type",
        start,
        Some(name),
    ))
}

/// Consume optional text after its opening `(` at `start` and return the
/// unescaped content.
pub(crate) fn parse_optional(cursor: &mut Cursor<'_>, start: usize) -> Result<String, PatternError> {
    let mut text = String::new();
    while let Some((index, c)) = cursor.next() {
        match c {
            ')' => {
                if text.is_empty() {
                    return Err(expression_error(
                        "optional text must not be empty",
                        start,
                        None,
                    ));
                }
                return Ok(text);
            }
            '\\' => match cursor.next() {
                Some((_, escaped)) => text.push(escaped),
                None => text.push('\\'),
            },
            '(' => {
                return Err(expression_error(
                    "optional text cannot be nested",
                    index,
                    None,
                ));
            }
            '{' => {
                return Err(expression_error(
                    "parameter types cannot be optional",
                    index,
                    None,
                ));
            }
            other => text.push(other),
        }
    }
    Err(expression_error(
        "missing closing ')' for optional text",
        start,
        None,
    ))
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests exercise parameter parser fallibility"
)]
mod tests {
    use super::*;
    use crate::errors::ExpressionErrorInfo;

    fn info(err: PatternError) -> ExpressionErrorInfo {
        match err {
            PatternError::Expression(info) => info,
            other => panic!("unexpected error: {other}"),
        }
    }

    /// Skip the opening delimiter the lexer would already have consumed.
    fn cursor_after_open(source: &str) -> Cursor<'_> {
        let mut cursor = source.char_indices().peekable();
        cursor.next();
        cursor
    }

    #[test]
    fn parses_named_parameter() {
        let mut cursor = cursor_after_open("{int} rest");
        assert_eq!(parse_parameter(&mut cursor, 0).unwrap(), "int");
        assert_eq!(cursor.next(), Some((5, ' ')));
    }

    #[test]
    fn parses_anonymous_parameter() {
        let mut cursor = cursor_after_open("{}");
        assert_eq!(parse_parameter(&mut cursor, 0).unwrap(), "");
    }

    #[test]
    fn reports_unterminated_parameter() {
        let mut cursor = cursor_after_open("{int");
        let err = info(parse_parameter(&mut cursor, 0).unwrap_err());
        assert_eq!(err.message, "missing closing '}' for parameter type");
        assert_eq!(err.parameter.as_deref(), Some("int"));
    }

    #[test]
    fn rejects_whitespace_in_parameter_name() {
        let mut cursor = cursor_after_open("{a b}");
        let err = info(parse_parameter(&mut cursor, 0).unwrap_err());
        assert_eq!(err.message, "invalid character in parameter type name");
    }

    #[test]
    fn parses_optional_with_escapes() {
        let mut cursor = cursor_after_open(r"(s\)) x");
        assert_eq!(parse_optional(&mut cursor, 0).unwrap(), "s)");
    }

    #[test]
    fn rejects_empty_nested_and_parameter_optionals() {
        let mut cursor = cursor_after_open("()");
        let err = info(parse_optional(&mut cursor, 0).unwrap_err());
        assert_eq!(err.message, "optional text must not be empty");

        let mut cursor = cursor_after_open("(a(b))");
        let err = info(parse_optional(&mut cursor, 0).unwrap_err());
        assert_eq!(err.message, "optional text cannot be nested");
        assert_eq!(err.position, 2);

        let mut cursor = cursor_after_open("({int})");
        let err = info(parse_optional(&mut cursor, 0).unwrap_err());
        assert_eq!(err.message, "parameter types cannot be optional");
    }

    #[test]
    fn reports_unterminated_optional() {
        let mut cursor = cursor_after_open("(abc");
        let err = info(parse_optional(&mut cursor, 4).unwrap_err());
        assert_eq!(err.message, "missing closing ')' for optional text");
        assert_eq!(err.position, 4);
    }
}
