//! Convert lexed Cucumber Expression tokens into anchored regular-expression
//! sources.

use crate::errors::{PatternError, expression_error};
use crate::parameter_type::ParameterTypeRegistry;

use super::lexer::{Token, lex_expression};

/// Build an anchored regular expression from a Cucumber Expression.
///
/// Whitespace splits the expression into scopes; a scope containing `/` is
/// rendered as a non-capturing alternation.
///
/// # Errors
/// Returns [`PatternError::Expression`] when the expression is malformed or
/// names a parameter type missing from `registry`.
///
/// # Examples
/// ```
/// use cucumber_dart_patterns::{ParameterTypeRegistry, build_regex_from_expression};
///
/// let registry = ParameterTypeRegistry::dart();
/// let regex = build_regex_from_expression("I have {int} cucumber(s)", &registry)
///     .unwrap_or_else(|err| panic!("{err}"));
/// assert_eq!(regex, r"^I have (-?\d+) cucumber(?:s)?$");
/// ```
pub fn build_regex_from_expression(
    expression: &str,
    registry: &ParameterTypeRegistry,
) -> Result<String, PatternError> {
    let tokens = lex_expression(expression)?;
    let mut regex = String::with_capacity(expression.len().saturating_mul(2) + 2);
    regex.push('^');

    let mut scope: Vec<Token> = Vec::new();
    for token in tokens {
        if let Token::Whitespace(ws) = token {
            render_scope(&std::mem::take(&mut scope), registry, &mut regex)?;
            regex.push_str(&regex::escape(&ws));
        } else {
            scope.push(token);
        }
    }
    render_scope(&scope, registry, &mut regex)?;

    regex.push('$');
    Ok(regex)
}

fn render_scope(
    scope: &[Token],
    registry: &ParameterTypeRegistry,
    regex: &mut String,
) -> Result<(), PatternError> {
    let has_alternation = scope
        .iter()
        .any(|token| matches!(token, Token::Alternation { .. }));
    if !has_alternation {
        return scope
            .iter()
            .try_for_each(|token| render_token(token, registry, regex));
    }

    let mut alternatives = Vec::new();
    let mut current = String::new();
    let mut current_empty = true;
    let mut last_separator = 0usize;
    for token in scope {
        match token {
            Token::Alternation { index } => {
                if current_empty {
                    return Err(expression_error(
                        "alternative may not be empty",
                        *index,
                        None,
                    ));
                }
                alternatives.push(std::mem::take(&mut current));
                current_empty = true;
                last_separator = *index;
            }
            Token::Parameter { start, name } => {
                return Err(expression_error(
                    "parameter types cannot be alternated",
                    *start,
                    Some(name.clone()),
                ));
            }
            other => {
                render_token(other, registry, &mut current)?;
                current_empty = false;
            }
        }
    }
    if current_empty {
        return Err(expression_error(
            "alternative may not be empty",
            last_separator,
            None,
        ));
    }
    alternatives.push(current);

    regex.push_str("(?:");
    regex.push_str(&alternatives.join("|"));
    regex.push(')');
    Ok(())
}

fn render_token(
    token: &Token,
    registry: &ParameterTypeRegistry,
    regex: &mut String,
) -> Result<(), PatternError> {
    match token {
        Token::Text(text) | Token::Whitespace(text) => regex.push_str(&regex::escape(text)),
        Token::Optional { text, .. } => {
            regex.push_str("(?:");
            regex.push_str(&regex::escape(text));
            regex.push_str(")?");
        }
        Token::Parameter { start, name } => {
            let fragment = registry.regex_for(name).ok_or_else(|| {
                expression_error("undefined parameter type", *start, Some(name.clone()))
            })?;
            regex.push('(');
            regex.push_str(fragment);
            regex.push(')');
        }
        Token::Alternation { .. } => regex.push('/'),
    }
    Ok(())
}
