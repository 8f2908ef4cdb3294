//! Lexer turning Cucumber Expression text into semantic tokens.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::errors::{PatternError, expression_error};

use super::parameter::{parse_optional, parse_parameter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Text(String),
    Whitespace(String),
    Parameter { start: usize, name: String },
    Optional { start: usize, text: String },
    Alternation { index: usize },
}

pub(crate) type Cursor<'a> = Peekable<CharIndices<'a>>;

pub(crate) fn lex_expression(expression: &str) -> Result<Vec<Token>, PatternError> {
    let mut cursor = expression.char_indices().peekable();
    let mut tokens = Vec::new();
    let mut text = String::new();

    let flush_text = |text: &mut String, tokens: &mut Vec<Token>| {
        if !text.is_empty() {
            tokens.push(Token::Text(std::mem::take(text)));
        }
    };

    while let Some((index, c)) = cursor.next() {
        match c {
            '\\' => match cursor.next() {
                Some((_, escaped)) => text.push(escaped),
                None => text.push('\\'),
            },
            c if c.is_whitespace() => {
                flush_text(&mut text, &mut tokens);
                let mut run = String::from(c);
                while let Some(&(_, next)) = cursor.peek() {
                    if !next.is_whitespace() {
                        break;
                    }
                    run.push(next);
                    cursor.next();
                }
                tokens.push(Token::Whitespace(run));
            }
            '{' => {
                flush_text(&mut text, &mut tokens);
                let name = parse_parameter(&mut cursor, index)?;
                tokens.push(Token::Parameter { start: index, name });
            }
            '(' => {
                flush_text(&mut text, &mut tokens);
                let optional = parse_optional(&mut cursor, index)?;
                tokens.push(Token::Optional {
                    start: index,
                    text: optional,
                });
            }
            '/' => {
                flush_text(&mut text, &mut tokens);
                tokens.push(Token::Alternation { index });
            }
            '}' => {
                return Err(expression_error(
                    "unmatched closing '}' in expression",
                    index,
                    None,
                ));
            }
            ')' => {
                return Err(expression_error(
                    "unmatched closing ')' in expression",
                    index,
                    None,
                ));
            }
            other => text.push(other),
        }
    }

    flush_text(&mut text, &mut tokens);
    Ok(tokens)
}
