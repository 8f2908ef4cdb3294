//! Step-definition specificity for disambiguation.
//!
//! When several step definitions match the same step text, the one with more
//! literal text and fewer parameters wins.

use crate::PatternError;
use crate::expression::lexer::{Token, lex_expression};
use std::cmp::Ordering;

/// Capture-group bodies that accept anything and so count as untyped.
const WILDCARDS: [&str; 4] = [".*", ".+", ".*?", ".+?"];

/// Specificity score for a step definition.
///
/// # Ordering
///
/// Definitions are compared by:
/// 1. More literal characters → more specific
/// 2. Fewer parameters → more specific
/// 3. More typed parameters → more specific (tiebreaker)
///
/// # Examples
///
/// ```
/// use cucumber_dart_patterns::SpecificityScore;
///
/// let specific = SpecificityScore::for_expression("the output is foo")
///     .unwrap_or_else(|err| panic!("{err}"));
/// let generic = SpecificityScore::for_expression("the output is {word}")
///     .unwrap_or_else(|err| panic!("{err}"));
/// assert!(specific > generic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecificityScore {
    /// Literal characters a matching step must contain.
    pub literal_chars: usize,
    /// Number of parameters or capture groups.
    pub parameter_count: usize,
    /// Parameters constrained to something narrower than "anything".
    pub typed_parameter_count: usize,
}

impl SpecificityScore {
    /// Score a Cucumber Expression. Optional and alternative text count as
    /// literal; the anonymous `{}` parameter is untyped.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the expression cannot be lexed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cucumber_dart_patterns::SpecificityScore;
    ///
    /// let score = SpecificityScore::for_expression("I have {int} apples")
    ///     .unwrap_or_else(|err| panic!("{err}"));
    /// assert_eq!(score.literal_chars, 14);
    /// assert_eq!(score.parameter_count, 1);
    /// assert_eq!(score.typed_parameter_count, 1);
    /// ```
    pub fn for_expression(expression: &str) -> Result<Self, PatternError> {
        let mut score = Self::default();
        for token in lex_expression(expression)? {
            match token {
                Token::Text(text) | Token::Whitespace(text) | Token::Optional { text, .. } => {
                    score.literal_chars += text.chars().count();
                }
                Token::Parameter { name, .. } => {
                    score.parameter_count += 1;
                    if !name.is_empty() {
                        score.typed_parameter_count += 1;
                    }
                }
                Token::Alternation { .. } => {}
            }
        }
        Ok(score)
    }

    /// Score a regular-expression definition.
    ///
    /// Characters outside capture groups and character classes count as
    /// literal unless they are regex syntax; escaped punctuation is literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use cucumber_dart_patterns::SpecificityScore;
    ///
    /// let score = SpecificityScore::for_regex(r"^I have (\d+) (.*)$");
    /// assert_eq!(score.literal_chars, 8);
    /// assert_eq!(score.parameter_count, 2);
    /// assert_eq!(score.typed_parameter_count, 1);
    /// ```
    #[must_use]
    pub fn for_regex(source: &str) -> Self {
        let mut score = Self::default();
        let mut chars = source.chars().peekable();
        let mut in_class = false;
        // Open groups; `Some(body)` for capturing groups.
        let mut groups: Vec<Option<String>> = Vec::new();

        while let Some(c) = chars.next() {
            let capturing = groups.iter().any(Option::is_some);
            match c {
                '\\' => {
                    let escaped = chars.next();
                    push_body(&mut groups, c);
                    if let Some(e) = escaped {
                        push_body(&mut groups, e);
                    }
                    let literal = escaped.is_some_and(|e| !e.is_alphanumeric());
                    if literal && !in_class && !capturing {
                        score.literal_chars += 1;
                    }
                }
                '[' if !in_class => {
                    in_class = true;
                    push_body(&mut groups, c);
                }
                ']' if in_class => {
                    in_class = false;
                    push_body(&mut groups, c);
                }
                _ if in_class => push_body(&mut groups, c),
                '(' => {
                    push_body(&mut groups, c);
                    if chars.peek() == Some(&'?') {
                        chars.next();
                        if matches!(chars.peek(), Some('P' | '<')) {
                            // Named capture group.
                            for skipped in chars.by_ref() {
                                if skipped == '>' {
                                    break;
                                }
                            }
                            score.parameter_count += 1;
                            groups.push(Some(String::new()));
                        } else {
                            while let Some(flag) = chars.next_if(|&next| next != ')') {
                                if flag == ':' {
                                    break;
                                }
                            }
                            groups.push(None);
                        }
                    } else {
                        score.parameter_count += 1;
                        groups.push(Some(String::new()));
                    }
                }
                ')' => {
                    if let Some(Some(body)) = groups.pop() {
                        if !WILDCARDS.contains(&body.as_str()) {
                            score.typed_parameter_count += 1;
                        }
                    }
                    push_body(&mut groups, c);
                }
                '^' | '$' | '.' | '*' | '+' | '?' | '|' | '{' | '}' => push_body(&mut groups, c),
                other => {
                    push_body(&mut groups, other);
                    if !capturing {
                        score.literal_chars += 1;
                    }
                }
            }
        }
        score
    }
}

fn push_body(groups: &mut [Option<String>], c: char) {
    for body in groups.iter_mut().flatten() {
        body.push(c);
    }
}

impl Ord for SpecificityScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.literal_chars.cmp(&other.literal_chars) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Fewer parameters → more specific
        match other.parameter_count.cmp(&self.parameter_count) {
            Ordering::Equal => {}
            ord => return ord,
        }

        self.typed_parameter_count
            .cmp(&other.typed_parameter_count)
    }
}

impl PartialOrd for SpecificityScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(expression: &str) -> SpecificityScore {
        match SpecificityScore::for_expression(expression) {
            Ok(s) => s,
            Err(e) => panic!("expression {expression:?} should score: {e}"),
        }
    }

    #[test]
    fn literal_only_expression_beats_parameterised() {
        let literal = score("overlap apples");
        let with_parameter = score("overlap {word}");

        assert!(literal > with_parameter);
        assert_eq!(literal.parameter_count, 0);
        assert_eq!(with_parameter.parameter_count, 1);
    }

    #[test]
    fn fewer_parameters_wins_with_equal_literals() {
        let a = score("ab {int}");
        let b = score("a {int} {int}");

        assert_eq!(a.literal_chars, 3);
        assert_eq!(b.literal_chars, 3);
        assert!(a > b);
    }

    #[test]
    fn typed_parameter_wins_as_tiebreaker() {
        let typed = score("count is {int}");
        let untyped = score("count is {}");

        assert_eq!(typed.literal_chars, untyped.literal_chars);
        assert!(typed > untyped);
    }

    #[test]
    fn optional_text_and_multibyte_characters_count() {
        let s = score("café(s) {word}");
        assert_eq!(s.literal_chars, 6);
    }

    #[test]
    fn empty_expression_has_zero_specificity() {
        assert_eq!(score(""), SpecificityScore::default());
    }

    #[test]
    fn regex_escaped_punctuation_is_literal() {
        let s = SpecificityScore::for_regex(r"^costs \$5\.00$");
        assert_eq!(s.literal_chars, 11);
        assert_eq!(s.parameter_count, 0);
    }

    #[test]
    fn regex_classes_and_non_capturing_groups_are_not_parameters() {
        let s = SpecificityScore::for_regex(r"^I (?:have) [0-9]+ (\w+)$");
        assert_eq!(s.parameter_count, 1);
        assert_eq!(s.typed_parameter_count, 1);
        assert_eq!(s.literal_chars, 8);
    }

    #[test]
    fn named_groups_are_parameters() {
        let s = SpecificityScore::for_regex(r"^(?P<count>\d+) items$");
        assert_eq!(s.parameter_count, 1);
        assert_eq!(s.typed_parameter_count, 1);
        assert_eq!(s.literal_chars, 6);
    }

    #[test]
    fn wildcard_groups_are_untyped() {
        let s = SpecificityScore::for_regex(r"^(.*) and (.+?)$");
        assert_eq!(s.parameter_count, 2);
        assert_eq!(s.typed_parameter_count, 0);
    }

    #[test]
    fn literal_rich_regex_beats_generic_expression() {
        let regex = SpecificityScore::for_regex(r"^the output is the workspace (\S+)$");
        let expression = score("the output is {word}");
        assert!(regex > expression);
    }
}
