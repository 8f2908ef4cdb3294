//! Literal argument detection in undefined step text.
//!
//! A step such as `I have 3 "cucumbers" in my <place>` carries literal values
//! that a generated step definition should capture. The fixed, ordered list
//! of [`ArgumentPattern`]s recognises them; at any text position the first
//! pattern in priority order that matches there wins.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Semantic type inferred for a captured argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    /// Whole number such as `3` or `-12`.
    Integer,
    /// Number with a fractional part such as `.5`.
    Decimal,
    /// Quoted string or `<placeholder>`.
    String,
    /// Data table attached to the step.
    DataTable,
}

impl ArgumentType {
    /// Return a lower-case label for the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::DataTable => "table",
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A match rule for one kind of literal argument.
#[derive(Debug, Clone)]
pub struct ArgumentPattern {
    source: &'static str,
    anchored: Regex,
    kind: ArgumentType,
}

impl ArgumentPattern {
    fn new(source: &'static str, kind: ArgumentType) -> Self {
        // Generated definitions are matched with ASCII-only `\d`.
        let ascii = source.replace(r"\d", "[0-9]");
        let anchored = Regex::new(&format!("^(?:{ascii})")).unwrap_or_else(|_| unreachable!());
        Self {
            source,
            anchored,
            kind,
        }
    }

    /// Regex source that matches this argument, including its capture group.
    ///
    /// # Examples
    ///
    /// ```
    /// use cucumber_dart_patterns::argument_patterns;
    ///
    /// let integer = argument_patterns().first().map(|p| p.source());
    /// assert_eq!(integer, Some(r"([-+]?\d+)"));
    /// ```
    #[must_use]
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Semantic type of values matched by this pattern.
    #[must_use]
    pub fn kind(&self) -> ArgumentType {
        self.kind
    }

    /// Return the length of the match starting exactly at the beginning of
    /// `text`, if any.
    #[must_use]
    pub fn match_len(&self, text: &str) -> Option<usize> {
        self.anchored
            .find(text)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

impl PartialEq for ArgumentPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.kind == other.kind
    }
}

impl Eq for ArgumentPattern {}

static DEFAULT_ARGUMENT_PATTERNS: LazyLock<[ArgumentPattern; 4]> = LazyLock::new(|| {
    [
        ArgumentPattern::new(r"([-+]?\d+)", ArgumentType::Integer),
        ArgumentPattern::new(r"([+-]?(?:[0-9]*[.])?[0-9]+)", ArgumentType::Decimal),
        ArgumentPattern::new(r#""([^"]*)""#, ArgumentType::String),
        ArgumentPattern::new(r"<([^>]*)>", ArgumentType::String),
    ]
});

/// The fixed argument patterns in priority order: integer, decimal, quoted
/// string, angle-bracket placeholder.
#[must_use]
pub fn argument_patterns() -> &'static [ArgumentPattern] {
    DEFAULT_ARGUMENT_PATTERNS.as_slice()
}

/// A parameter inferred for a generated step definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentParam {
    /// Inferred semantic type.
    pub kind: ArgumentType,
    /// Name taken from a `<name>` or `"<name>"` placeholder.
    pub name: Option<String>,
}

impl ArgumentParam {
    /// Create an unnamed parameter.
    #[must_use]
    pub fn unnamed(kind: ArgumentType) -> Self {
        Self { kind, name: None }
    }

    /// Create a parameter named after a placeholder.
    #[must_use]
    pub fn named(kind: ArgumentType, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
        }
    }

    fn from_match(kind: ArgumentType, matched: &str) -> Self {
        let placeholder = matched
            .strip_prefix("\"<")
            .and_then(|rest| rest.strip_suffix(">\""))
            .or_else(|| {
                matched
                    .strip_prefix('<')
                    .and_then(|rest| rest.strip_suffix('>'))
            });
        Self {
            kind,
            name: placeholder.map(str::to_owned),
        }
    }
}

/// A piece of step text produced by [`ArgumentScan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text that no argument pattern matched.
    Literal(&'a str),
    /// Text matched by an argument pattern.
    Argument {
        /// The pattern that matched.
        pattern: &'static ArgumentPattern,
        /// The matched text.
        text: &'a str,
    },
}

/// Left-to-right scan of step text into literal and argument segments.
///
/// Each step advances by the length of the winning match, or by one
/// character when nothing matches, so the scan always terminates after at
/// most one step per character.
///
/// # Examples
///
/// ```
/// use cucumber_dart_patterns::{ArgumentScan, Segment};
///
/// let segments: Vec<_> = ArgumentScan::new("take 2 steps").collect();
/// assert_eq!(segments.len(), 3);
/// assert!(matches!(segments.first(), Some(Segment::Literal("take "))));
/// ```
#[derive(Debug, Clone)]
pub struct ArgumentScan<'a> {
    text: &'a str,
    pos: usize,
    steps: usize,
}

impl<'a> ArgumentScan<'a> {
    /// Start scanning `text` from its first character.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            steps: 0,
        }
    }

    /// Current byte offset of the scan.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of positions examined so far.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn argument_at(&mut self) -> Option<(&'static ArgumentPattern, usize)> {
        let rest = self.text.get(self.pos..)?;
        self.steps += 1;
        argument_patterns()
            .iter()
            .find_map(|pattern| pattern.match_len(rest).map(|len| (pattern, len)))
    }

    fn advance_one_char(&mut self) {
        let width = self
            .text
            .get(self.pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        self.pos += width;
    }
}

impl<'a> Iterator for ArgumentScan<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        if let Some((pattern, len)) = self.argument_at() {
            self.pos += len;
            let text = self.text.get(start..self.pos)?;
            return Some(Segment::Argument { pattern, text });
        }
        self.advance_one_char();
        while self.pos < self.text.len() {
            let checkpoint = self.pos;
            if self.argument_at().is_some() {
                // Rescanned on the next call.
                self.steps -= 1;
                self.pos = checkpoint;
                break;
            }
            self.advance_one_char();
        }
        self.text.get(start..self.pos).map(Segment::Literal)
    }
}

/// Infer the parameters a step definition for `text` needs.
///
/// A present `table` appends one [`ArgumentType::DataTable`] parameter.
///
/// # Examples
///
/// ```
/// use cucumber_dart_patterns::{ArgumentParam, ArgumentType, argument_types};
///
/// let params = argument_types(r#"I have 3 "cucumbers" in my <place>"#, false);
/// assert_eq!(
///     params,
///     vec![
///         ArgumentParam::unnamed(ArgumentType::Integer),
///         ArgumentParam::unnamed(ArgumentType::String),
///         ArgumentParam::named(ArgumentType::String, "place"),
///     ]
/// );
/// ```
#[must_use]
pub fn argument_types(text: &str, table: bool) -> Vec<ArgumentParam> {
    let mut params: Vec<ArgumentParam> = ArgumentScan::new(text)
        .filter_map(|segment| match segment {
            Segment::Argument { pattern, text } => {
                Some(ArgumentParam::from_match(pattern.kind(), text))
            }
            Segment::Literal(_) => None,
        })
        .collect();
    if table {
        params.push(ArgumentParam::unnamed(ArgumentType::DataTable));
    }
    params
}

/// Replace every argument in `text` with a single space.
///
/// # Examples
///
/// ```
/// use cucumber_dart_patterns::strip_arguments;
///
/// assert_eq!(strip_arguments("I eat 3 cukes"), "I eat   cukes");
/// ```
#[must_use]
pub fn strip_arguments(text: &str) -> String {
    ArgumentScan::new(text)
        .map(|segment| match segment {
            Segment::Literal(literal) => literal,
            Segment::Argument { .. } => " ",
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(text: &str) -> Vec<ArgumentType> {
        argument_types(text, false)
            .into_iter()
            .map(|param| param.kind)
            .collect()
    }

    #[test]
    fn scan_reaches_end_of_text_within_bound() {
        let text = r#"I have 3 "cucumbers" in my <place>"#;
        let mut scan = ArgumentScan::new(text);
        let mut arguments = 0;
        for segment in scan.by_ref() {
            if matches!(segment, Segment::Argument { .. }) {
                arguments += 1;
            }
        }
        assert_eq!(arguments, 3);
        assert_eq!(scan.position(), text.len());
        assert!(scan.steps() <= text.chars().count());
    }

    #[test]
    fn empty_text_yields_nothing() {
        let mut scan = ArgumentScan::new("");
        assert_eq!(scan.next(), None);
        assert_eq!(scan.position(), 0);
        assert_eq!(scan.steps(), 0);
        assert!(argument_types("", false).is_empty());
    }

    #[test]
    fn text_without_arguments_yields_one_literal() {
        let segments: Vec<_> = ArgumentScan::new("a plain step").collect();
        assert_eq!(segments, vec![Segment::Literal("a plain step")]);
        assert!(argument_types("a plain step", false).is_empty());
    }

    #[rstest]
    #[case::integer("I eat 12 cukes", vec![ArgumentType::Integer])]
    #[case::signed("move -3 squares", vec![ArgumentType::Integer])]
    #[case::leading_dot_decimal("add .5 cups", vec![ArgumentType::Decimal])]
    #[case::dotted_number_splits_at_point("pay 3.50", vec![ArgumentType::Integer, ArgumentType::Decimal])]
    #[case::quoted("say \"hello 3\"", vec![ArgumentType::String])]
    #[case::empty_quotes("say \"\"", vec![ArgumentType::String])]
    #[case::placeholder("visit <page>", vec![ArgumentType::String])]
    #[case::unclosed_quote("say \"hi", vec![])]
    #[case::non_ascii_digit("I have \u{0663} apples", vec![])]
    #[case::fullwidth_digit("move \u{FF13} squares", vec![])]
    fn infers_argument_kinds(#[case] text: &str, #[case] expected: Vec<ArgumentType>) {
        assert_eq!(kinds(text), expected);
    }

    #[test]
    fn names_quoted_placeholders() {
        let params = argument_types(r#"I log in as "<user>""#, false);
        assert_eq!(params, vec![ArgumentParam::named(ArgumentType::String, "user")]);
    }

    #[test]
    fn quoted_text_with_angle_inside_stays_unnamed() {
        let params = argument_types(r#"print "<a> b""#, false);
        assert_eq!(params, vec![ArgumentParam::unnamed(ArgumentType::String)]);
    }

    #[test]
    fn table_appends_data_table_param() {
        let params = argument_types("the following 2 users", true);
        assert_eq!(
            params,
            vec![
                ArgumentParam::unnamed(ArgumentType::Integer),
                ArgumentParam::unnamed(ArgumentType::DataTable),
            ]
        );
    }

    #[test]
    fn strips_arguments_to_single_spaces() {
        assert_eq!(
            strip_arguments(r#"I have 3 "cucumbers" in my <place>"#),
            "I have     in my  "
        );
    }

    #[test]
    fn handles_multibyte_literals() {
        let text = "café has 2 crêpes";
        let mut scan = ArgumentScan::new(text);
        let segments: Vec<_> = scan.by_ref().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(scan.position(), text.len());
    }
}
