//! Step-definition snippet generation.
//!
//! Given the text of an undefined step, [`SnippetGenerator`] derives:
//!
//! - a regex pattern in which every literal argument is replaced by a capture
//!   group and the remaining text is escaped;
//! - a function name built from the words left after removing arguments;
//! - a typed parameter list, one entry per argument plus one for a data table.
//!
//! These fill the six positional slots of a [`SnippetSyntax`] template:
//! keyword, escaped pattern, function name, parameter list, hint and table
//! hint. The syntax owns everything specific to the target language.

mod dart;
mod template;

use crate::argument::{ArgumentParam, ArgumentScan, Segment, argument_types, strip_arguments};
use crate::naming::DEFAULT_FUNCTION_NAME;

pub use dart::DartSnippet;

/// Hint placed in every generated body.
pub const REGEXP_HINT: &str = "Write code here that turns the phrase above into concrete actions";

const ESCAPED_CHARS: [char; 10] = ['$', '(', ')', '[', ']', '?', '*', '+', '.', '^'];

/// A data table attached to a step.
///
/// Rows are kept in source order; the first row may be a header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    /// Table cells, row by row.
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a table from rows of cells.
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Return the first row, if any.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Return `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<&gherkin::Table> for DataTable {
    fn from(table: &gherkin::Table) -> Self {
        Self::new(table.rows.clone())
    }
}

/// The undefined step a snippet is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetStep<'a> {
    /// Step text without its keyword.
    pub text: &'a str,
    /// Data table argument, when the step has one.
    pub table: Option<&'a DataTable>,
}

impl<'a> SnippetStep<'a> {
    /// Describe a step without an argument.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, table: None }
    }

    /// Attach a data table argument.
    #[must_use]
    pub fn with_table(mut self, table: &'a DataTable) -> Self {
        self.table = Some(table);
        self
    }
}

/// Delimiters wrapped around the group number of a named capture group.
///
/// With `start = "?<group"` and `end = ">"` the first group becomes
/// `(?<group1>...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedGroups {
    /// Text inserted after the opening parenthesis, before the number.
    pub start: &'static str,
    /// Text inserted after the number.
    pub end: &'static str,
}

/// Target-language rendering of a snippet.
pub trait SnippetSyntax {
    /// Template with positional slots `{0}` (keyword), `{1}` (escaped
    /// pattern), `{2}` (function name), `{3}` (parameter list), `{4}` (hint)
    /// and `{5}` (table hint). `{{` and `}}` render literal braces.
    fn template(&self) -> &str;

    /// Escape the pattern for embedding in the target language's source.
    fn escape_pattern(&self, pattern: &str) -> String;

    /// Render the parameter list.
    fn param_arguments(&self, params: &[ArgumentParam]) -> String;

    /// Comment reminding the implementer to consume the data table.
    fn table_hint(&self) -> &str;

    /// Named capture group convention, if the target uses one.
    fn named_groups(&self) -> Option<NamedGroups> {
        None
    }

    /// Function name used when no name generator is supplied.
    fn fallback_function_name(&self) -> &str {
        DEFAULT_FUNCTION_NAME
    }

    /// Adjust a generated identifier so the target language accepts it.
    fn identifier(&self, name: String) -> String {
        name
    }
}

/// Generates step-definition snippets in a given [`SnippetSyntax`].
#[derive(Debug, Clone, Default)]
pub struct SnippetGenerator<S> {
    syntax: S,
}

impl<S: SnippetSyntax> SnippetGenerator<S> {
    /// Create a generator for `syntax`.
    #[must_use]
    pub fn new(syntax: S) -> Self {
        Self { syntax }
    }

    /// Return the syntax this generator renders.
    #[must_use]
    pub fn syntax(&self) -> &S {
        &self.syntax
    }

    /// Render a snippet for `step`.
    ///
    /// `name_generator` receives the step text with arguments blanked out.
    /// When it is `None` the syntax's fallback name is used.
    ///
    /// # Examples
    ///
    /// ```
    /// use cucumber_dart_patterns::{DartSnippet, NameStyle, SnippetGenerator, SnippetStep};
    ///
    /// let generator = SnippetGenerator::new(DartSnippet::default());
    /// let name = NameStyle::Camel.generator();
    /// let snippet = generator.snippet(&SnippetStep::new("I eat 3 cukes"), "When", Some(&name));
    /// assert!(snippet.starts_with("@When(\"I eat ([-+]?\\\\d+) cukes\")"));
    /// assert!(snippet.contains("Future<void> iEatCukes(int arg1) async {"));
    /// ```
    #[must_use]
    pub fn snippet(
        &self,
        step: &SnippetStep<'_>,
        keyword: &str,
        name_generator: Option<&dyn Fn(&str) -> String>,
    ) -> String {
        let params = argument_types(step.text, step.table.is_some());
        let pattern = self.syntax.escape_pattern(&self.pattern_for(step.text));
        let function_name = self.syntax.identifier(
            Self::function_name(step.text, name_generator)
                .unwrap_or_else(|| self.syntax.fallback_function_name().to_owned()),
        );
        let parameters = self.syntax.param_arguments(&params);
        let table_hint = if step.table.is_some() {
            self.syntax.table_hint()
        } else {
            ""
        };
        log::debug!(
            "generated snippet `{function_name}` with {} parameter(s) for {:?}",
            params.len(),
            step.text
        );
        template::fill(
            self.syntax.template(),
            [
                keyword,
                &pattern,
                &function_name,
                &parameters,
                REGEXP_HINT,
                table_hint,
            ],
        )
    }

    /// Build the regex pattern a step definition for `text` should use.
    ///
    /// Literal text has `$ ( ) [ ] ? * + . ^` escaped exactly once; every
    /// argument becomes the capture group of the pattern that matched it.
    ///
    /// # Examples
    ///
    /// ```
    /// use cucumber_dart_patterns::{DartSnippet, SnippetGenerator};
    ///
    /// let generator = SnippetGenerator::new(DartSnippet::default());
    /// assert_eq!(
    ///     generator.pattern_for("I pay (cash) for 2 \"items\""),
    ///     r#"I pay \(cash\) for ([-+]?\d+) "([^"]*)""#
    /// );
    /// ```
    #[must_use]
    pub fn pattern_for(&self, text: &str) -> String {
        let mut pattern = String::with_capacity(text.len().saturating_mul(2));
        for segment in ArgumentScan::new(text) {
            match segment {
                Segment::Literal(literal) => pattern.push_str(&escape_literal(literal)),
                Segment::Argument { pattern: argument, .. } => pattern.push_str(argument.source()),
            }
        }
        match self.syntax.named_groups() {
            Some(groups) => with_named_groups(&pattern, groups),
            None => pattern,
        }
    }

    /// Derive the function name for `text`, or `None` without a generator.
    #[must_use]
    pub fn function_name(
        text: &str,
        name_generator: Option<&dyn Fn(&str) -> String>,
    ) -> Option<String> {
        name_generator.map(|generate| generate(&strip_arguments(text)))
    }
}

/// Render a Dart snippet for a step.
///
/// # Examples
///
/// ```
/// use cucumber_dart_patterns::{NameStyle, generate_snippet};
///
/// let name = NameStyle::Camel.generator();
/// let snippet = generate_snippet("I am logged in", "Given", None, Some(&name));
/// assert!(snippet.contains("Future<void> iAmLoggedIn() async {"));
/// ```
#[must_use]
pub fn generate_snippet(
    text: &str,
    keyword: &str,
    table: Option<&DataTable>,
    name_generator: Option<&dyn Fn(&str) -> String>,
) -> String {
    let step = SnippetStep { text, table };
    SnippetGenerator::new(DartSnippet::default()).snippet(&step, keyword, name_generator)
}

/// Escape the regex metacharacters `$ ( ) [ ] ? * + . ^` in `text`.
///
/// # Examples
///
/// ```
/// use cucumber_dart_patterns::escape_literal;
///
/// assert_eq!(escape_literal("cost: $3.00?"), r"cost: \$3\.00\?");
/// ```
#[must_use]
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPED_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn with_named_groups(pattern: &str, groups: NamedGroups) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;
    let mut number = 0usize;
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '(' if !in_class && chars.peek() != Some(&'?') => {
                number += 1;
                out.push_str(groups.start);
                out.push_str(&number.to_string());
                out.push_str(groups.end);
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NamedSyntax;

    impl SnippetSyntax for NamedSyntax {
        fn template(&self) -> &str {
            "{0}|{1}|{2}|{3}|{4}|{5}"
        }

        fn escape_pattern(&self, pattern: &str) -> String {
            pattern.to_owned()
        }

        fn param_arguments(&self, params: &[ArgumentParam]) -> String {
            params
                .iter()
                .map(|param| param.kind.as_str())
                .collect::<Vec<_>>()
                .join(",")
        }

        fn table_hint(&self) -> &str {
            "TABLE"
        }

        fn named_groups(&self) -> Option<NamedGroups> {
            Some(NamedGroups {
                start: "?<group",
                end: ">",
            })
        }
    }

    #[test]
    fn escapes_metacharacters_once() {
        let generator = SnippetGenerator::new(DartSnippet::default());
        let pattern = generator.pattern_for("is it (really) [ok]?");
        assert_eq!(pattern, r"is it \(really\) \[ok\]\?");
        assert!(!pattern.contains(r"\\"));
    }

    #[test]
    fn leaves_other_characters_alone() {
        assert_eq!(escape_literal(r"a{b}|c\d"), r"a{b}|c\d");
    }

    #[test]
    fn replaces_arguments_with_groups() {
        let generator = SnippetGenerator::new(DartSnippet::default());
        assert_eq!(
            generator.pattern_for(r#"I have 3 "cucumbers" in my <place>"#),
            r#"I have ([-+]?\d+) "([^"]*)" in my <([^>]*)>"#
        );
    }

    #[test]
    fn signed_numbers_are_grouped_not_escaped() {
        let generator = SnippetGenerator::new(DartSnippet::default());
        assert_eq!(generator.pattern_for("add +5"), r"add ([-+]?\d+)");
        assert_eq!(
            generator.pattern_for("add .5"),
            r"add ([+-]?(?:[0-9]*[.])?[0-9]+)"
        );
    }

    #[test]
    fn numbers_named_groups_left_to_right() {
        let generator = SnippetGenerator::new(NamedSyntax);
        assert_eq!(
            generator.pattern_for(r#"(x) "a" then 2 then .5"#),
            r#"\(x\) "(?<group1>[^"]*)" then (?<group2>[-+]?\d+) then (?<group3>[+-]?(?:[0-9]*[.])?[0-9]+)"#
        );
    }

    #[test]
    fn renders_slots_in_order() {
        let generator = SnippetGenerator::new(NamedSyntax);
        let name = |phrase: &str| format!("<{phrase}>");
        let table = DataTable::new(vec![vec!["a".into()]]);
        let step = SnippetStep::new("take 1").with_table(&table);
        assert_eq!(
            generator.snippet(&step, "When", Some(&name)),
            format!("When|take (?<group1>[-+]?\\d+)|<take  >|integer,table|{REGEXP_HINT}|TABLE")
        );
    }

    #[test]
    fn missing_generator_uses_fallback_name() {
        let generator = SnippetGenerator::new(NamedSyntax);
        let snippet = generator.snippet(&SnippetStep::new(""), "Given", None);
        assert_eq!(snippet, format!("Given||step||{REGEXP_HINT}|"));
    }

    #[test]
    fn function_name_receives_blanked_phrase() {
        let seen = std::cell::RefCell::new(String::new());
        let record = |phrase: &str| {
            seen.replace(phrase.to_owned());
            "recorded".to_owned()
        };
        let name = SnippetGenerator::<DartSnippet>::function_name(
            r#"I have 3 "cucumbers" in my <place>"#,
            Some(&record),
        );
        assert_eq!(name.as_deref(), Some("recorded"));
        assert_eq!(seen.borrow().as_str(), "I have     in my  ");
    }

    #[test]
    fn table_header_is_first_row() {
        let table = DataTable::new(vec![
            vec!["name".into(), "age".into()],
            vec!["Ann".into(), "30".into()],
        ]);
        assert_eq!(table.header(), Some(["name".to_owned(), "age".to_owned()].as_slice()));
        assert!(DataTable::default().is_empty());
    }
}
