//! Step-definition compilation and matching.
//!
//! A step definition is either a Cucumber Expression or a regular
//! expression; [`classify`](crate::classify) decides which, and the result is
//! compiled into one anchored [`Regex`].

mod compiler;
pub(crate) mod lexer;
mod parameter;

use regex::Regex;

use crate::capture::{CapturedArgument, extract_captured_arguments};
use crate::classify::{ExpressionKind, classify};
use crate::errors::PatternError;
use crate::parameter_type::ParameterTypeRegistry;
use crate::specificity::SpecificityScore;

pub use compiler::build_regex_from_expression;

/// Build the anchored regex source for a step definition of either kind.
///
/// Regex definitions lose their `/.../` delimiters and are wrapped in
/// `^(?:...)$` unless already anchored at both ends.
///
/// # Errors
/// Returns [`PatternError`] when a Cucumber Expression is malformed.
///
/// # Examples
/// ```
/// use cucumber_dart_patterns::{ParameterTypeRegistry, build_regex_from_definition};
///
/// let registry = ParameterTypeRegistry::dart();
/// let build = |source| {
///     build_regex_from_definition(source, &registry).unwrap_or_else(|err| panic!("{err}"))
/// };
/// assert_eq!(build(r"^I have (\d+)$"), r"^I have (\d+)$");
/// assert_eq!(build(r"/I have (\d+)/"), r"^(?:I have (\d+))$");
/// assert_eq!(build("I have {int}"), r"^I have (-?\d+)$");
/// ```
pub fn build_regex_from_definition(
    source: &str,
    registry: &ParameterTypeRegistry,
) -> Result<String, PatternError> {
    match classify(source) {
        ExpressionKind::CucumberExpression => build_regex_from_expression(source, registry),
        ExpressionKind::RegularExpression => Ok(anchor_regex(source)),
    }
}

fn anchor_regex(source: &str) -> String {
    let body = source
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
        .unwrap_or(source);
    let anchored_end = body.ends_with('$') && !body.ends_with("\\$");
    if body.starts_with('^') && anchored_end {
        body.to_owned()
    } else {
        format!("^(?:{body})$")
    }
}

/// A compiled step definition.
///
/// # Examples
/// ```
/// use cucumber_dart_patterns::{ExpressionKind, ParameterTypeRegistry, StepDefinitionPattern};
///
/// let registry = ParameterTypeRegistry::dart();
/// let pattern = StepDefinitionPattern::compile("I have {int} cucumber(s)", &registry)
///     .unwrap_or_else(|err| panic!("{err}"));
/// assert_eq!(pattern.kind(), ExpressionKind::CucumberExpression);
/// assert!(pattern.is_match("I have 1 cucumber"));
/// assert!(pattern.is_match("I have 12 cucumbers"));
/// assert!(!pattern.is_match("I have some cucumbers"));
/// ```
#[derive(Debug, Clone)]
pub struct StepDefinitionPattern {
    source: String,
    kind: ExpressionKind,
    regex: Regex,
    specificity: SpecificityScore,
}

impl StepDefinitionPattern {
    /// Classify and compile `source`.
    ///
    /// # Errors
    /// Returns [`PatternError`] when the expression is malformed, names an
    /// unknown parameter type, or the resulting regex does not compile.
    pub fn compile(source: &str, registry: &ParameterTypeRegistry) -> Result<Self, PatternError> {
        let kind = classify(source);
        let regex_source = build_regex_from_definition(source, registry)?;
        let regex = Regex::new(&regex_source)?;
        let specificity = match kind {
            ExpressionKind::CucumberExpression => SpecificityScore::for_expression(source)?,
            ExpressionKind::RegularExpression => SpecificityScore::for_regex(&regex_source),
        };
        log::trace!("compiled {kind} `{source}` to `{regex_source}`");
        Ok(Self {
            source: source.to_owned(),
            kind,
            regex,
            specificity,
        })
    }

    /// The definition text as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Which syntax the definition was compiled as.
    #[must_use]
    pub fn kind(&self) -> ExpressionKind {
        self.kind
    }

    /// The compiled anchored regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Ranking used when several definitions match one step.
    #[must_use]
    pub fn specificity(&self) -> SpecificityScore {
        self.specificity
    }

    /// Whether the whole of `text` matches this definition.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Captured arguments when `text` matches, `None` otherwise.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<CapturedArgument>> {
        extract_captured_arguments(&self.regex, text)
    }
}

/// Pick the most specific definition matching `text`.
///
/// Ties keep the earliest definition.
///
/// # Examples
/// ```
/// use cucumber_dart_patterns::{ParameterTypeRegistry, StepDefinitionPattern, most_specific};
///
/// let registry = ParameterTypeRegistry::dart();
/// let compile = |source| {
///     StepDefinitionPattern::compile(source, &registry).unwrap_or_else(|err| panic!("{err}"))
/// };
/// let definitions = [compile("the output is {word}"), compile("the output is foo")];
/// let best = most_specific(&definitions, "the output is foo");
/// assert_eq!(best.map(StepDefinitionPattern::source), Some("the output is foo"));
/// ```
pub fn most_specific<'a, I>(definitions: I, text: &str) -> Option<&'a StepDefinitionPattern>
where
    I: IntoIterator<Item = &'a StepDefinitionPattern>,
{
    definitions
        .into_iter()
        .filter(|definition| definition.is_match(text))
        .reduce(|best, candidate| {
            if candidate.specificity() > best.specificity() {
                candidate
            } else {
                if candidate.specificity() == best.specificity() {
                    log::debug!(
                        "ambiguous step `{text}`: `{}` and `{}` rank equally",
                        best.source(),
                        candidate.source()
                    );
                }
                best
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn compile(source: &str) -> StepDefinitionPattern {
        StepDefinitionPattern::compile(source, &ParameterTypeRegistry::dart())
            .unwrap_or_else(|err| panic!("{source}: {err}"))
    }

    fn captured(pattern: &StepDefinitionPattern, text: &str) -> Vec<String> {
        pattern
            .captures(text)
            .unwrap_or_else(|| panic!("{text} should match {}", pattern.source()))
            .into_iter()
            .map(|arg| arg.value)
            .collect()
    }

    #[rstest]
    #[case::anchored(r"^I have (\d+)$")]
    #[case::script_style(r"/I have (\d+)/")]
    #[case::cucumber("I have {int}")]
    fn both_syntaxes_capture_arguments(#[case] source: &str) {
        let pattern = compile(source);
        assert_eq!(captured(&pattern, "I have 3"), vec!["3"]);
        assert!(!pattern.is_match("I have 3 more"));
    }

    #[test]
    fn unanchored_regex_is_anchored() {
        let pattern = compile(r"I have (\d+) cukes");
        assert_eq!(pattern.kind(), ExpressionKind::RegularExpression);
        assert_eq!(pattern.regex().as_str(), r"^(?:I have (\d+) cukes)$");
        assert!(!pattern.is_match("so I have 3 cukes"));
    }

    #[test]
    fn escaped_trailing_dollar_is_not_an_anchor() {
        assert_eq!(anchor_regex(r"^costs \$"), r"^(?:^costs \$)$");
    }

    #[rstest]
    #[case("I have cucumber")]
    #[case("I have a cucumber")]
    #[case("I have gherkin")]
    fn optional_and_alternation_match(#[case] text: &str) {
        assert!(compile("I have (a )cucumber/gherkin").is_match(text));
    }

    #[test]
    fn string_parameter_keeps_quotes() {
        let pattern = compile("I say {string}");
        assert_eq!(captured(&pattern, r#"I say "hi""#), vec![r#""hi""#]);
        assert_eq!(captured(&pattern, "I say 'yo'"), vec!["'yo'"]);
    }

    #[test]
    fn undefined_parameter_type_fails_to_compile() {
        let Err(err) = StepDefinitionPattern::compile("I see {colour}", &ParameterTypeRegistry::dart())
        else {
            panic!("unknown parameter type should fail");
        };
        assert!(matches!(err, PatternError::Expression(ref info) if info.position == 6));
        assert!(err.to_string().contains("`colour`"));
    }

    #[test]
    fn invalid_regex_definition_fails_to_compile() {
        let Err(err) = StepDefinitionPattern::compile("^broken [$", &ParameterTypeRegistry::dart())
        else {
            panic!("invalid regex should fail");
        };
        assert!(matches!(err, PatternError::Regex(_)));
    }

    #[test]
    fn literal_rich_definition_wins() {
        let definitions = [
            compile("the output is {word}"),
            compile(r"^the output is the workspace (\S+)$"),
        ];
        let best = most_specific(&definitions, "the output is the workspace bin");
        assert_eq!(
            best.map(StepDefinitionPattern::source),
            Some(r"^the output is the workspace (\S+)$")
        );
    }

    #[test]
    fn ties_keep_first_definition_and_misses_return_none() {
        let definitions = [compile("a {word}"), compile("a {int}")];
        // `{word}` and `{int}` score identically; the first wins.
        assert_eq!(
            most_specific(&definitions, "a 1").map(StepDefinitionPattern::source),
            Some("a {word}")
        );
        assert!(most_specific(&definitions, "b").is_none());
    }
}
