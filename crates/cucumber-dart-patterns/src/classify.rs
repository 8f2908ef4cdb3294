//! Heuristic classification of step-definition text.
//!
//! Step definitions may be authored either as Cucumber Expressions
//! (`I have {int} cucumber(s)`) or as regular expressions
//! (`^I have (\d+) cucumbers?$`). The text alone does not say which, so a
//! short ordered list of heuristics decides. The first heuristic that reaches
//! a verdict wins; when none applies the text is treated as a Cucumber
//! Expression.
//!
//! The heuristics are best-effort. A regex such as `I have (a|an) apple` is
//! reported as a Cucumber Expression because its first group starts with a
//! letter.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_STYLE_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/(.*)/$").unwrap_or_else(|_| unreachable!()));
static PARENTHESIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").unwrap_or_else(|_| unreachable!()));

/// The syntax a step-definition string is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    /// Placeholder-based Cucumber Expression syntax.
    CucumberExpression,
    /// Traditional regular expression.
    RegularExpression,
}

impl ExpressionKind {
    /// Return a short machine-friendly label for the kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use cucumber_dart_patterns::ExpressionKind;
    ///
    /// assert_eq!(ExpressionKind::CucumberExpression.as_str(), "cucumber-expression");
    /// assert_eq!(ExpressionKind::RegularExpression.as_str(), "regex");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CucumberExpression => "cucumber-expression",
            Self::RegularExpression => "regex",
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy)]
enum Heuristic {
    BeginAnchor,
    EndAnchor,
    ScriptStyle,
    Parenthesis,
}

const HEURISTICS: [Heuristic; 4] = [
    Heuristic::BeginAnchor,
    Heuristic::EndAnchor,
    Heuristic::ScriptStyle,
    Heuristic::Parenthesis,
];

impl Heuristic {
    fn verdict(self, text: &str) -> Option<ExpressionKind> {
        match self {
            Self::BeginAnchor => text
                .starts_with('^')
                .then_some(ExpressionKind::RegularExpression),
            Self::EndAnchor => text
                .ends_with('$')
                .then_some(ExpressionKind::RegularExpression),
            Self::ScriptStyle => SCRIPT_STYLE_REGEXP
                .is_match(text)
                .then_some(ExpressionKind::RegularExpression),
            Self::Parenthesis => PARENTHESIS.captures(text).map(|caps| {
                let starts_alpha = caps
                    .get(1)
                    .and_then(|inside| inside.as_str().chars().next())
                    .is_some_and(|c| c.is_ascii_alphabetic());
                if starts_alpha {
                    ExpressionKind::CucumberExpression
                } else {
                    ExpressionKind::RegularExpression
                }
            }),
        }
    }
}

/// Decide which syntax a step-definition string is written in.
///
/// # Examples
///
/// ```
/// use cucumber_dart_patterns::{ExpressionKind, classify};
///
/// assert_eq!(classify("^I have (\\d+) cucumbers$"), ExpressionKind::RegularExpression);
/// assert_eq!(classify("I have {int} cucumber(s)"), ExpressionKind::CucumberExpression);
/// ```
#[must_use]
pub fn classify(text: &str) -> ExpressionKind {
    for heuristic in HEURISTICS {
        if let Some(kind) = heuristic.verdict(text) {
            log::trace!("{heuristic:?} classified {text:?} as {kind}");
            return kind;
        }
    }
    ExpressionKind::CucumberExpression
}

/// Return `true` when `text` should be treated as a Cucumber Expression.
///
/// # Examples
///
/// ```
/// use cucumber_dart_patterns::is_cucumber_expression;
///
/// assert!(is_cucumber_expression("I have (a) cucumber"));
/// assert!(!is_cucumber_expression("/foo.*/"));
/// assert!(is_cucumber_expression(""));
/// ```
#[must_use]
pub fn is_cucumber_expression(text: &str) -> bool {
    classify(text) == ExpressionKind::CucumberExpression
}
