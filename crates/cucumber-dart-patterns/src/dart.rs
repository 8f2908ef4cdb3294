//! Indexing of Dart step-definition sources.
//!
//! Step definitions are Dart functions annotated with a keyword and the
//! definition text, for example:
//!
//! ```dart
//! @Given(r"^I have (\d+) cukes$")
//! Future<void> iHaveCukes(int count) async { ... }
//! ```
//!
//! Hooks use `@Before`, `@After`, `@BeforeStep` or `@AfterStep`. Indexing is
//! lexical: annotations must start their line, so `//` comments hide them,
//! and `/* ... */` comments (nested or not) are blanked before scanning.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::classify::{ExpressionKind, classify};
use crate::errors::PatternError;
use crate::expression::StepDefinitionPattern;
use crate::keyword::StepKeyword;
use crate::parameter_type::ParameterTypeRegistry;

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*@(?P<marker>[A-Z][A-Za-z]*)\b").unwrap_or_else(|_| unreachable!())
});
static STRING_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^\s*\(\s*(?P<literal>"#,
        r#"r?"""[\s\S]*?"""|r?'''[\s\S]*?'''|"#,
        r#"r?"(?:[^"\\\n]|\\.)*"|r?'(?:[^'\\\n]|\\.)*')"#
    ))
        .unwrap_or_else(|_| unreachable!())
});
static FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<name>[A-Za-z_][A-Za-z0-9_$]*)\s*\(").unwrap_or_else(|_| unreachable!())
});

/// Lifecycle callback kinds recognised as hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Runs before each scenario.
    Before,
    /// Runs after each scenario.
    After,
    /// Runs before each step.
    BeforeStep,
    /// Runs after each step.
    AfterStep,
}

impl HookKind {
    /// The annotation name without `@`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "Before",
            Self::After => "After",
            Self::BeforeStep => "BeforeStep",
            Self::AfterStep => "AfterStep",
        }
    }

    /// Parse an annotation name such as `BeforeStep`.
    #[must_use]
    pub fn from_annotation(name: &str) -> Option<Self> {
        [Self::Before, Self::After, Self::BeforeStep, Self::AfterStep]
            .into_iter()
            .find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A step definition found in Dart source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DartStepDefinition {
    /// Annotation keyword.
    pub keyword: StepKeyword,
    /// Definition text with Dart quoting removed.
    pub pattern: String,
    /// Name of the annotated function, when one follows the annotation.
    pub function: Option<String>,
    /// One-based line of the annotation.
    pub line: usize,
}

impl DartStepDefinition {
    /// Syntax of the definition text.
    #[must_use]
    pub fn kind(&self) -> ExpressionKind {
        classify(&self.pattern)
    }

    /// Compile the definition for matching.
    ///
    /// # Errors
    /// Returns [`PatternError`] when the definition does not compile.
    pub fn compile(
        &self,
        registry: &ParameterTypeRegistry,
    ) -> Result<StepDefinitionPattern, PatternError> {
        StepDefinitionPattern::compile(&self.pattern, registry)
    }
}

/// A hook found in Dart source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DartHook {
    /// Hook annotation.
    pub kind: HookKind,
    /// Name of the annotated function, when one follows the annotation.
    pub function: Option<String>,
    /// One-based line of the annotation.
    pub line: usize,
}

/// Everything indexed from one Dart source, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DartStepFile {
    /// Step definitions.
    pub steps: Vec<DartStepDefinition>,
    /// Hooks.
    pub hooks: Vec<DartHook>,
}

impl DartStepFile {
    /// Whether the source declared neither steps nor hooks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.hooks.is_empty()
    }
}

/// Index the step definitions and hooks declared in `source`.
///
/// # Examples
/// ```
/// use cucumber_dart_patterns::{HookKind, StepKeyword, index_dart_source};
///
/// let source = r#"
/// @Before()
/// Future<void> reset() async {}
///
/// @Given(r"^I have (\d+) cukes$")
/// Future<void> iHaveCukes(int count) async {}
/// "#;
/// let file = index_dart_source(source);
/// let step = &file.steps[0];
/// assert_eq!(step.keyword, StepKeyword::Given);
/// assert_eq!(step.pattern, r"^I have (\d+) cukes$");
/// assert_eq!(step.function.as_deref(), Some("iHaveCukes"));
/// assert_eq!(step.line, 5);
/// assert_eq!(file.hooks[0].kind, HookKind::Before);
/// ```
#[must_use]
pub fn index_dart_source(source: &str) -> DartStepFile {
    let masked = mask_block_comments(source);
    let source = masked.as_str();
    let mut file = DartStepFile::default();
    let annotations: Vec<_> = ANNOTATION
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let marker = caps.name("marker")?;
            let annotation = marker
                .as_str()
                .parse::<StepKeyword>()
                .ok()
                .map(Annotation::Step)
                .or_else(|| HookKind::from_annotation(marker.as_str()).map(Annotation::Hook))?;
            Some((whole.start(), marker.end(), annotation))
        })
        .collect();

    for (index, &(start, marker_end, annotation)) in annotations.iter().enumerate() {
        let limit = annotations
            .get(index + 1)
            .map_or(source.len(), |&(next, _, _)| next);
        let rest = source.get(marker_end..limit).unwrap_or_default();
        let line = line_of(source, marker_end);

        match annotation {
            Annotation::Step(keyword) => {
                let Some(literal) = STRING_ARGUMENT
                    .captures(rest)
                    .and_then(|argument| argument.name("literal"))
                else {
                    log::debug!("skipping @{keyword} at byte {start}: no string literal argument");
                    continue;
                };
                let after = rest.get(literal.end()..).unwrap_or_default();
                file.steps.push(DartStepDefinition {
                    keyword,
                    pattern: strip_quotes(literal.as_str()),
                    function: function_after(after),
                    line,
                });
            }
            Annotation::Hook(kind) => file.hooks.push(DartHook {
                kind,
                function: function_after(rest),
                line,
            }),
        }
    }
    file
}

#[derive(Debug, Clone, Copy)]
enum Annotation {
    Step(StepKeyword),
    Hook(HookKind),
}

/// Replace the contents of block comments with spaces, keeping newlines so
/// byte offsets and line numbers are unchanged. String literals and line
/// comments are copied through untouched.
fn mask_block_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    let mut depth = 0usize;
    while let Some(c) = rest.chars().next() {
        let len = if rest.starts_with("/*") {
            depth += 1;
            out.push_str("  ");
            2
        } else if depth > 0 {
            if rest.starts_with("*/") {
                depth -= 1;
                out.push_str("  ");
                2
            } else {
                if c == '\n' {
                    out.push('\n');
                } else {
                    out.extend(std::iter::repeat_n(' ', c.len_utf8()));
                }
                c.len_utf8()
            }
        } else {
            let len = if rest.starts_with("//") {
                rest.find('\n').unwrap_or(rest.len())
            } else if c == '"' || c == '\'' {
                string_literal_len(rest, out.ends_with('r'))
            } else {
                c.len_utf8()
            };
            out.push_str(rest.get(..len).unwrap_or(rest));
            len
        };
        rest = rest.get(len..).unwrap_or_default();
    }
    out
}

/// Byte length of the string literal opening `rest`, or of the rest of the
/// line when a single-line literal is unterminated.
fn string_literal_len(rest: &str, raw: bool) -> usize {
    let quote = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find(|quote| rest.starts_with(quote))
        .unwrap_or("\"");
    let multiline = quote.len() == 3;
    let body = rest.get(quote.len()..).unwrap_or_default();
    let mut chars = body.char_indices();
    while let Some((offset, c)) = chars.next() {
        if c == '\\' && !raw {
            chars.next();
        } else if c == '\n' && !multiline {
            return quote.len() + offset;
        } else if body.get(offset..).is_some_and(|tail| tail.starts_with(quote)) {
            return quote.len() + offset + quote.len();
        }
    }
    rest.len()
}

fn line_of(source: &str, offset: usize) -> usize {
    source
        .bytes()
        .take(offset)
        .filter(|&byte| byte == b'\n')
        .count()
        + 1
}

/// Name of the first function declared after the annotation line, skipping
/// further annotations and comments.
fn function_after(text: &str) -> Option<String> {
    text.lines()
        .skip(1)
        .map(str::trim_start)
        .filter(|line| !line.starts_with('@') && !line.starts_with("//"))
        .find_map(|line| FUNCTION.captures(line)?.name("name"))
        .map(|name| name.as_str().to_owned())
}

/// Decode a Dart string literal into its value.
///
/// Raw strings (`r"..."`) are returned verbatim; other strings have their
/// escapes resolved, including `\$`. Text without quotes is returned as is.
///
/// # Examples
/// ```
/// use cucumber_dart_patterns::strip_quotes;
///
/// assert_eq!(strip_quotes(r#"r"^x$""#), "^x$");
/// assert_eq!(strip_quotes(r#""a \$b""#), "a $b");
/// assert_eq!(strip_quotes(r#""I have (\\d+)""#), r"I have (\d+)");
/// ```
#[must_use]
pub fn strip_quotes(literal: &str) -> String {
    let (raw, quoted) = literal
        .strip_prefix('r')
        .filter(|rest| rest.starts_with(['"', '\'']))
        .map_or((false, literal), |rest| (true, rest));

    let body = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find_map(|quote| {
            quoted
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        });
    let Some(body) = body else {
        return literal.to_owned();
    };
    if raw {
        return body.to_owned();
    }

    let mut value = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some('b') => value.push('\u{8}'),
            Some('f') => value.push('\u{c}'),
            Some('v') => value.push('\u{b}'),
            Some(other) => value.push(other),
            None => value.push('\\'),
        }
    }
    value
}
