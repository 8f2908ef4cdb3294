//! Step-definition analysis and snippet generation for Dart Cucumber suites.
//!
//! The crate classifies step-definition text as a Cucumber Expression or a
//! regular expression, compiles either kind for matching, indexes annotated
//! Dart step definitions, and generates Dart snippets for steps that have no
//! definition yet.

mod argument;
mod capture;
mod classify;
mod dart;
mod errors;
mod expression;
mod keyword;
mod naming;
mod parameter_type;
mod snippet;
mod specificity;

pub use argument::{
    ArgumentParam, ArgumentPattern, ArgumentScan, ArgumentType, Segment, argument_patterns,
    argument_types, strip_arguments,
};
pub use capture::{CapturedArgument, extract_captured_arguments};
pub use classify::{ExpressionKind, classify, is_cucumber_expression};
pub use dart::{
    DartHook, DartStepDefinition, DartStepFile, HookKind, index_dart_source, strip_quotes,
};
pub use errors::{ExpressionErrorInfo, PatternError};
pub use expression::{
    StepDefinitionPattern, build_regex_from_definition, build_regex_from_expression,
    most_specific,
};
pub use keyword::{StepKeyword, StepKeywordParseError, UnsupportedStepType};
pub use naming::{DEFAULT_FUNCTION_NAME, NameStyle, NameStyleParseError};
pub use parameter_type::ParameterTypeRegistry;
pub use snippet::{
    DartSnippet, DataTable, NamedGroups, REGEXP_HINT, SnippetGenerator, SnippetStep,
    SnippetSyntax, escape_literal, generate_snippet,
};
pub use specificity::SpecificityScore;
