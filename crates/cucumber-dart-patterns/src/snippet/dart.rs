//! Dart rendering of step-definition snippets.

use std::collections::HashSet;

use super::SnippetSyntax;
use crate::argument::{ArgumentParam, ArgumentType};
use crate::naming::NameStyle;

const TEMPLATE: &str = r#"@{0}("{1}")
Future<void> {2}({3}) async {{
  // {4}
{5}  throw PendingException();
}}
"#;

/// Words Dart rejects as function or parameter names inside an `async`
/// function.
const RESERVED_WORDS: [&str; 35] = [
    "assert", "await", "break", "case", "catch", "class", "const", "continue", "default", "do",
    "else", "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void", "while",
    "with", "yield",
];

const TABLE_HINT: &str = "  // The dataTable parameter receives the step's table rows.\n";

/// Snippets for Dart step definitions annotated with `@Given("...")` style
/// metadata.
///
/// The pattern is embedded in a double-quoted Dart string, so backslashes,
/// quotes and `$` are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DartSnippet;

impl DartSnippet {
    fn type_name(kind: ArgumentType) -> &'static str {
        match kind {
            ArgumentType::Integer => "int",
            ArgumentType::Decimal => "double",
            ArgumentType::String => "String",
            ArgumentType::DataTable => "GherkinTable",
        }
    }

    fn base_name(index: usize, param: &ArgumentParam) -> String {
        if param.kind == ArgumentType::DataTable {
            return "dataTable".to_owned();
        }
        param
            .name
            .as_deref()
            .filter(|name| name.chars().any(char::is_alphanumeric))
            .map_or_else(
                || format!("arg{}", index + 1),
                |name| NameStyle::Camel.function_name(name),
            )
    }
}

impl SnippetSyntax for DartSnippet {
    fn template(&self) -> &str {
        TEMPLATE
    }

    fn escape_pattern(&self, pattern: &str) -> String {
        let mut escaped = String::with_capacity(pattern.len());
        for c in pattern.chars() {
            if matches!(c, '\\' | '"' | '$') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    fn param_arguments(&self, params: &[ArgumentParam]) -> String {
        let mut used = HashSet::new();
        params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let base = self.identifier(Self::base_name(index, param));
                let mut name = base.clone();
                let mut suffix = 2usize;
                while !used.insert(name.clone()) {
                    name = format!("{base}_{suffix}");
                    suffix += 1;
                }
                format!("{} {name}", Self::type_name(param.kind))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn table_hint(&self) -> &str {
        TABLE_HINT
    }

    fn identifier(&self, name: String) -> String {
        if RESERVED_WORDS.contains(&name.as_str()) {
            format!("{name}$")
        } else {
            name
        }
    }
}
