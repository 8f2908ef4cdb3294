//! Helpers for rendering command output.

use std::io::Write;

use cucumber_dart_patterns::ExpressionKind;
use eyre::{Context, Result};
use serde::Serialize;

use crate::definitions::IndexedDefinition;
use crate::feature::FeatureStep;

/// JSON form of an indexed step definition.
#[derive(Debug, Serialize)]
pub struct DefinitionReport<'a> {
    keyword: &'a str,
    pattern: &'a str,
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    function: Option<&'a str>,
    file: String,
    line: usize,
    valid: bool,
}

impl<'a> From<&'a IndexedDefinition> for DefinitionReport<'a> {
    fn from(indexed: &'a IndexedDefinition) -> Self {
        let definition = &indexed.definition;
        Self {
            keyword: definition.keyword.as_str(),
            pattern: &definition.pattern,
            kind: definition.kind().as_str(),
            function: definition.function.as_deref(),
            file: indexed.path.display().to_string(),
            line: definition.line,
            valid: indexed.compiled.is_some(),
        }
    }
}

/// JSON form of a generated snippet.
#[derive(Debug, Serialize)]
pub struct SnippetReport<'a> {
    keyword: &'a str,
    text: &'a str,
    feature: String,
    line: usize,
    snippet: &'a str,
}

impl<'a> SnippetReport<'a> {
    /// Pair a feature step with the snippet generated for it.
    #[must_use]
    pub fn new(step: &'a FeatureStep, snippet: &'a str) -> Self {
        Self {
            keyword: step.keyword.as_str(),
            text: &step.text,
            feature: step.path.display().to_string(),
            line: step.line,
            snippet,
        }
    }
}

pub(crate) fn write_classification(
    writer: &mut dyn Write,
    kind: ExpressionKind,
    expression: &str,
) -> Result<()> {
    writeln!(writer, "{kind}\t{expression}")
        .wrap_err_with(|| format!("failed to write classification for '{expression}'"))
}

pub(crate) fn write_definition(writer: &mut dyn Write, indexed: &IndexedDefinition) -> Result<()> {
    let definition = &indexed.definition;
    writeln!(
        writer,
        "{} '{}' ({}:{}) [{}]",
        definition.keyword,
        definition.pattern,
        indexed.path.display(),
        definition.line,
        definition.kind()
    )
    .wrap_err_with(|| {
        format!(
            "failed to write step {} '{}' at {}:{}",
            definition.keyword,
            definition.pattern,
            indexed.path.display(),
            definition.line
        )
    })
}

pub(crate) fn write_snippet(writer: &mut dyn Write, snippet: &str, first: bool) -> Result<()> {
    if !first {
        writeln!(writer).wrap_err("failed to separate snippets")?;
    }
    write!(writer, "{snippet}").wrap_err("failed to write snippet")?;
    if !snippet.ends_with('\n') {
        writeln!(writer).wrap_err("failed to terminate snippet")?;
    }
    Ok(())
}

pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    serde_json::to_writer(&mut *writer, value).wrap_err("failed to serialize output to JSON")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")?;
    writer.flush().wrap_err("failed to flush JSON output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cucumber_dart_patterns::{DartStepDefinition, StepKeyword};
    use std::path::PathBuf;

    fn indexed() -> IndexedDefinition {
        IndexedDefinition {
            path: PathBuf::from("steps.dart"),
            definition: DartStepDefinition {
                keyword: StepKeyword::Given,
                pattern: "I have {int} cucumbers".into(),
                function: Some("iHaveCucumbers".into()),
                line: 4,
            },
            compiled: None,
        }
    }

    #[test]
    fn definition_line_names_location_and_kind() -> Result<()> {
        let mut buffer = Vec::new();
        write_definition(&mut buffer, &indexed())?;
        assert_eq!(
            String::from_utf8(buffer)?,
            "Given 'I have {int} cucumbers' (steps.dart:4) [cucumber-expression]\n"
        );
        Ok(())
    }

    #[test]
    fn snippets_are_separated_by_blank_lines() -> Result<()> {
        let mut buffer = Vec::new();
        write_snippet(&mut buffer, "first", true)?;
        write_snippet(&mut buffer, "second\n", false)?;
        assert_eq!(String::from_utf8(buffer)?, "first\n\nsecond\n");
        Ok(())
    }

    #[test]
    fn definition_report_serialises_fields() -> Result<()> {
        let indexed = indexed();
        let mut buffer = Vec::new();
        write_json(&mut buffer, &[DefinitionReport::from(&indexed)])?;
        let parsed: serde_json::Value = serde_json::from_slice(&buffer)?;
        let entry = parsed
            .as_array()
            .and_then(|array| array.first())
            .ok_or_else(|| eyre::eyre!("missing entry"))?;
        assert_eq!(entry.get("keyword"), Some(&serde_json::Value::from("Given")));
        assert_eq!(
            entry.get("kind"),
            Some(&serde_json::Value::from("cucumber-expression"))
        );
        assert_eq!(
            entry.get("function"),
            Some(&serde_json::Value::from("iHaveCucumbers"))
        );
        assert_eq!(entry.get("line"), Some(&serde_json::Value::from(4_u64)));
        assert_eq!(entry.get("valid"), Some(&serde_json::Value::Bool(false)));
        Ok(())
    }
}
