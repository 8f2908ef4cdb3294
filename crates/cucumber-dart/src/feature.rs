//! Gherkin `.feature` file loading.

use std::path::{Path, PathBuf};

use cucumber_dart_patterns::{DataTable, StepKeyword};
use gherkin::GherkinEnv;

use crate::error::ToolError;

/// A step read from a feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureStep {
    /// Keyword with `And`/`But` resolved to the preceding keyword.
    pub keyword: StepKeyword,
    /// Step text without its keyword.
    pub text: String,
    /// Attached data table, if any.
    pub table: Option<DataTable>,
    /// Feature file the step came from.
    pub path: PathBuf,
    /// One-based line of the step.
    pub line: usize,
}

/// Read and parse a feature file, returning its steps in document order.
///
/// # Errors
///
/// Returns [`ToolError::Read`] when the file cannot be read and
/// [`ToolError::FeatureParse`] when it is not valid Gherkin.
pub fn load_feature_steps(path: &Path) -> Result<Vec<FeatureStep>, ToolError> {
    let mut text = std::fs::read_to_string(path).map_err(|source| ToolError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if !text.ends_with('\n') {
        text.push('\n');
    }
    parse_feature_steps(path, &text)
}

/// Parse feature text, attributing steps to `path`.
///
/// Background steps come first, then scenarios, then rules with their own
/// backgrounds and scenarios.
///
/// # Errors
///
/// Returns [`ToolError::FeatureParse`] when `text` is not valid Gherkin.
pub fn parse_feature_steps(path: &Path, text: &str) -> Result<Vec<FeatureStep>, ToolError> {
    let feature =
        gherkin::Feature::parse(text, GherkinEnv::default()).map_err(|source| {
            ToolError::FeatureParse {
                path: path.to_path_buf(),
                source,
            }
        })?;

    let mut steps = Vec::new();
    let mut push_all = |container: &[gherkin::Step]| {
        steps.extend(container.iter().map(|step| map_step(path, step)));
    };
    if let Some(background) = feature.background.as_ref() {
        push_all(&background.steps);
    }
    for scenario in &feature.scenarios {
        push_all(&scenario.steps);
    }
    for rule in &feature.rules {
        if let Some(background) = rule.background.as_ref() {
            push_all(&background.steps);
        }
        for scenario in &rule.scenarios {
            push_all(&scenario.steps);
        }
    }
    tracing::debug!(path = %path.display(), steps = steps.len(), "parsed feature");
    Ok(steps)
}

fn map_step(path: &Path, step: &gherkin::Step) -> FeatureStep {
    let keyword = StepKeyword::try_from(step.ty).unwrap_or_else(|err| {
        tracing::warn!(%err, step = %step.value, "treating step as Given");
        StepKeyword::Given
    });
    FeatureStep {
        keyword,
        text: step.value.clone(),
        table: step.table.as_ref().map(DataTable::from),
        path: path.to_path_buf(),
        line: step.position.line,
    }
}
