//! Step-definition index built from Dart sources.

use std::path::{Path, PathBuf};

use cucumber_dart_patterns::{
    DartHook, DartStepDefinition, ParameterTypeRegistry, StepDefinitionPattern,
    index_dart_source, most_specific,
};

use crate::discovery::{DART_EXTENSION, collect_files};
use crate::error::ToolError;

/// A step definition together with its source file and compiled pattern.
#[derive(Debug, Clone)]
pub struct IndexedDefinition {
    /// Dart file declaring the definition.
    pub path: PathBuf,
    /// Definition as written in the source.
    pub definition: DartStepDefinition,
    /// Compiled matcher, absent when the definition text is invalid.
    pub compiled: Option<StepDefinitionPattern>,
}

/// A hook together with its source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedHook {
    /// Dart file declaring the hook.
    pub path: PathBuf,
    /// Hook as written in the source.
    pub hook: DartHook,
}

/// Every step definition and hook found under a set of paths.
#[derive(Debug, Clone, Default)]
pub struct DefinitionIndex {
    definitions: Vec<IndexedDefinition>,
    hooks: Vec<IndexedHook>,
}

impl DefinitionIndex {
    /// Index a single Dart source attributed to `path`.
    ///
    /// Definitions that fail to compile are kept for listing but never match.
    pub fn add_source(&mut self, path: &Path, source: &str, registry: &ParameterTypeRegistry) {
        let file = index_dart_source(source);
        for definition in file.steps {
            let compiled = match definition.compile(registry) {
                Ok(compiled) => Some(compiled),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        line = definition.line,
                        pattern = %definition.pattern,
                        %err,
                        "skipping step definition that does not compile"
                    );
                    None
                }
            };
            self.definitions.push(IndexedDefinition {
                path: path.to_path_buf(),
                definition,
                compiled,
            });
        }
        self.hooks.extend(file.hooks.into_iter().map(|hook| IndexedHook {
            path: path.to_path_buf(),
            hook,
        }));
    }

    /// Definitions in file and source order.
    #[must_use]
    pub fn definitions(&self) -> &[IndexedDefinition] {
        &self.definitions
    }

    /// Hooks in file and source order.
    #[must_use]
    pub fn hooks(&self) -> &[IndexedHook] {
        &self.hooks
    }

    /// Find the most specific definition matching `text`.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<&IndexedDefinition> {
        let best = most_specific(
            self.definitions
                .iter()
                .filter_map(|indexed| indexed.compiled.as_ref()),
            text,
        )?;
        self.definitions.iter().find(|indexed| {
            indexed
                .compiled
                .as_ref()
                .is_some_and(|compiled| std::ptr::eq(compiled, best))
        })
    }
}

/// Index the Dart files found under `paths`.
///
/// # Errors
///
/// Returns [`ToolError::Read`] when a path or file cannot be read.
pub fn load_definitions(paths: &[PathBuf]) -> Result<DefinitionIndex, ToolError> {
    let registry = ParameterTypeRegistry::dart();
    let mut index = DefinitionIndex::default();
    for path in collect_files(paths, DART_EXTENSION)? {
        let source = std::fs::read_to_string(&path).map_err(|source| ToolError::Read {
            path: path.clone(),
            source,
        })?;
        index.add_source(&path, &source, &registry);
    }
    tracing::debug!(
        definitions = index.definitions.len(),
        hooks = index.hooks.len(),
        "indexed step definitions"
    );
    Ok(index)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests require descriptive failures")]
mod tests {
    use super::*;
    use cucumber_dart_patterns::{HookKind, StepKeyword};
    use rstest::rstest;

    const STEPS: &str = r#"
@Before()
Future<void> reset() async {}

@Given("I have {int} cucumbers")
Future<void> iHaveCucumbers(int count) async {}

@Given("I have 5 cucumbers")
Future<void> iHaveFiveCucumbers() async {}

@Then("broken {colour}")
Future<void> broken(String colour) async {}
"#;

    fn index() -> DefinitionIndex {
        let mut index = DefinitionIndex::default();
        index.add_source(
            Path::new("steps.dart"),
            STEPS,
            &ParameterTypeRegistry::dart(),
        );
        index
    }

    #[test]
    fn keeps_uncompilable_definitions_for_listing() {
        let index = index();
        let summary: Vec<_> = index
            .definitions()
            .iter()
            .map(|indexed| (indexed.definition.keyword, indexed.compiled.is_some()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (StepKeyword::Given, true),
                (StepKeyword::Given, true),
                (StepKeyword::Then, false),
            ]
        );
        let hook = index.hooks().first().expect("hook indexed");
        assert_eq!(hook.hook.kind, HookKind::Before);
    }

    #[rstest]
    #[case("I have 5 cucumbers", Some("I have 5 cucumbers"))]
    #[case("I have 12 cucumbers", Some("I have {int} cucumbers"))]
    #[case("broken red", None)]
    #[case("something else", None)]
    fn resolves_most_specific_definition(#[case] text: &str, #[case] expected: Option<&str>) {
        let index = index();
        let resolved = index
            .resolve(text)
            .map(|indexed| indexed.definition.pattern.as_str());
        assert_eq!(resolved, expected);
    }

    #[test]
    fn loads_definitions_from_directories() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("steps.dart"), STEPS).expect("write steps");
        std::fs::write(dir.path().join("README.md"), "@Given(\"ignored\")").expect("write readme");

        let index = load_definitions(&[dir.path().to_path_buf()]).expect("load definitions");
        assert_eq!(index.definitions().len(), 3);
        assert!(
            index
                .definitions()
                .iter()
                .all(|indexed| indexed.path.ends_with("steps.dart"))
        );
    }
}
