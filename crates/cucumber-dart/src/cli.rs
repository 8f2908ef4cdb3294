//! Command dispatch for the `cucumber-dart` entrypoint.

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cucumber_dart_patterns::{NameStyle, classify, generate_snippet};
use eyre::{Context, Result};

use crate::config::{LogLevel, ToolConfig};
use crate::definitions::{DefinitionIndex, load_definitions};
use crate::discovery::{FEATURE_EXTENSION, collect_files};
use crate::feature::load_feature_steps;
use crate::output::{
    DefinitionReport, SnippetReport, write_classification, write_definition, write_json,
    write_snippet,
};

/// Step-definition tooling for Cucumber projects written in Dart.
#[derive(Parser, Debug)]
#[command(name = "cucumber-dart", author, version, about)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,
    /// Function-name style for generated snippets (camel, snake).
    #[arg(long, global = true)]
    pub name_style: Option<NameStyle>,
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report whether each expression is a Cucumber expression or a regex.
    Classify {
        /// Step-definition texts to classify.
        #[arg(required = true)]
        expressions: Vec<String>,
    },
    /// List step definitions found in Dart sources.
    Steps(StepsArgs),
    /// Print step-definition snippets for undefined feature steps.
    Snippets(SnippetsArgs),
}

/// Arguments for `steps`.
#[derive(Args, Debug)]
pub struct StepsArgs {
    /// Dart files or directories to index.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `snippets`.
#[derive(Args, Debug)]
pub struct SnippetsArgs {
    /// Dart files or directories holding existing step definitions.
    #[arg(long = "steps", value_name = "PATH")]
    pub steps: Vec<PathBuf>,
    /// Feature files or directories to scan.
    #[arg(required = true)]
    pub features: Vec<PathBuf>,
    /// Generate snippets for every step, defined or not.
    #[arg(long)]
    pub all: bool,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

/// Execute `cli` with `config`, writing command output to `writer`.
///
/// # Errors
///
/// Returns an error when inputs cannot be read or parsed, or when writing
/// output fails.
pub fn run(cli: &Cli, config: &ToolConfig, writer: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Commands::Classify { expressions } => handle_classify(expressions, writer),
        Commands::Steps(args) => handle_steps(args, writer),
        Commands::Snippets(args) => handle_snippets(args, config.name_style, writer),
    }
}

fn handle_classify(expressions: &[String], writer: &mut dyn Write) -> Result<()> {
    for expression in expressions {
        write_classification(writer, classify(expression), expression)?;
    }
    writer.flush().wrap_err("failed to flush classification output")
}

fn handle_steps(args: &StepsArgs, writer: &mut dyn Write) -> Result<()> {
    let index = load_definitions(&args.paths).wrap_err("failed to index step definitions")?;
    if args.json {
        let reports: Vec<_> = index
            .definitions()
            .iter()
            .map(DefinitionReport::from)
            .collect();
        return write_json(writer, &reports);
    }
    index
        .definitions()
        .iter()
        .try_for_each(|indexed| write_definition(writer, indexed))?;
    writer.flush().wrap_err("failed to flush step listing")
}

fn handle_snippets(
    args: &SnippetsArgs,
    name_style: NameStyle,
    writer: &mut dyn Write,
) -> Result<()> {
    let index = if args.all {
        DefinitionIndex::default()
    } else {
        load_definitions(&args.steps).wrap_err("failed to index step definitions")?
    };
    let name_generator = name_style.generator();

    let mut seen = HashSet::new();
    let mut snippets = Vec::new();
    for path in collect_files(&args.features, FEATURE_EXTENSION)? {
        for step in load_feature_steps(&path)? {
            if let Some(defined) = index.resolve(&step.text) {
                tracing::debug!(
                    step = %step.text,
                    definition = %defined.definition.pattern,
                    "step already defined"
                );
                continue;
            }
            let snippet = generate_snippet(
                &step.text,
                step.keyword.as_str(),
                step.table.as_ref(),
                Some(&name_generator),
            );
            if seen.insert(snippet.clone()) {
                snippets.push((step, snippet));
            }
        }
    }
    tracing::info!(count = snippets.len(), "generated snippets");

    if args.json {
        let reports: Vec<_> = snippets
            .iter()
            .map(|(step, snippet)| SnippetReport::new(step, snippet))
            .collect();
        return write_json(writer, &reports);
    }
    for (position, (_, snippet)) in snippets.iter().enumerate() {
        write_snippet(writer, snippet, position == 0)?;
    }
    writer.flush().wrap_err("failed to flush snippet output")
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests require descriptive failures")]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::ffi::OsString;

    #[test]
    fn classify_writes_kind_and_expression() -> Result<()> {
        let cli = Cli::try_parse_from(["cucumber-dart", "classify", "I have {int} cukes", "^x$"])?;
        let mut buffer = Vec::new();
        run(&cli, &ToolConfig::default(), &mut buffer)?;
        assert_eq!(
            String::from_utf8(buffer)?,
            "cucumber-expression\tI have {int} cukes\nregex\t^x$\n"
        );
        Ok(())
    }

    #[rstest]
    #[case(&["cucumber-dart", "classify"])]
    #[case(&["cucumber-dart", "steps"])]
    #[case(&["cucumber-dart", "snippets", "--steps", "lib"])]
    #[case(&["cucumber-dart", "--name-style", "kebab", "classify", "x"])]
    fn rejects_invalid_arguments(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "cucumber-dart",
            "snippets",
            "features",
            "--log-level",
            "debug",
            "--name-style",
            "snake",
        ])
        .expect("arguments should parse");
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.name_style, Some(NameStyle::Snake));
        assert!(matches!(cli.command, Commands::Snippets(ref args) if args.steps.is_empty()));
    }

    #[test]
    fn snippets_use_configured_name_style() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let feature = dir.path().join("eat.feature");
        std::fs::write(
            &feature,
            "Feature: Eating\n  Scenario: Lunch\n    When I eat 3 cukes\n",
        )?;
        let cli = Cli::try_parse_from([
            OsString::from("cucumber-dart"),
            OsString::from("snippets"),
            feature.into_os_string(),
        ])?;
        let config = ToolConfig::default().apply_overrides(None, Some(NameStyle::Snake));
        let mut buffer = Vec::new();
        run(&cli, &config, &mut buffer)?;
        let output = String::from_utf8(buffer)?;
        assert!(output.contains("Future<void> i_eat_cukes(int arg1) async {"));
        Ok(())
    }
}
