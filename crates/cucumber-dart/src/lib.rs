//! Command line tooling for Cucumber step definitions written in Dart.
//!
//! This library powers the `cucumber-dart` binary. It indexes annotated Dart
//! step definitions, reads Gherkin feature files and prints step-definition
//! snippets for steps that no definition matches. Pattern handling lives in
//! `cucumber-dart-patterns`; this crate adds file discovery, configuration,
//! logging and output formatting.

pub mod cli;
pub mod config;
pub mod definitions;
pub mod discovery;
pub mod error;
pub mod feature;
pub mod logging;
pub mod output;
