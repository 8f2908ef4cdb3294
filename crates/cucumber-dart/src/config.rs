//! Tool configuration parsed from environment variables.
//!
//! Every setting can be supplied through an environment variable prefixed
//! with `CUCUMBER_DART_`; command line flags take precedence.

use std::env;
use std::str::FromStr;

use cucumber_dart_patterns::NameStyle;

use crate::error::ToolError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "CUCUMBER_DART_LOG_LEVEL";
/// Environment variable holding the snippet function-name style.
pub const NAME_STYLE_VAR: &str = "CUCUMBER_DART_NAME_STYLE";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so command output stays uncluttered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes all trace spans.
    Trace,
    /// Debug-level information for development.
    Debug,
    /// Standard informational messages.
    Info,
    /// Warning messages for potentially problematic situations.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ToolError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for a tool invocation.
///
/// # Environment Variables
///
/// - `CUCUMBER_DART_LOG_LEVEL`: log level (trace, debug, info, warn, error)
/// - `CUCUMBER_DART_NAME_STYLE`: snippet function names, `camel` or `snake`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Identifier style for generated snippet functions.
    pub name_style: NameStyle,
}

impl ToolConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, ToolError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ToolError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };

        let name_style = match lookup(NAME_STYLE_VAR) {
            Some(val) => val
                .parse()
                .map_err(|err| ToolError::InvalidConfig(format!("{err}")))?,
            None => NameStyle::default(),
        };

        Ok(Self {
            log_level,
            name_style,
        })
    }

    /// Apply optional overrides, typically from command line flags.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        name_style: Option<NameStyle>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(style) = name_style {
            self.name_style = style;
        }

        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("Debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert!(err.to_string().contains("unknown log level"));
        assert!(err.is_config());
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = ToolConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.name_style, NameStyle::Camel);
    }

    #[test]
    fn reads_variables() {
        let config =
            ToolConfig::from_lookup(lookup(&[(LOG_LEVEL_VAR, "debug"), (NAME_STYLE_VAR, "snake")]))
                .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.name_style, NameStyle::Snake);
    }

    #[test]
    fn invalid_name_style_is_a_config_error() {
        let err = ToolConfig::from_lookup(lookup(&[(NAME_STYLE_VAR, "kebab")])).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("kebab"));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = ToolConfig::default().apply_overrides(Some(LogLevel::Error), Some(NameStyle::Snake));
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.name_style, NameStyle::Snake);

        let config = ToolConfig::default().apply_overrides(None, None);
        assert_eq!(config, ToolConfig::default());
    }
}
