//! Error types shared by the expression and parameter-type modules.

use std::fmt;
use thiserror::Error;

/// Positional context for a malformed Cucumber Expression.
///
/// # Examples
/// ```
/// use cucumber_dart_patterns::ExpressionErrorInfo;
/// let info = ExpressionErrorInfo::new("undefined parameter type", 7, Some("colour".into()));
/// assert_eq!(info.parameter.as_deref(), Some("colour"));
/// assert_eq!(info.position, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionErrorInfo {
    /// Short description of the failure.
    pub message: &'static str,
    /// Zero-based byte offset in the expression where the problem starts.
    pub position: usize,
    /// Parameter type name involved in the failure, when there is one.
    pub parameter: Option<String>,
}

impl ExpressionErrorInfo {
    /// Create a new error description for an expression failure.
    ///
    /// # Examples
    /// ```
    /// use cucumber_dart_patterns::ExpressionErrorInfo;
    /// let info = ExpressionErrorInfo::new("empty optional", 2, None);
    /// assert_eq!(info.message, "empty optional");
    /// ```
    #[must_use]
    pub fn new(message: &'static str, position: usize, parameter: Option<String>) -> Self {
        Self {
            message,
            position,
            parameter,
        }
    }
}

impl fmt::Display for ExpressionErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(name) => write!(
                f,
                "{} for parameter type `{}` at byte {} (zero-based)",
                self.message, name, self.position
            ),
            None => write!(f, "{} at byte {} (zero-based)", self.message, self.position),
        }
    }
}

/// Errors surfaced while turning step definitions into regular expressions.
///
/// # Examples
/// ```
/// use cucumber_dart_patterns::{ExpressionErrorInfo, PatternError};
/// let info = ExpressionErrorInfo::new("undefined parameter type", 0, Some("colour".into()));
/// let err = PatternError::Expression(info.clone());
/// assert_eq!(err.to_string(), info.to_string());
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The Cucumber Expression is malformed.
    #[error("{0}")]
    Expression(ExpressionErrorInfo),
    /// A parameter type name cannot be registered.
    #[error("invalid parameter type name `{0}`")]
    InvalidParameterTypeName(String),
    /// The generated or user-supplied regex failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub(crate) fn expression_error(
    message: &'static str,
    position: usize,
    parameter: Option<String>,
) -> PatternError {
    PatternError::Expression(ExpressionErrorInfo::new(message, position, parameter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_error_with_parameter_name() {
        let info = ExpressionErrorInfo::new("undefined parameter type", 4, Some("colour".into()));
        assert_eq!(
            info.to_string(),
            "undefined parameter type for parameter type `colour` at byte 4 (zero-based)"
        );
    }

    #[test]
    fn formats_error_without_parameter_name() {
        let info = ExpressionErrorInfo::new("empty optional", 1, None);
        assert_eq!(info.to_string(), "empty optional at byte 1 (zero-based)");
    }

    #[test]
    fn forwards_regex_error_display() {
        let err = PatternError::Regex(regex::Error::Syntax("bad".into()));
        assert_eq!(
            err.to_string(),
            regex::Error::Syntax("bad".into()).to_string()
        );
    }

    #[test]
    fn names_rejected_parameter_type() {
        let err = PatternError::InvalidParameterTypeName("a{b".into());
        assert_eq!(err.to_string(), "invalid parameter type name `a{b`");
    }
}
