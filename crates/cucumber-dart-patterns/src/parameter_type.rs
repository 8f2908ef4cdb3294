//! Parameter types available to Cucumber Expressions.
//!
//! The registry maps a parameter type name (the `int` in `{int}`) to the
//! regular-expression fragment it matches. [`ParameterTypeRegistry::dart`]
//! adds the Dart spellings on top of the standard Cucumber set.

use std::collections::BTreeMap;

use regex::Regex;

use crate::errors::PatternError;

const INT: &str = r"-?\d+";
const FLOAT: &str = r"-?\d*[.,]?\d+";
const WORD: &str = r"[^\s]+";
const STRING: &str = r#""(?:[^"\\]*(?:\\.[^"\\]*)*)"|'(?:[^'\\]*(?:\\.[^'\\]*)*)'"#;
const ANONYMOUS: &str = r".*";

/// Parameter type names mapped to their regex fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterTypeRegistry {
    types: BTreeMap<String, String>,
}

impl Default for ParameterTypeRegistry {
    fn default() -> Self {
        Self::dart()
    }
}

impl ParameterTypeRegistry {
    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// The standard Cucumber parameter types: `int`, `float`, `word`,
    /// `string` and the anonymous `{}`.
    ///
    /// # Examples
    /// ```
    /// use cucumber_dart_patterns::ParameterTypeRegistry;
    ///
    /// let registry = ParameterTypeRegistry::standard();
    /// assert_eq!(registry.regex_for("int"), Some(r"-?\d+"));
    /// assert_eq!(registry.regex_for(""), Some(".*"));
    /// assert_eq!(registry.regex_for("double"), None);
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for (name, regex) in [
            ("int", INT),
            ("float", FLOAT),
            ("word", WORD),
            ("string", STRING),
            ("", ANONYMOUS),
        ] {
            registry.types.insert(name.to_owned(), regex.to_owned());
        }
        registry
    }

    /// The standard types plus the Dart names `int` and `double`.
    ///
    /// # Examples
    /// ```
    /// use cucumber_dart_patterns::ParameterTypeRegistry;
    ///
    /// let registry = ParameterTypeRegistry::dart();
    /// assert_eq!(registry.regex_for("double"), registry.regex_for("float"));
    /// ```
    #[must_use]
    pub fn dart() -> Self {
        let mut registry = Self::standard();
        registry.types.insert("int".to_owned(), INT.to_owned());
        registry.types.insert("double".to_owned(), FLOAT.to_owned());
        registry
    }

    /// Register or replace a parameter type.
    ///
    /// # Errors
    /// Returns [`PatternError::InvalidParameterTypeName`] when `name` contains
    /// whitespace or one of `{ } ( ) \ /`, and [`PatternError::Regex`] when
    /// `regex` does not compile.
    pub fn define(&mut self, name: &str, regex: &str) -> Result<(), PatternError> {
        let invalid = name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | '(' | ')' | '\\' | '/'));
        if invalid {
            return Err(PatternError::InvalidParameterTypeName(name.to_owned()));
        }
        Regex::new(regex)?;
        if self
            .types
            .insert(name.to_owned(), regex.to_owned())
            .is_some()
        {
            log::debug!("parameter type `{name}` redefined");
        }
        Ok(())
    }

    /// Look up the regex fragment for a parameter type.
    #[must_use]
    pub fn regex_for(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(String::as_str)
    }

    /// Iterate over registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}
