//! Function-name strategies for generated step definitions.
//!
//! A [`NameStyle`] turns the words left after stripping arguments from a step
//! into an identifier. Snippet generation accepts any `Fn(&str) -> String`;
//! [`NameStyle::generator`] adapts a style to that shape.

use std::fmt;
use std::str::FromStr;

use convert_case::{Case, Casing};

/// Name used when a phrase contains no identifier characters.
pub const DEFAULT_FUNCTION_NAME: &str = "step";

/// Identifier casing applied to step phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStyle {
    /// `iHaveCucumbers`, the Dart convention.
    #[default]
    Camel,
    /// `i_have_cucumbers`.
    Snake,
}

impl NameStyle {
    /// Return the style's configuration label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Camel => "camel",
            Self::Snake => "snake",
        }
    }

    /// Convert a step phrase into an identifier.
    ///
    /// Characters other than letters, digits and underscores separate words.
    /// A leading digit gains an underscore prefix and an empty result falls
    /// back to [`DEFAULT_FUNCTION_NAME`].
    ///
    /// # Examples
    ///
    /// ```
    /// use cucumber_dart_patterns::NameStyle;
    ///
    /// assert_eq!(NameStyle::Camel.function_name("I have   in my  "), "iHaveInMy");
    /// assert_eq!(NameStyle::Snake.function_name("the user's basket"), "the_user_s_basket");
    /// assert_eq!(NameStyle::Camel.function_name("  "), "step");
    /// ```
    #[must_use]
    pub fn function_name(&self, phrase: &str) -> String {
        let sanitised: String = phrase
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
            .collect();
        let case = match self {
            Self::Camel => Case::Camel,
            Self::Snake => Case::Snake,
        };
        let name = sanitised.trim().to_case(case);
        if name.is_empty() {
            return DEFAULT_FUNCTION_NAME.to_owned();
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return format!("_{name}");
        }
        name
    }

    /// Return a closure usable as a snippet name generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cucumber_dart_patterns::NameStyle;
    ///
    /// let generate = NameStyle::Snake.generator();
    /// assert_eq!(generate("I am logged in"), "i_am_logged_in");
    /// ```
    #[must_use]
    pub fn generator(self) -> impl Fn(&str) -> String {
        move |phrase| self.function_name(phrase)
    }
}

/// Error returned when a [`NameStyle`] label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameStyleParseError(pub String);

impl fmt::Display for NameStyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown name style '{}', expected camel or snake", self.0)
    }
}

impl std::error::Error for NameStyleParseError {}

impl FromStr for NameStyle {
    type Err = NameStyleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("camel") {
            Ok(Self::Camel)
        } else if trimmed.eq_ignore_ascii_case("snake") {
            Ok(Self::Snake)
        } else {
            Err(NameStyleParseError(trimmed.to_owned()))
        }
    }
}

impl fmt::Display for NameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
