//! Regex capture helpers for matched step text.

use std::ops::Range;

use regex::Regex;

/// One capture group of a matched step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedArgument {
    /// The captured text; empty when the group did not participate.
    pub value: String,
    /// Byte range of the capture in the step text, when it participated.
    pub span: Option<Range<usize>>,
}

/// Extract the capture groups when `text` matches `re`, returning `None`
/// otherwise.
///
/// Group 0 (the whole match) is skipped. Groups that do not participate
/// yield empty values so positions stay aligned with the definition's
/// parameters.
///
/// # Examples
/// ```
/// # use regex::Regex;
/// # use cucumber_dart_patterns::extract_captured_arguments;
/// let regex = Regex::new(r"^(\d+)-(\w+)$").unwrap_or_else(|err| panic!("{err}"));
/// let values: Vec<_> = extract_captured_arguments(&regex, "42-answer")
///     .unwrap_or_default()
///     .into_iter()
///     .map(|arg| arg.value)
///     .collect();
/// assert_eq!(values, vec!["42".to_string(), "answer".to_string()]);
/// assert!(extract_captured_arguments(&regex, "nope").is_none());
/// ```
#[must_use]
pub fn extract_captured_arguments(re: &Regex, text: &str) -> Option<Vec<CapturedArgument>> {
    let caps = re.captures(text)?;
    Some(
        caps.iter()
            .skip(1)
            .map(|capture| {
                capture.map_or_else(
                    || CapturedArgument {
                        value: String::new(),
                        span: None,
                    },
                    |m| CapturedArgument {
                        value: m.as_str().to_owned(),
                        span: Some(m.range()),
                    },
                )
            })
            .collect(),
    )
}
