//! Directive argument parsing.
//!
//! Parses the `[arguments]{key="value"}` part of a directive and splits the
//! argument text according to a [`DirectiveSpec`].

use std::collections::BTreeMap;

use super::DirectiveSpec;

/// Parsed arguments from directive syntax.
///
/// Represents the raw argument text and options extracted from a directive:
/// `::name[argument text]{key="value"}`
///
/// # Example
///
/// ```
/// use snipdoc_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("hero banner", r#"lang="en" width=100"#);
/// assert_eq!(args.text, "hero banner");
/// assert_eq!(args.get("lang"), Some("en"));
/// assert_eq!(args.get("width"), Some("100"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Argument text from brackets: `[text]` (empty string if not provided).
    pub text: String,
    /// Options from braces: `{key="value"}`.
    pub options: BTreeMap<String, String>,
}

impl DirectiveArgs {
    /// Parse argument text and option string into structured arguments.
    ///
    /// # Arguments
    ///
    /// * `text` - The text from brackets `[text]`
    /// * `options_str` - The options string from braces `{...}` (without braces)
    #[must_use]
    pub fn parse(text: &str, options_str: &str) -> Self {
        let mut args = Self {
            text: text.to_owned(),
            ..Default::default()
        };

        // key="value", key='value', key=value or a bare flag
        let mut remaining = options_str.trim();

        while !remaining.is_empty() {
            if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.options.insert(key.to_owned(), value.to_owned());
                remaining = rest.trim_start();
            } else {
                let end = remaining
                    .find(char::is_whitespace)
                    .unwrap_or(remaining.len());
                args.options
                    .insert(remaining[..end].to_owned(), String::new());
                remaining = remaining[end..].trim_start();
            }
        }

        args
    }

    /// Get an option value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Split the argument text into positional arguments.
    ///
    /// Arguments are separated by whitespace. When the [`DirectiveSpec`] allows
    /// whitespace in the final argument, everything after the leading arguments
    /// is kept verbatim as the last one.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message when fewer than the required or more
    /// than the allowed number of arguments are supplied.
    ///
    /// # Example
    ///
    /// ```
    /// use snipdoc_renderer::directive::{DirectiveArgs, DirectiveSpec};
    ///
    /// let spec = DirectiveSpec::new(1, 0).with_final_argument_whitespace();
    /// let args = DirectiveArgs::parse("my snippet", "");
    /// assert_eq!(args.arguments(&spec).unwrap(), vec!["my snippet"]);
    ///
    /// let empty = DirectiveArgs::parse("", "");
    /// assert!(empty.arguments(&spec).is_err());
    /// ```
    pub fn arguments(&self, spec: &DirectiveSpec) -> Result<Vec<String>, String> {
        let required = spec.required_arguments;
        let max = spec.required_arguments + spec.optional_arguments;
        let text = self.text.trim();

        if text.is_empty() {
            if required > 0 {
                return Err(format!("{required} argument(s) required, 0 supplied"));
            }
            return Ok(Vec::new());
        }

        if max == 0 {
            return Err(format!("no arguments permitted, got \"{text}\""));
        }

        let arguments: Vec<String> = if spec.final_argument_whitespace {
            split_whitespace_n(text, max)
                .into_iter()
                .map(str::to_owned)
                .collect()
        } else {
            text.split_whitespace().map(str::to_owned).collect()
        };

        if arguments.len() < required {
            return Err(format!(
                "{required} argument(s) required, {} supplied",
                arguments.len()
            ));
        }
        if arguments.len() > max {
            return Err(format!(
                "maximum {max} argument(s) allowed, {} supplied",
                arguments.len()
            ));
        }

        Ok(arguments)
    }
}

/// Split on whitespace into at most `n` pieces, keeping the remainder of the
/// last piece verbatim.
fn split_whitespace_n(text: &str, n: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut remaining = text.trim_start();

    while !remaining.is_empty() {
        if pieces.len() + 1 == n {
            pieces.push(remaining.trim_end());
            break;
        }
        let end = remaining
            .find(char::is_whitespace)
            .unwrap_or(remaining.len());
        pieces.push(&remaining[..end]);
        remaining = remaining[end..].trim_start();
    }

    pieces
}

/// Parse a key-value pair from the options string.
///
/// Supports: `key="value"`, `key='value'`, `key=value`
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let key_end = s.find(|c: char| c == '=' || c.is_whitespace())?;
    if !s[key_end..].starts_with('=') {
        return None;
    }
    let key = &s[..key_end];

    if key.is_empty() {
        return None;
    }

    let after_eq = &s[key_end + 1..];

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}
