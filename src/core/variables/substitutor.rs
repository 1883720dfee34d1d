//! Placeholder substitution for template paths and contents.
//!
//! A placeholder is two opening braces, optional spaces, a variable name,
//! optional spaces and two closing braces: `{{name}}`, `{{ name }}`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex, bytes};

use super::Variables;

/// Grammar for a variable name
pub const NAME_PATTERN: &str = "[A-Za-z][A-Za-z0-9_]*";

/// Matches one placeholder anywhere in a line
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\{{\{{ *(?P<name>{NAME_PATTERN}) *\}}\}}"))
        .expect("placeholder pattern is valid")
});

/// Same as [`PLACEHOLDER`] over raw bytes, for file contents that may not be UTF-8
static PLACEHOLDER_BYTES: Lazy<bytes::Regex> = Lazy::new(|| {
    bytes::Regex::new(&format!(r"\{{\{{ *(?P<name>{NAME_PATTERN}) *\}}\}}"))
        .expect("placeholder pattern is valid")
});

/// Matches a value that is nothing but a single placeholder
static ALIAS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\{{\{{ *(?P<name>{NAME_PATTERN}) *\}}\}}$"))
        .expect("alias pattern is valid")
});

/// Replaces every placeholder in `text` with the value of the named variable.
///
/// Unknown names are replaced with the empty string, so this never fails.
///
/// # Examples
/// ```
/// use arti::core::variables::{Variables, substitute};
///
/// let mut vars = Variables::new();
/// vars.insert("name", "World");
///
/// assert_eq!(substitute("Hello {{ name }}!", &vars), "Hello World!");
/// assert_eq!(substitute("{{name}}{{missing}}", &vars), "World");
/// ```
pub fn substitute(text: &str, vars: &Variables) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            vars.get(&caps["name"]).unwrap_or_default().to_string()
        })
        .into_owned()
}

/// Byte-level [`substitute`]; bytes outside placeholders are copied as they are.
pub fn substitute_bytes(line: &[u8], vars: &Variables) -> Vec<u8> {
    PLACEHOLDER_BYTES
        .replace_all(line, |caps: &bytes::Captures| {
            std::str::from_utf8(&caps["name"])
                .ok()
                .and_then(|name| vars.get(name))
                .unwrap_or_default()
                .as_bytes()
                .to_vec()
        })
        .into_owned()
}

/// Returns the referenced name when `value` is exactly one placeholder,
/// ignoring surrounding spaces.
pub fn alias_target(value: &str) -> Option<&str> {
    ALIAS
        .captures(value.trim_matches(' '))
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str())
}
