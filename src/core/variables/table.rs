//! The flat variable table and the sources that populate it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

use super::substitutor::NAME_PATTERN;
use crate::core::error::{Error, Result};

/// `key` or `key=value`, as accepted by `--define`
static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?s)^(?P<name>{NAME_PATTERN})(=(?P<value>.*))?$"))
        .expect("definition pattern is valid")
});

/// Name of the variable every generation run receives from the command line
pub const NAME_VARIABLE: &str = "name";

/// Mapping from variable name to its value.
///
/// Inserting an existing name overwrites the previous value, which is how the
/// built-in, template and user layers override each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(BTreeMap<String, String>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlays `other` on top of this table
    pub fn merge(&mut self, other: &Variables) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    /// Parses and applies one `key[=value]` definition
    pub fn define(&mut self, raw: &str) -> Result<()> {
        let (name, value) = parse_definition(raw)?;
        self.0.insert(name, value);
        Ok(())
    }

    pub(crate) fn set(&mut self, name: &str, value: String) {
        if let Some(slot) = self.0.get_mut(name) {
            *slot = value;
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "* {name}: {value}")?;
        }
        Ok(())
    }
}

/// Splits a `key[=value]` definition; the value defaults to the empty string.
///
/// # Examples
/// ```
/// use arti::core::variables::parse_definition;
///
/// assert_eq!(
///     parse_definition("author=Jane Doe").unwrap(),
///     ("author".to_string(), "Jane Doe".to_string())
/// );
/// assert_eq!(parse_definition("flag").unwrap().1, "");
/// assert!(parse_definition("2fast=yes").is_err());
/// ```
pub fn parse_definition(raw: &str) -> Result<(String, String)> {
    let caps = DEFINITION
        .captures(raw)
        .ok_or_else(|| Error::InvalidVariableDefinition {
            raw: raw.to_string(),
        })?;

    let name = caps["name"].to_string();
    let value = caps
        .name("value")
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    Ok((name, value))
}

/// Values the built-in variables are computed from.
///
/// Captured once by the caller so the core never reads the clock or the
/// working directory on its own.
#[derive(Debug, Clone)]
pub struct Builtins {
    pub now: DateTime<Local>,
    pub cwd: PathBuf,
}

impl Builtins {
    pub fn new(now: DateTime<Local>, cwd: impl AsRef<Path>) -> Self {
        Self {
            now,
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// Snapshot of the current time and process working directory
    pub fn current() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        Ok(Self::new(Local::now(), cwd))
    }

    /// `now`, `today`, `full_cwd` and `cwd`
    pub fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert(
            "now",
            self.now.format("%A %B %d, %Y - %I:%M:%S%p").to_string(),
        );
        vars.insert("today", self.now.format("%A %B %d, %Y").to_string());
        vars.insert("full_cwd", self.cwd.display().to_string());
        vars.insert(
            "cwd",
            self.cwd
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        vars
    }
}
