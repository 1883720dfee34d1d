//! Loading template descriptors from the user configuration.
//!
//! The configuration directory holds a `config.toml` with one table per
//! template:
//!
//! ```toml
//! [component]
//! type = "folder"
//! folder = "component"
//! root = "{{name}}"
//! name = "UI component"
//! name_param_optional = false
//! ```
//!
//! `folder` is relative to the configuration directory and may contain a
//! `vars.toml` with the template's default variables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::{TemplateDescriptor, TemplateKind, dir};
use crate::core::error::{Error, Result};
use crate::core::variables::Variables;

/// File listing the available templates
pub const CONFIG_FILE: &str = "config.toml";
/// Optional per-template file of default variables
pub const VARS_FILE: &str = "vars.toml";

/// One template table in `config.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateEntry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub folder: Option<String>,
    pub root: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub name_param_optional: bool,
}

/// Reads template definitions from a configuration directory
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    config_dir: PathBuf,
}

impl TemplateLoader {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Loader for the directory named by `ARTI_CONFIG_DIR` or the platform default
    pub fn from_env() -> Result<Self> {
        dir::config_dir()
            .map(Self::new)
            .ok_or_else(|| Error::config("Unable to determine the configuration directory"))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Load the template called `template` from `config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration can't be read or parsed, the
    /// template isn't declared, a required property is missing or its `type`
    /// is neither `file` nor `folder`.
    pub fn load(&self, template: &str) -> Result<TemplateDescriptor> {
        let config_path = self.config_path();
        debug!(config_path = %config_path.display(), "Reading user config");

        let content = fs::read_to_string(&config_path).map_err(|e| {
            debug!(error = %e, "Failed to read user config");
            Error::ConfigNotFound {
                path: config_path.clone(),
            }
        })?;
        let config: toml::Table = toml::from_str(&content)?;

        let value = config
            .get(template)
            .cloned()
            .ok_or_else(|| Error::TemplateNotFound {
                name: template.to_string(),
            })?;
        if !value.is_table() {
            return Err(Error::config(format!(
                "The template '{template}' must be a table"
            )));
        }
        let entry: TemplateEntry = value.try_into()?;

        let kind = TemplateKind::parse(entry.kind.as_deref().unwrap_or("unknown"));
        if let TemplateKind::Unknown(raw) = &kind {
            return Err(Error::InvalidTemplateKind(raw.clone()));
        }

        let folder = entry.folder.ok_or_else(|| {
            Error::config(format!(
                "The template '{template}' doesn't have the 'folder' property"
            ))
        })?;
        let root = entry.root.ok_or_else(|| {
            Error::config(format!(
                "The template '{template}' doesn't have the 'root' property"
            ))
        })?;

        let source_root = self.config_dir.join(folder);
        let default_variables = load_default_variables(&source_root)?;

        let descriptor = TemplateDescriptor::new(
            kind,
            source_root,
            root,
            entry.name.unwrap_or_else(|| template.to_string()),
        )
        .with_name_param_optional(entry.name_param_optional)
        .with_default_variables(default_variables);

        debug!("Loaded template:\n{}", descriptor);
        Ok(descriptor)
    }
}

/// Read the default variables declared in `<template_dir>/vars.toml`.
///
/// A missing file yields an empty table. Strings are taken verbatim,
/// integers and floats are rendered as text, anything else is skipped.
pub fn load_default_variables(template_dir: &Path) -> Result<Variables> {
    let vars_path = template_dir.join(VARS_FILE);
    let mut vars = Variables::new();

    if !vars_path.exists() {
        debug!(vars_path = %vars_path.display(), "No template variables file");
        return Ok(vars);
    }

    let content = fs::read_to_string(&vars_path).map_err(|e| Error::io(&vars_path, e))?;
    let table: toml::Table = toml::from_str(&content)?;

    for (key, value) in table {
        match value {
            toml::Value::String(s) => vars.insert(key, s),
            toml::Value::Integer(i) => vars.insert(key, i.to_string()),
            toml::Value::Float(f) => vars.insert(key, f.to_string()),
            other => warn!(
                variable = %key,
                value_type = other.type_str(),
                "Ignoring template variable of unsupported type"
            ),
        }
    }

    debug!(count = vars.len(), "Loaded template variables");
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    fn write_config(dir: &Path, content: &str) {
        fs::write(dir.join(CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn test_load_folder_template() {
        let config = TempDir::new().unwrap();
        write_config(
            config.path(),
            r#"
[crate]
type = "Folder"
folder = "rust-crate"
root = "{{name}}"
name = "Rust crate"
"#,
        );
        let template_dir = config.path().join("rust-crate");
        fs::create_dir_all(&template_dir).unwrap();
        fs::write(
            template_dir.join(VARS_FILE),
            "edition = \"2024\"\nmajor = 1\nratio = 0.5\n",
        )
        .unwrap();

        let template = TemplateLoader::new(config.path()).load("crate").unwrap();
        assert_eq!(template.kind(), &TemplateKind::Folder);
        assert_eq!(template.source_root(), template_dir.as_path());
        assert_eq!(template.root_name(), "{{name}}");
        assert_eq!(template.name(), "Rust crate");
        assert!(!template.name_param_optional());

        let vars = template.default_variables();
        assert_eq!(vars.get("edition"), Some("2024"));
        assert_eq!(vars.get("major"), Some("1"));
        assert_eq!(vars.get("ratio"), Some("0.5"));
    }

    #[test]
    fn test_load_file_template_without_vars() {
        let config = TempDir::new().unwrap();
        write_config(
            config.path(),
            r#"
[readme]
type = "file"
folder = "readme"
root = "README.md"
name_param_optional = true
"#,
        );

        let template = TemplateLoader::new(config.path()).load("readme").unwrap();
        assert_eq!(template.kind(), &TemplateKind::File);
        assert_eq!(template.name(), "readme");
        assert!(template.name_param_optional());
        assert!(template.default_variables().is_empty());
    }

    #[test]
    fn test_load_missing_config() {
        let config = TempDir::new().unwrap();
        let err = TemplateLoader::new(config.path()).load("any").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_unknown_template() {
        let config = TempDir::new().unwrap();
        write_config(config.path(), "[one]\ntype = \"file\"\nfolder = \"a\"\nroot = \"b\"\n");
        let err = TemplateLoader::new(config.path()).load("two").unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { name } if name == "two"));
    }

    #[test]
    fn test_load_rejects_unknown_kind() {
        let config = TempDir::new().unwrap();
        write_config(config.path(), "[t]\ntype = \"zip\"\nfolder = \"a\"\nroot = \"b\"\n");
        let err = TemplateLoader::new(config.path()).load("t").unwrap_err();
        assert!(matches!(err, Error::InvalidTemplateKind(raw) if raw == "zip"));

        write_config(config.path(), "[t]\nfolder = \"a\"\nroot = \"b\"\n");
        let err = TemplateLoader::new(config.path()).load("t").unwrap_err();
        assert!(matches!(err, Error::InvalidTemplateKind(_)));
    }

    #[test]
    fn test_load_requires_folder_and_root() {
        let config = TempDir::new().unwrap();
        write_config(config.path(), "[t]\ntype = \"file\"\nroot = \"b\"\n");
        let err = TemplateLoader::new(config.path()).load("t").unwrap_err();
        assert!(err.to_string().contains("'folder' property"));

        write_config(config.path(), "[t]\ntype = \"file\"\nfolder = \"a\"\n");
        let err = TemplateLoader::new(config.path()).load("t").unwrap_err();
        assert!(err.to_string().contains("'root' property"));
    }

    #[test]
    fn test_load_rejects_non_table_entry() {
        let config = TempDir::new().unwrap();
        write_config(config.path(), "t = \"file\"\n");
        let err = TemplateLoader::new(config.path()).load("t").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_reports_malformed_toml() {
        let config = TempDir::new().unwrap();
        write_config(config.path(), "[t\ntype = ");
        let err = TemplateLoader::new(config.path()).load("t").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    #[traced_test]
    fn test_default_variables_skip_unsupported_types() {
        let template_dir = TempDir::new().unwrap();
        fs::write(
            template_dir.path().join(VARS_FILE),
            "author = \"Jane\"\nenabled = true\ntags = [\"a\"]\n",
        )
        .unwrap();

        let vars = load_default_variables(template_dir.path()).unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("author"), Some("Jane"));
        assert!(logs_contain("Ignoring template variable of unsupported type"));
    }
}
