//! The loaded, immutable description of one template.

use std::fmt;
use std::path::{Path, PathBuf};

use super::TemplateKind;
use crate::core::variables::Variables;

/// Everything the generator needs to know about a template
#[derive(Debug, Clone)]
pub struct TemplateDescriptor {
    kind: TemplateKind,
    /// Folder holding the template, `vars.toml` included
    source_root: PathBuf,
    /// File or directory inside `source_root` that gets generated
    root_name: String,
    name: String,
    name_param_optional: bool,
    default_variables: Variables,
}

impl TemplateDescriptor {
    pub fn new(
        kind: TemplateKind,
        source_root: impl Into<PathBuf>,
        root_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source_root: source_root.into(),
            root_name: root_name.into(),
            name: name.into(),
            name_param_optional: false,
            default_variables: Variables::new(),
        }
    }

    pub fn with_name_param_optional(mut self, optional: bool) -> Self {
        self.name_param_optional = optional;
        self
    }

    pub fn with_default_variables(mut self, vars: Variables) -> Self {
        self.default_variables = vars;
        self
    }

    pub fn kind(&self) -> &TemplateKind {
        &self.kind
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_param_optional(&self) -> bool {
        self.name_param_optional
    }

    pub fn default_variables(&self) -> &Variables {
        &self.default_variables
    }

    /// Path of the file or directory generation starts from
    pub fn source_path(&self) -> PathBuf {
        self.source_root.join(&self.root_name)
    }
}

impl fmt::Display for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Template name: {}", self.name)?;
        writeln!(f, "Template type: {}", self.kind)?;
        writeln!(f, "Location: {}", self.source_root.display())?;
        writeln!(f, "Root: {}", self.root_name)?;
        writeln!(f, "Variables:")?;
        write!(f, "{}", self.default_variables)
    }
}
