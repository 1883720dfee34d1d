//! Template kind definitions.
//!
//! A template either generates a single file or a whole directory tree.
//! Anything else found in the configuration is kept as [`TemplateKind::Unknown`]
//! so the generator can reject it with a proper error.
//!
//! # Examples
//!
//! ```
//! use arti::core::templates::TemplateKind;
//!
//! let kind = TemplateKind::parse("Folder");
//! assert_eq!(kind, TemplateKind::Folder);
//! assert_eq!(kind.as_str(), "folder");
//! assert_eq!(kind.to_string(), "folder");
//!
//! assert_eq!(TemplateKind::parse("zip"), TemplateKind::Unknown("zip".to_string()));
//! ```

use std::fmt;

/// What a template generates
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// A single file, copied with substitution
    File,
    /// A directory tree, walked recursively
    Folder,
    /// Unrecognized `type` value from the configuration
    Unknown(String),
}

impl TemplateKind {
    /// Parses a kind case-insensitively, keeping unrecognized values
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "file" => Self::File,
            "folder" => Self::Folder,
            _ => Self::Unknown(s.to_string()),
        }
    }

    /// Returns the kind identifier as a string slice
    pub fn as_str(&self) -> &str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
            Self::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
