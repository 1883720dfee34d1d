//! Error handling for the arti generator.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every failure of a generation run
//! is surfaced as one of these variants; nothing in the core panics on bad input.
//!
//! # Examples
//!
//! ```
//! use arti::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("missing 'root' property"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for arti operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for arti operations
#[derive(Debug, Error)]
pub enum Error {
    /// The template declares a kind that is neither `file` nor `folder`
    #[error("Unexpected template type received: '{0}'")]
    InvalidTemplateKind(String),

    /// The template source file or folder does not exist
    #[error("The template source '{}' does not exist", .0.display())]
    SourceNotFound(PathBuf),

    /// The top-level generation target is already present
    #[error("The destination '{}' already exists", .0.display())]
    DestinationExists(PathBuf),

    /// I/O failure on a specific path
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template tree contains something other than a directory or a regular file
    #[error("Unrecognized or invalid file type on template: '{}'", .path.display())]
    UnsupportedEntryType { path: PathBuf },

    /// A `key[=value]` definition could not be parsed
    #[error("Invalid variable definition '{raw}'")]
    InvalidVariableDefinition { raw: String },

    /// Variables alias each other in a loop
    #[error("Cyclic variable reference: {}", format_cycle(.participants))]
    CyclicReference { participants: Vec<String> },

    /// The mandatory `name` variable was not supplied
    #[error("The 'name' parameter is required by template '{template}'")]
    MissingName { template: String },

    /// The user configuration file could not be found or read
    #[error("User config not found at '{}'", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// The requested template is not declared in the user configuration
    #[error("Template '{name}' not found on user config")]
    TemplateNotFound { name: String },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Attach a path to an I/O error
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn format_cycle(participants: &[String]) -> String {
    match participants.first() {
        Some(first) => format!("{} -> {}", participants.join(" -> "), first),
        None => String::new(),
    }
}
