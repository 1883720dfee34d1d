//! Template definitions and loading.
//!
//! A template is a pre-authored file or directory tree living in the user
//! configuration directory, described by a table in `config.toml`. Loading it
//! yields an immutable [`TemplateDescriptor`] that the generator consumes.

pub mod descriptor;
pub mod dir;
pub mod kind;
pub mod loader;

pub use descriptor::*;
pub use kind::*;
pub use loader::{TemplateLoader, load_default_variables};
