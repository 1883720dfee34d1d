//! arti core library
//!
//! This library provides variable resolution, placeholder substitution and
//! the engine that generates files and directory trees from templates.

pub mod error;
pub mod generator;
pub mod templates;
pub mod variables;

pub use error::{Error, Result};
pub use generator::{GenerationReport, Generator, collect_variables};
