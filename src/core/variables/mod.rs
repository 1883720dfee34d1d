//! Template variables: the flat table, alias resolution and placeholder substitution.
//!
//! A generation run builds its table from three layers, each overriding the
//! previous one:
//! 1. built-in values (`now`, `today`, `full_cwd`, `cwd`)
//! 2. defaults declared by the template in `vars.toml`
//! 3. `--define` assignments and the `name` argument
//!
//! The table is then passed through [`resolve`] and handed to the generator,
//! which calls [`substitute`] on every path and line it writes.

pub mod resolver;
pub mod substitutor;
pub mod table;

pub use resolver::resolve;
pub use substitutor::{alias_target, substitute, substitute_bytes};
pub use table::{Builtins, NAME_VARIABLE, Variables, parse_definition};
