//! Scaffold files and directory trees from named templates.
#![deny(unsafe_code)]

pub mod core;
