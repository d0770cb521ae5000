//! Subcommand implementations.

pub mod completions;
pub mod print;
pub mod view;
