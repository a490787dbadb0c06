//! Subcommand handlers. Each exposes a single `execute` function.

pub mod config;
pub mod serve;
