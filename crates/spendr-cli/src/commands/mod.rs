//! CLI subcommands.

pub mod categorize;
pub mod config;
pub mod process;
