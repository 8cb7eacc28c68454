//! Subcommand implementations

pub mod build;
pub mod check;
pub mod config;
pub mod tags;
