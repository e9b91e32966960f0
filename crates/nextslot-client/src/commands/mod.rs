//! Subcommand implementations.

pub mod config;
pub mod end_time;
pub mod resolve;
