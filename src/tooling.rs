//! Tooling & Integration Layer
//!
//! Command-line access to the path index.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
