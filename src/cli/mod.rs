//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `projects list` - List projects, lazily, with filters
//! - `projects get` - Show one project
//! - `projects languages` - Language breakdown (polled)
//! - `projects forks` - List forks
//! - `webhook` - Decode a saved webhook body

mod commands;
mod runner;

pub use commands::{Cli, Commands, ListArgs, OutputFormat, ProjectCommands};
pub use runner::Runner;
