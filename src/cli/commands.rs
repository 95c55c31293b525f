//! CLI commands and argument parsing

use crate::query::{AccessLevel, ProjectQueryScope, Visibility};
use crate::types::ProjectId;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the GitLab REST API
#[derive(Parser, Debug)]
#[command(name = "gitlab-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API root, e.g. https://gitlab.example.com/api/v4
    #[arg(long, global = true, env = "GITLAB_URL")]
    pub url: Option<String>,

    /// Access token
    #[arg(long, global = true, env = "GITLAB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project operations
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Decode a webhook body saved to a file and summarize it
    Webhook {
        /// JSON file as received by the webhook endpoint
        file: PathBuf,
    },
}

/// `projects` subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    List(ListArgs),

    /// Show one project
    Get {
        /// Numeric id or full path (group/project)
        #[arg(value_parser = parse_project_id)]
        id: ProjectId,

        /// Include storage statistics
        #[arg(long)]
        statistics: bool,
    },

    /// Show the language breakdown of a project
    Languages {
        /// Numeric id or full path (group/project)
        #[arg(value_parser = parse_project_id)]
        id: ProjectId,
    },

    /// List the forks of a project
    Forks {
        /// Numeric id or full path (group/project)
        #[arg(value_parser = parse_project_id)]
        id: ProjectId,

        /// Only forks matching this text
        #[arg(long)]
        search: Option<String>,

        /// Stop after this many forks
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Digits select a project by id; anything else is a full path
fn parse_project_id(value: &str) -> Result<ProjectId, String> {
    value.parse().map_err(|e: crate::error::Error| e.to_string())
}

/// Filters for `projects list`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only projects matching this text (switches to offset pagination)
    #[arg(long)]
    pub search: Option<String>,

    /// accessible, owned or all
    #[arg(long, default_value = "all")]
    pub scope: ProjectQueryScope,

    /// private, internal or public
    #[arg(long)]
    pub visibility: Option<Visibility>,

    /// Minimum access level, by name (developer) or value (30)
    #[arg(long)]
    pub min_access_level: Option<AccessLevel>,

    /// Topic filter; repeat for several
    #[arg(long = "topic")]
    pub topics: Vec<String>,

    /// Page size (1-100)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Sort field
    #[arg(long)]
    pub order_by: Option<String>,

    /// Sort ascending
    #[arg(long)]
    pub ascending: bool,

    /// Only archived (true) or unarchived (false) projects
    #[arg(long)]
    pub archived: Option<bool>,

    /// Stop after this many projects; later pages are never fetched
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
