//! gitlab-client CLI
//!
//! Command-line access to the GitLab REST API

use anyhow::Context;
use clap::Parser;
use gitlab_client::cli::{Cli, Runner};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Runner::new(cli).run().await.context("gitlab-client failed")
}
