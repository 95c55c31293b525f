//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ListArgs, OutputFormat, ProjectCommands};
use crate::client::GitLabClient;
use crate::collection::CollectionResponse;
use crate::config::ClientConfig;
use crate::error::{Result, ResultExt};
use crate::models::{Project, WebhookEvent};
use crate::query::{ForkedProjectQuery, ProjectQuery, SingleProjectQuery};
use crate::types::ProjectId;
use futures::{StreamExt, TryStreamExt};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Projects { command } => match command {
                ProjectCommands::List(args) => self.list_projects(args).await,
                ProjectCommands::Get { id, statistics } => self.get_project(id, *statistics).await,
                ProjectCommands::Languages { id } => self.languages(id).await,
                ProjectCommands::Forks { id, search, limit } => {
                    self.forks(id, search.as_deref(), *limit).await
                }
            },
            Commands::Webhook { file } => self.webhook(file),
        }
    }

    /// Merge the config file with `--url` / `--token`
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };

        if let Some(url) = self.cli.url.as_ref().filter(|u| !u.trim().is_empty()) {
            config.base_url.clone_from(url);
        }
        if let Some(token) = self.cli.token.as_ref().filter(|t| !t.trim().is_empty()) {
            config.token = Some(token.clone());
        }

        config.validate()?;
        Ok(config)
    }

    fn client(&self) -> Result<GitLabClient> {
        GitLabClient::new(self.client_config()?)
    }

    // ========================================================================
    // projects
    // ========================================================================

    async fn list_projects(&self, args: &ListArgs) -> Result<()> {
        let query = ProjectQuery {
            scope: args.scope,
            search: args.search.clone(),
            visibility: args.visibility,
            min_access_level: args.min_access_level,
            archived: args.archived,
            ascending: args.ascending.then_some(true),
            order_by: args.order_by.clone(),
            topics: args.topics.clone(),
            per_page: args.per_page,
            ..Default::default()
        };

        let collection = self.client()?.projects().list(&query)?;
        self.output_log(&format!(
            "Listing projects with {:?} pagination",
            collection.mode()
        ));
        self.emit_projects(collection, args.limit).await
    }

    async fn get_project(&self, id: &ProjectId, statistics: bool) -> Result<()> {
        let query = statistics.then(SingleProjectQuery::with_statistics);
        let project = self.client()?.projects().get(id.clone(), query.as_ref()).await?;
        self.output_record("projects", &project)
    }

    async fn languages(&self, id: &ProjectId) -> Result<()> {
        let languages = self.client()?.projects().languages(id.clone()).await?;
        if languages.is_empty() {
            self.output_log("No language statistics available yet");
        }
        self.output_record("languages", &languages)
    }

    async fn forks(&self, id: &ProjectId, search: Option<&str>, limit: Option<usize>) -> Result<()> {
        let query = search.map(|s| ForkedProjectQuery {
            search: Some(s.to_string()),
            ..Default::default()
        });
        let collection = self.client()?.projects().forks(id.clone(), query.as_ref())?;
        self.emit_projects(collection, limit).await
    }

    /// Stream projects to stdout, stopping at `limit`
    async fn emit_projects(
        &self,
        collection: CollectionResponse<Project>,
        limit: Option<usize>,
    ) -> Result<()> {
        let mut projects = collection.stream().take(limit.unwrap_or(usize::MAX));
        let mut count = 0usize;

        while let Some(project) = projects.try_next().await? {
            self.output_record("projects", &project)?;
            count += 1;
        }

        debug!("Emitted {count} projects");
        self.output_message(&json!({
            "type": "SUMMARY",
            "summary": { "stream": "projects", "records": count }
        }));
        Ok(())
    }

    // ========================================================================
    // webhook
    // ========================================================================

    fn webhook(&self, file: &Path) -> Result<()> {
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read webhook file '{}'", file.display()))?;
        let event = WebhookEvent::from_json(&content)?;
        self.output_message(&json!({
            "type": "WEBHOOK",
            "kind": event.kind(),
            "summary": summarize_webhook(&event),
        }));
        Ok(())
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn output_record<T: serde::Serialize>(&self, stream: &str, record: &T) -> Result<()> {
        let record = serde_json::to_value(record)?;
        self.output_message(&json!({
            "type": "RECORD",
            "stream": stream,
            "record": record,
        }));
        Ok(())
    }

    fn output_log(&self, message: &str) {
        self.output_message(&json!({
            "type": "LOG",
            "log": { "level": "INFO", "message": message }
        }));
    }

    /// Output a message in the selected format
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// The fields worth showing for each webhook kind
fn summarize_webhook(event: &WebhookEvent) -> Value {
    match event {
        WebhookEvent::TagPush(body) => json!({
            "tag": body.tag_name(),
            "project": body.project.as_ref().and_then(|p| p.path_with_namespace.clone()),
            "user": body.user_username,
            "deleted": body.is_deletion(),
            "checkout_sha": body.checkout_sha.map(|sha| sha.to_string()),
            "commits": body.total_commits_count,
        }),
        WebhookEvent::Pipeline(body) => {
            let attrs = body.object_attributes.as_ref();
            json!({
                "pipeline_id": attrs.map(|a| a.id),
                "ref": attrs.and_then(|a| a.git_ref.clone()),
                "status": attrs.and_then(|a| a.status.clone()),
                "stages": attrs.map(|a| a.stages.clone()).unwrap_or_default(),
                "duration": attrs.and_then(|a| a.duration),
                "project": body.project.as_ref().and_then(|p| p.path_with_namespace.clone()),
                "user": body.user.as_ref().map(|u| u.username.clone()),
            })
        }
    }
}
