//! Project resources and payloads

use super::user::User;
use crate::query::Visibility;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project as returned by `/projects` endpoints
///
/// Most fields are optional because `simple=true` responses carry only a
/// subset of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub name_with_namespace: Option<String>,
    pub path: String,
    pub path_with_namespace: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub http_url_to_repo: Option<String>,
    #[serde(default)]
    pub ssh_url_to_repo: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub namespace: Option<Namespace>,
    #[serde(default)]
    pub owner: Option<User>,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub star_count: u32,
    #[serde(default)]
    pub statistics: Option<ProjectStatistics>,
}

/// The namespace (user or group) a project lives in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub id: u64,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub full_path: Option<String>,
}

/// Storage statistics, present when requested with `statistics=true`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectStatistics {
    pub commit_count: u64,
    pub storage_size: u64,
    pub repository_size: u64,
    pub wiki_size: u64,
    pub lfs_objects_size: u64,
    pub job_artifacts_size: u64,
    pub packages_size: u64,
    pub snippets_size: u64,
}

/// Body of `POST /projects`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialize_with_readme: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_requests_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub topics: Vec<String>,
}

impl ProjectCreate {
    /// Minimal payload
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Body of `PUT /projects/:id`; only set fields are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_requests_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki_enabled: Option<bool>,
}

/// Body of `POST /projects/:id/fork`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

/// A template listed under `/projects/:id/templates/:type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTemplate {
    pub key: String,
    pub name: String,
}

/// A merge request description template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMergeRequestTemplate {
    pub name: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Response of `POST /projects/:id/uploads`
///
/// `markdown` is ready to paste into an issue or merge request description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedProjectFile {
    #[serde(default)]
    pub id: Option<u64>,
    pub alt: String,
    pub url: String,
    #[serde(default)]
    pub full_path: Option<String>,
    pub markdown: String,
}
