//! Users, assignees and groups

use crate::query::Visibility;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user as embedded in projects, snippets and webhook payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A user assigned to an issue or merge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "avatar_url", default)]
    pub avatar_url: Option<String>,
}

/// A group a project belongs to or is shared with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub full_path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
