//! Commits embedded in webhook bodies

use crate::types::Sha1;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Commit author as a nested object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A commit as sent in webhook POST bodies
///
/// Unlike [`crate::models::Commit`] the author is a nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookCommit {
    pub id: Sha1,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
}

/// A commit in a tag push, with the paths it touched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCommit {
    #[serde(flatten)]
    pub commit: WebhookCommit,
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub modified: Vec<String>,
    #[serde(default)]
    pub removed: Vec<String>,
}

impl TagCommit {
    /// Total number of paths touched
    pub fn changed_paths(&self) -> usize {
        self.added.len() + self.modified.len() + self.removed.len()
    }
}
