//! Repository commits

use crate::types::Sha1;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit as returned by `/projects/:id/repository/commits`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: Sha1,
    pub short_id: String,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    pub author_name: String,
    pub author_email: String,
    pub authored_date: DateTime<Utc>,
    pub committer_name: String,
    pub committer_email: String,
    pub committed_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "parent_ids", default)]
    pub parents: Vec<Sha1>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub stats: Option<CommitStats>,
    #[serde(default)]
    pub web_url: Option<String>,
}

impl Commit {
    /// Whether this is a merge commit
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Line statistics of a commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}
