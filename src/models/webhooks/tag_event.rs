//! Tag push events

use super::{commit::TagCommit, WebhookProject};
use crate::error::{Error, Result};
use crate::types::Sha1;
use serde::{Deserialize, Serialize};

/// Body of a `tag_push` webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagEventBody {
    #[serde(default)]
    pub object_kind: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
    /// All zeros when the tag was created
    #[serde(default)]
    pub before: Option<Sha1>,
    /// All zeros when the tag was deleted
    #[serde(default)]
    pub after: Option<Sha1>,
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub checkout_sha: Option<Sha1>,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_username: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_avatar: Option<String>,
    #[serde(default)]
    pub project_id: u64,
    #[serde(default)]
    pub project: Option<WebhookProject>,
    #[serde(default)]
    pub commits: Vec<TagCommit>,
    #[serde(default)]
    pub total_commits_count: u32,
}

impl TagEventBody {
    /// Decode a webhook POST body
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::decode(format!("tag event: {e}")))
    }

    /// Tag name without the `refs/tags/` prefix
    pub fn tag_name(&self) -> Option<&str> {
        self.git_ref
            .as_deref()
            .map(|r| r.strip_prefix("refs/tags/").unwrap_or(r))
    }

    /// Whether the push removed the tag
    pub fn is_deletion(&self) -> bool {
        self.after.is_some_and(|sha| sha.is_zero())
    }
}
