//! Pipeline events

use super::{commit::WebhookCommit, WebhookProject};
use crate::error::{Error, Result};
use crate::models::User;
use crate::types::Sha1;
use serde::{Deserialize, Serialize};

/// Body of a `pipeline` webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineEventBody {
    #[serde(default)]
    pub object_kind: Option<String>,
    #[serde(default)]
    pub object_attributes: Option<PipelineObjectAttributes>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub project: Option<WebhookProject>,
    #[serde(default)]
    pub commit: Option<WebhookCommit>,
}

impl PipelineEventBody {
    /// Decode a webhook POST body
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::decode(format!("pipeline event: {e}")))
    }
}

/// The pipeline itself
///
/// Timestamps are kept as sent; GitLab uses `2024-01-02 03:04:05 UTC`
/// here rather than RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineObjectAttributes {
    pub id: u64,
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub tag: bool,
    #[serde(default)]
    pub sha: Option<Sha1>,
    #[serde(default)]
    pub before_sha: Option<Sha1>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub detailed_status: Option<String>,
    #[serde(default)]
    pub stages: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub finished_at: Option<String>,
    /// Seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub queued_duration: Option<u64>,
}
