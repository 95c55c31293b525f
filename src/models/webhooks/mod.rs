//! Webhook POST bodies
//!
//! GitLab sends one JSON document per event; `object_kind` names the
//! event type. [`WebhookEvent::from_json`] dispatches on it, or decode a
//! known body type directly with its own `from_json`.

mod commit;
mod pipeline_event;
mod tag_event;

pub use commit::{Author, TagCommit, WebhookCommit};
pub use pipeline_event::{PipelineEventBody, PipelineObjectAttributes};
pub use tag_event::TagEventBody;

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// Project summary embedded in webhook bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookProject {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub git_ssh_url: Option<String>,
    #[serde(default)]
    pub git_http_url: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub visibility_level: Option<u32>,
    #[serde(default)]
    pub path_with_namespace: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// A decoded webhook of a supported kind
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    TagPush(Box<TagEventBody>),
    Pipeline(Box<PipelineEventBody>),
}

impl WebhookEvent {
    /// Decode any supported webhook body
    pub fn from_json(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode from an already parsed document
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let kind = value
            .get("object_kind")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::decode("webhook body has no object_kind"))?
            .to_string();

        match kind.as_str() {
            "tag_push" => serde_json::from_value(value)
                .map(|body| WebhookEvent::TagPush(Box::new(body)))
                .map_err(|e| Error::decode(format!("tag event: {e}"))),
            "pipeline" => serde_json::from_value(value)
                .map(|body| WebhookEvent::Pipeline(Box::new(body)))
                .map_err(|e| Error::decode(format!("pipeline event: {e}"))),
            other => Err(Error::decode(format!("unsupported webhook kind '{other}'"))),
        }
    }

    /// The `object_kind` this event was sent with
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookEvent::TagPush(_) => "tag_push",
            WebhookEvent::Pipeline(_) => "pipeline",
        }
    }
}
