//! Project snippets

use super::user::User;
use crate::error::{Error, Result};
use crate::query::Visibility;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /projects/:id/snippets`
///
/// Either `files` or the single-file `file_name` + `content` pair must be
/// set; the single-file form predates multi-file snippets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub files: Vec<SnippetCreateFile>,
}

impl SnippetCreate {
    /// Snippet with a title and no files yet
    pub fn new(title: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            title: title.into(),
            visibility,
            ..Default::default()
        }
    }

    /// Add a file
    #[must_use]
    pub fn file(mut self, file_path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push(SnippetCreateFile {
            file_path: file_path.into(),
            content: content.into(),
        });
        self
    }

    /// Check required fields before sending
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::invalid_argument("title", "must not be blank"));
        }

        let single_file = self.file_name.is_some() && self.content.is_some();
        if self.files.is_empty() && !single_file {
            return Err(Error::invalid_argument(
                "files",
                "either files or file_name and content are required",
            ));
        }

        if let Some(file) = self.files.iter().find(|f| f.file_path.trim().is_empty()) {
            return Err(Error::invalid_argument(
                "files",
                format!("file path must not be blank ({} bytes of content)", file.content.len()),
            ));
        }

        Ok(())
    }
}

/// One file of a snippet being created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetCreateFile {
    pub file_path: String,
    pub content: String,
}

/// A snippet as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visibility: Option<Visibility>,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub project_id: Option<u64>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub raw_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub files: Vec<SnippetFile>,
}

/// A file of an existing snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetFile {
    pub path: String,
    #[serde(default)]
    pub raw_url: Option<String>,
}
