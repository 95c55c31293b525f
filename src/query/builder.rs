//! URL builder
//!
//! Appends query parameters in call order so the produced URL is
//! deterministic. Absent values are skipped; present values are
//! percent-escaped.

use crate::types::escape_uri_component;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Display;

/// Incrementally builds `/<collection>[/<id>][/<subresource>]?<key=value>&...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    url: String,
    has_query: bool,
}

impl UrlBuilder {
    /// Start from a path (which may already carry a query string)
    pub fn new(path: impl Into<String>) -> Self {
        let url = path.into();
        let has_query = url.contains('?');
        Self { url, has_query }
    }

    /// Append `key=value`
    #[must_use]
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        self.url.push(if self.has_query { '&' } else { '?' });
        self.has_query = true;
        self.url.push_str(key);
        self.url.push('=');
        self.url.push_str(&escape_uri_component(&value.to_string()));
        self
    }

    /// Append `key=value` when a value is present
    #[must_use]
    pub fn opt_param(self, key: &str, value: Option<impl Display>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Append a string parameter unless it is absent or blank
    #[must_use]
    pub fn text_param(self, key: &str, value: Option<&str>) -> Self {
        self.opt_param(key, value.filter(|v| !v.trim().is_empty()))
    }

    /// Append `key=true` / `key=false` when a value is present
    #[must_use]
    pub fn bool_param(self, key: &str, value: Option<bool>) -> Self {
        self.opt_param(key, value)
    }

    /// Append a comma-joined list, dropping blank entries.
    ///
    /// Nothing is written when no entry survives.
    #[must_use]
    pub fn list_param<S: AsRef<str>>(self, key: &str, values: &[S]) -> Self {
        let joined = values
            .iter()
            .map(AsRef::as_ref)
            .filter(|v| !v.trim().is_empty())
            .collect::<Vec<_>>()
            .join(",");

        if joined.is_empty() {
            self
        } else {
            self.param(key, joined)
        }
    }

    /// Append one `key[]=value` pair per element
    #[must_use]
    pub fn array_param(self, key: &str, values: &[impl Display]) -> Self {
        let key = format!("{key}[]");
        values.iter().fold(self, |url, v| url.param(&key, v))
    }

    /// Append a UTC timestamp in RFC 3339 form, keeping any fractional seconds
    #[must_use]
    pub fn date_param(self, key: &str, value: Option<DateTime<Utc>>) -> Self {
        self.opt_param(
            key,
            value.map(|d| d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        )
    }

    /// Borrow the URL built so far
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Finish building
    pub fn build(self) -> String {
        self.url
    }
}

impl Display for UrlBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}
