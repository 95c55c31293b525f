//! Project query objects
//!
//! Each query turns into a URL with [`UrlBuilder`]. Parameter order is
//! fixed so the output is deterministic.

use super::builder::UrlBuilder;
use super::types::{AccessLevel, ProjectQueryScope, Visibility};
use crate::error::{Error, Result};
use crate::pagination::PaginationMode;
use crate::types::ProjectId;
use chrono::{DateTime, Utc};

/// Collection path for projects
pub const PROJECTS_URL: &str = "/projects";

/// Largest page size the API accepts
pub const MAX_PER_PAGE: u32 = 100;

fn validate_per_page(per_page: Option<u32>) -> Result<()> {
    match per_page {
        Some(n) if n == 0 || n > MAX_PER_PAGE => Err(Error::invalid_argument(
            "per_page",
            format!("must be between 1 and {MAX_PER_PAGE}, got {n}"),
        )),
        _ => Ok(()),
    }
}

fn validate_order_by(order_by: Option<&str>) -> Result<()> {
    match order_by {
        Some(o) if o.trim().is_empty() => {
            Err(Error::invalid_argument("order_by", "must not be blank"))
        }
        _ => Ok(()),
    }
}

// ============================================================================
// Project List Query
// ============================================================================

/// Filters for listing projects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectQuery {
    /// Membership / ownership / all
    pub scope: ProjectQueryScope,
    /// List the projects of this user instead of the global collection
    pub user_id: Option<u64>,
    /// Free-text search; forces offset pagination
    pub search: Option<String>,
    pub visibility: Option<Visibility>,
    pub min_access_level: Option<AccessLevel>,
    pub archived: Option<bool>,
    /// Return only limited fields
    pub simple: Option<bool>,
    /// Include project statistics
    pub statistics: Option<bool>,
    /// Sort ascending (descending is the server default)
    pub ascending: Option<bool>,
    pub order_by: Option<String>,
    pub last_activity_after: Option<DateTime<Utc>>,
    pub last_activity_before: Option<DateTime<Utc>>,
    pub topics: Vec<String>,
    pub per_page: Option<u32>,
}

impl ProjectQuery {
    /// Create an empty query (all visible projects)
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scope(mut self, scope: ProjectQueryScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    #[must_use]
    pub fn min_access_level(mut self, level: AccessLevel) -> Self {
        self.min_access_level = Some(level);
        self
    }

    #[must_use]
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    #[must_use]
    pub fn simple(mut self, simple: bool) -> Self {
        self.simple = Some(simple);
        self
    }

    #[must_use]
    pub fn statistics(mut self, statistics: bool) -> Self {
        self.statistics = Some(statistics);
        self
    }

    #[must_use]
    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = Some(ascending);
        self
    }

    #[must_use]
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    #[must_use]
    pub fn last_activity_after(mut self, date: DateTime<Utc>) -> Self {
        self.last_activity_after = Some(date);
        self
    }

    #[must_use]
    pub fn last_activity_before(mut self, date: DateTime<Utc>) -> Self {
        self.last_activity_before = Some(date);
        self
    }

    #[must_use]
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topics.push(topic.into());
        self
    }

    #[must_use]
    pub fn topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics.extend(topics.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Pagination mode this query will be enumerated with
    pub fn pagination_mode(&self) -> PaginationMode {
        PaginationMode::select(self.search.as_deref())
    }

    /// Check the query without building it
    pub fn validate(&self) -> Result<()> {
        validate_per_page(self.per_page)?;
        validate_order_by(self.order_by.as_deref())?;

        if let (Some(after), Some(before)) = (self.last_activity_after, self.last_activity_before)
        {
            if after > before {
                return Err(Error::invalid_argument(
                    "last_activity_after",
                    format!("{after} is later than last_activity_before {before}"),
                ));
            }
        }

        Ok(())
    }

    /// Build the request URL
    pub fn to_url(&self) -> Result<String> {
        self.validate()?;

        let base = match self.user_id {
            Some(user_id) => format!("/users/{user_id}/projects"),
            None => PROJECTS_URL.to_string(),
        };

        let mut url = UrlBuilder::new(base)
            .date_param("last_activity_after", self.last_activity_after)
            .date_param("last_activity_before", self.last_activity_before);

        if let Some((key, value)) = self.scope.parameter() {
            url = url.param(key, value);
        }

        url = url.bool_param("archived", self.archived);
        url = self
            .pagination_mode()
            .apply(url, self.order_by.as_deref());

        let url = url
            .text_param("search", self.search.as_deref())
            .bool_param("simple", self.simple)
            .bool_param("statistics", self.statistics)
            .opt_param("per_page", self.per_page);

        let url = if self.ascending == Some(true) {
            url.param("sort", "asc")
        } else {
            url
        };

        Ok(url
            .opt_param("visibility", self.visibility)
            .opt_param("min_access_level", self.min_access_level)
            .list_param("topic", &self.topics)
            .build())
    }
}

// ============================================================================
// Single Project Query
// ============================================================================

/// Options for fetching one project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleProjectQuery {
    /// Include project statistics
    pub statistics: Option<bool>,
    /// Include project license data
    pub license: Option<bool>,
}

impl SingleProjectQuery {
    /// Request statistics
    pub fn with_statistics() -> Self {
        Self {
            statistics: Some(true),
            ..Default::default()
        }
    }

    /// Build the request URL for a project
    pub fn to_url(query: Option<&Self>, id: &ProjectId) -> String {
        let url = UrlBuilder::new(format!("{PROJECTS_URL}/{}", id.as_uri_parameter()));
        match query {
            Some(q) => url
                .bool_param("statistics", q.statistics)
                .bool_param("license", q.license)
                .build(),
            None => url.build(),
        }
    }
}

// ============================================================================
// Forks Query
// ============================================================================

/// Filters for listing the forks of a project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForkedProjectQuery {
    pub owned: Option<bool>,
    pub archived: Option<bool>,
    pub membership: Option<bool>,
    pub order_by: Option<String>,
    pub search: Option<String>,
    pub simple: Option<bool>,
    pub statistics: Option<bool>,
    pub per_page: Option<u32>,
    pub visibility: Option<Visibility>,
    pub min_access_level: Option<AccessLevel>,
}

impl ForkedProjectQuery {
    /// Pagination mode this query will be enumerated with
    ///
    /// Without a query no pagination parameters are sent, so GitLab pages
    /// the forks by offset.
    pub fn pagination_mode(query: Option<&Self>) -> PaginationMode {
        match query {
            Some(q) => PaginationMode::select(q.search.as_deref()),
            None => PaginationMode::Offset,
        }
    }

    /// Build the request URL for the forks of a project
    pub fn to_url(query: Option<&Self>, id: &ProjectId) -> Result<String> {
        let url = UrlBuilder::new(format!("{PROJECTS_URL}/{}/forks", id.as_uri_parameter()));

        let Some(q) = query else {
            return Ok(url.build());
        };

        validate_per_page(q.per_page)?;
        validate_order_by(q.order_by.as_deref())?;

        let url = url
            .bool_param("owned", q.owned)
            .bool_param("archived", q.archived)
            .bool_param("membership", q.membership);

        Ok(Self::pagination_mode(query)
            .apply(url, q.order_by.as_deref())
            .text_param("search", q.search.as_deref())
            .bool_param("simple", q.simple)
            .bool_param("statistics", q.statistics)
            .opt_param("per_page", q.per_page)
            .opt_param("visibility", q.visibility)
            .opt_param("min_access_level", q.min_access_level)
            .build())
    }
}

// ============================================================================
// Project Groups Query
// ============================================================================

/// Filters for listing the ancestor and shared groups of a project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectGroupsQuery {
    pub shared_min_access_level: Option<AccessLevel>,
    pub skip_groups: Vec<u64>,
    pub shared_visible_only: Option<bool>,
    pub search: Option<String>,
    pub with_shared: Option<bool>,
}

impl ProjectGroupsQuery {
    /// Build the request URL for the groups of a project
    pub fn to_url(query: Option<&Self>, id: &ProjectId) -> String {
        let url = UrlBuilder::new(format!("{PROJECTS_URL}/{}/groups", id.as_uri_parameter()));

        match query {
            Some(q) => url
                .opt_param("shared_min_access_level", q.shared_min_access_level)
                .array_param("skip_groups", &q.skip_groups)
                .bool_param("shared_visible_only", q.shared_visible_only)
                .text_param("search", q.search.as_deref())
                .bool_param("with_shared", q.with_shared)
                .build(),
            None => url.build(),
        }
    }
}
