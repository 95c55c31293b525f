//! Filter enums shared by the query objects
//!
//! Every enum renders lower-cased on the wire. Parsing from text or
//! integers fails with `Error::InvalidArgument` instead of producing a
//! malformed request.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Visibility
// ============================================================================

/// Project visibility level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Internal,
    Public,
}

impl Visibility {
    /// Wire form
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Internal => "internal",
            Visibility::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Visibility::Private),
            "internal" => Ok(Visibility::Internal),
            "public" => Ok(Visibility::Public),
            other => Err(Error::invalid_argument(
                "visibility",
                format!("unknown value '{other}'"),
            )),
        }
    }
}

// ============================================================================
// Access Level
// ============================================================================

/// Member access level; serialized as its integer value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessLevel {
    NoAccess,
    MinimalAccess,
    Guest,
    Planner,
    Reporter,
    Developer,
    Maintainer,
    Owner,
}

impl AccessLevel {
    /// Integer value used by the API
    pub fn value(self) -> u32 {
        match self {
            AccessLevel::NoAccess => 0,
            AccessLevel::MinimalAccess => 5,
            AccessLevel::Guest => 10,
            AccessLevel::Planner => 15,
            AccessLevel::Reporter => 20,
            AccessLevel::Developer => 30,
            AccessLevel::Maintainer => 40,
            AccessLevel::Owner => 50,
        }
    }

    /// Lower-case name
    pub fn name(self) -> &'static str {
        match self {
            AccessLevel::NoAccess => "no_access",
            AccessLevel::MinimalAccess => "minimal_access",
            AccessLevel::Guest => "guest",
            AccessLevel::Planner => "planner",
            AccessLevel::Reporter => "reporter",
            AccessLevel::Developer => "developer",
            AccessLevel::Maintainer => "maintainer",
            AccessLevel::Owner => "owner",
        }
    }

    const ALL: [AccessLevel; 8] = [
        AccessLevel::NoAccess,
        AccessLevel::MinimalAccess,
        AccessLevel::Guest,
        AccessLevel::Planner,
        AccessLevel::Reporter,
        AccessLevel::Developer,
        AccessLevel::Maintainer,
        AccessLevel::Owner,
    ];
}

impl TryFrom<u32> for AccessLevel {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        AccessLevel::ALL
            .into_iter()
            .find(|level| level.value() == value)
            .ok_or_else(|| {
                Error::invalid_argument("access_level", format!("unknown value {value}"))
            })
    }
}

impl FromStr for AccessLevel {
    type Err = Error;

    /// Accepts either the integer value (`30`) or the name (`developer`)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(value) = s.parse::<u32>() {
            return AccessLevel::try_from(value);
        }
        let lower = s.to_ascii_lowercase();
        AccessLevel::ALL
            .into_iter()
            .find(|level| level.name() == lower)
            .ok_or_else(|| Error::invalid_argument("access_level", format!("unknown value '{s}'")))
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for AccessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.value())
    }
}

impl<'de> Deserialize<'de> for AccessLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = u32::deserialize(deserializer)?;
        AccessLevel::try_from(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Scope Selector
// ============================================================================

/// Which projects a list request covers
///
/// Exactly one scope applies to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectQueryScope {
    /// Projects the user is a member of (`membership=true`)
    Accessible,
    /// Projects owned by the user (`owned=true`)
    Owned,
    /// Every project visible to the user
    #[default]
    All,
}

impl ProjectQueryScope {
    /// The query parameter this scope adds, if any
    pub fn parameter(self) -> Option<(&'static str, bool)> {
        match self {
            ProjectQueryScope::Accessible => Some(("membership", true)),
            ProjectQueryScope::Owned => Some(("owned", true)),
            ProjectQueryScope::All => None,
        }
    }
}

impl FromStr for ProjectQueryScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accessible" | "membership" => Ok(ProjectQueryScope::Accessible),
            "owned" => Ok(ProjectQueryScope::Owned),
            "all" | "visible" => Ok(ProjectQueryScope::All),
            other => Err(Error::invalid_argument(
                "scope",
                format!("unknown value '{other}'"),
            )),
        }
    }
}

// ============================================================================
// Template Type
// ============================================================================

/// Kinds of templates a project exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectTemplateType {
    Dockerfiles,
    Gitignores,
    GitlabCiYmls,
    Licenses,
    Issues,
    MergeRequests,
}

impl ProjectTemplateType {
    /// Wire form used in the URL path
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectTemplateType::Dockerfiles => "dockerfiles",
            ProjectTemplateType::Gitignores => "gitignores",
            ProjectTemplateType::GitlabCiYmls => "gitlab_ci_ymls",
            ProjectTemplateType::Licenses => "licenses",
            ProjectTemplateType::Issues => "issues",
            ProjectTemplateType::MergeRequests => "merge_requests",
        }
    }
}

impl fmt::Display for ProjectTemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectTemplateType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dockerfiles" => Ok(ProjectTemplateType::Dockerfiles),
            "gitignores" => Ok(ProjectTemplateType::Gitignores),
            "gitlab_ci_ymls" => Ok(ProjectTemplateType::GitlabCiYmls),
            "licenses" => Ok(ProjectTemplateType::Licenses),
            "issues" => Ok(ProjectTemplateType::Issues),
            "merge_requests" => Ok(ProjectTemplateType::MergeRequests),
            other => Err(Error::invalid_argument(
                "template_type",
                format!("unknown value '{other}'"),
            )),
        }
    }
}
