//! Common types used throughout the GitLab client
//!
//! This module contains the HTTP verb type, the polymorphic project
//! identifier and the content-hash scalar used by commit payloads.

use crate::error::{Error, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Characters left untouched when escaping a URI component (RFC 3986 unreserved)
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-escape a value for use as a path segment or query value
pub fn escape_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        };
        f.write_str(verb)
    }
}

// ============================================================================
// Project Identifier
// ============================================================================

/// Addresses a project either by numeric id or by its namespaced path
/// (e.g. `group/subgroup/project`).
///
/// On the wire an all-digit path looks exactly like an id, so
/// `Path("123")` decodes back as `Id(123)` through
/// [`ProjectId::from_uri_parameter`] and is parsed as an id by `FromStr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectId {
    /// Numeric project id
    Id(u64),
    /// Full namespaced path
    Path(String),
}

impl ProjectId {
    /// Encode as a single URL path segment.
    ///
    /// Paths are fully escaped so `/` becomes `%2F`, which is how the API
    /// expects namespaced paths in place of an id.
    pub fn as_uri_parameter(&self) -> String {
        match self {
            ProjectId::Id(id) => id.to_string(),
            ProjectId::Path(path) => escape_uri_component(path),
        }
    }

    /// Decode a URL path segment produced by [`ProjectId::as_uri_parameter`].
    ///
    /// An all-digit segment is read back as a numeric id.
    pub fn from_uri_parameter(segment: &str) -> Result<Self> {
        if segment.is_empty() {
            return Err(Error::invalid_argument(
                "project_id",
                "empty project identifier",
            ));
        }

        if segment.bytes().all(|b| b.is_ascii_digit()) {
            return segment
                .parse::<u64>()
                .map(ProjectId::Id)
                .map_err(|e| Error::invalid_argument("project_id", e.to_string()));
        }

        let decoded = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|e| Error::invalid_argument("project_id", e.to_string()))?;
        Ok(ProjectId::Path(decoded.into_owned()))
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        ProjectId::Id(id)
    }
}

impl From<&str> for ProjectId {
    fn from(path: &str) -> Self {
        ProjectId::Path(path.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(path: String) -> Self {
        ProjectId::Path(path)
    }
}

impl FromStr for ProjectId {
    type Err = Error;

    /// Parse user input: digits are an id, anything else a path.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::invalid_argument(
                "project_id",
                "empty project identifier",
            ));
        }
        match s.parse::<u64>() {
            Ok(id) => Ok(ProjectId::Id(id)),
            Err(_) => Ok(ProjectId::Path(s.to_string())),
        }
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Id(id) => write!(f, "{id}"),
            ProjectId::Path(path) => f.write_str(path),
        }
    }
}

// ============================================================================
// Content Hash
// ============================================================================

/// A git object id (SHA-1), carried on the wire as 40 hex characters
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sha1([u8; 20]);

impl Sha1 {
    /// Wrap raw hash bytes
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw hash bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// First `len` hex characters, as shown by `git log --oneline`
    pub fn short(&self, len: usize) -> String {
        let mut hex = self.to_string();
        hex.truncate(len.min(40));
        hex
    }

    /// The all-zero id GitLab sends for a created or deleted ref
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl FromStr for Sha1 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::invalid_sha1(s, e.to_string()))?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| Error::invalid_sha1(s, format!("expected 20 bytes, got {}", v.len())))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Sha1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Sha1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha1({self})")
    }
}

impl Serialize for Sha1 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Sha1 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const SHA: &str = "6104942438c14ec7bd21c6cd5bd995272b3faff6";

    #[test]
    fn test_method_conversion() {
        let get: reqwest::Method = Method::GET.into();
        assert_eq!(reqwest::Method::GET, get);
        let delete: reqwest::Method = Method::DELETE.into();
        assert_eq!(reqwest::Method::DELETE, delete);
        assert_eq!(Method::PUT.to_string(), "PUT");
    }

    #[test]
    fn test_project_id_numeric_parameter() {
        assert_eq!(ProjectId::Id(42).as_uri_parameter(), "42");
    }

    #[test]
    fn test_project_id_path_is_escaped() {
        let id = ProjectId::from("diaspora/diaspora-project site");
        assert_eq!(id.as_uri_parameter(), "diaspora%2Fdiaspora-project%20site");
    }

    #[test_case(ProjectId::Id(0); "zero id")]
    #[test_case(ProjectId::Id(u64::MAX); "max id")]
    #[test_case(ProjectId::from("group/project"); "simple path")]
    #[test_case(ProjectId::from("group/sub.group/my_project-1"); "unreserved chars")]
    #[test_case(ProjectId::from("ünïcode/prøject"); "unicode path")]
    #[test_case(ProjectId::from("a%2Fb/c d"); "literal percent")]
    fn test_project_id_round_trip(id: ProjectId) {
        let segment = id.as_uri_parameter();
        assert!(!segment.contains('/'));
        assert_eq!(ProjectId::from_uri_parameter(&segment).unwrap(), id);
    }

    #[test]
    fn test_project_id_numeric_path_reads_back_as_id() {
        let segment = ProjectId::from("123").as_uri_parameter();
        assert_eq!(ProjectId::from_uri_parameter(&segment).unwrap(), ProjectId::Id(123));
    }

    #[test]
    fn test_project_id_from_empty_segment() {
        assert!(ProjectId::from_uri_parameter("")
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_project_id_from_str() {
        assert_eq!("17".parse::<ProjectId>().unwrap(), ProjectId::Id(17));
        assert_eq!(
            "group/project".parse::<ProjectId>().unwrap(),
            ProjectId::Path("group/project".to_string())
        );
        assert!("  ".parse::<ProjectId>().is_err());
    }

    #[test]
    fn test_sha1_parse_and_display() {
        let sha: Sha1 = SHA.parse().unwrap();
        assert_eq!(sha.to_string(), SHA);
        assert_eq!(sha.short(8), "61049424");
    }

    #[test]
    fn test_sha1_uppercase_input_is_normalized() {
        let sha: Sha1 = SHA.to_uppercase().parse().unwrap();
        assert_eq!(sha.to_string(), SHA);
    }

    #[test_case("xyz"; "not hex")]
    #[test_case("6104942438c1"; "too short")]
    #[test_case("6104942438c14ec7bd21c6cd5bd995272b3faff600"; "too long")]
    fn test_sha1_invalid(input: &str) {
        let err = input.parse::<Sha1>().unwrap_err();
        assert!(matches!(err, Error::InvalidSha1 { .. }));
    }

    #[test]
    fn test_sha1_serde() {
        let sha: Sha1 = serde_json::from_str(&format!("\"{SHA}\"")).unwrap();
        assert_eq!(serde_json::to_string(&sha).unwrap(), format!("\"{SHA}\""));
        assert!(serde_json::from_str::<Sha1>("\"nope\"").is_err());
    }

    #[test]
    fn test_sha1_zero_and_short() {
        let zero: Sha1 = "0".repeat(40).parse().unwrap();
        assert!(zero.is_zero());
        let sha: Sha1 = SHA.parse().unwrap();
        assert!(!sha.is_zero());
        assert_eq!(sha.short(8), SHA[..8]);
    }
}
