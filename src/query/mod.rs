//! Query building module
//!
//! Translates structured filter objects into request URLs.
//!
//! # Rules
//!
//! - Parameters are appended in a fixed order
//! - Absent values are omitted
//! - Booleans render as `true`/`false`, enums lower-cased
//! - Lists render comma-joined with blank entries removed
//! - Invalid values fail with `Error::InvalidArgument` before any request

mod builder;
mod project;
mod types;

pub use builder::UrlBuilder;
pub use project::{
    ForkedProjectQuery, ProjectGroupsQuery, ProjectQuery, SingleProjectQuery, MAX_PER_PAGE,
    PROJECTS_URL,
};
pub use types::{AccessLevel, ProjectQueryScope, ProjectTemplateType, Visibility};
