// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # gitlab-client
//!
//! A typed client for the GitLab REST API.
//!
//! ## Features
//!
//! - **Query objects**: project, fork and group filters rendered into
//!   deterministic URLs, validated before anything is sent
//! - **Pagination**: keyset when possible, offset when searching, never both
//! - **Collections**: drain eagerly or stream lazily with page-boundary
//!   cancellation
//! - **Polling**: language statistics retried until GitLab has them
//! - **Webhooks**: tag push and pipeline event bodies
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use gitlab_client::{ClientConfig, GitLabClient, ProjectQuery, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = GitLabClient::new(ClientConfig::from_env()?)?;
//!
//!     // Lazily walk every project matching "api"
//!     let query = ProjectQuery::new().search("api");
//!     let mut projects = client.projects().list(&query)?.stream();
//!     while let Some(project) = projects.try_next().await? {
//!         println!("{}", project.path_with_namespace);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │              GitLabClient → ProjectClient                 │
//! └───────────────────────────────────────────────────────────┘
//!                │                             │
//! ┌──────────────┴──────────┐    ┌─────────────┴─────────────┐
//! │  query  →  pagination   │    │   polling    models       │
//! │  (URL)     (mode)       │    │                           │
//! └──────────────┬──────────┘    └───────────────────────────┘
//!                │
//! ┌──────────────┴──────────────────────────────────────────┐
//! │ collection (eager / lazy / cancel) → Transport (reqwest) │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Shared scalar types: project ids, hashes, HTTP verbs
pub mod types;

/// HTTP transport
pub mod http;

/// URL query builders
pub mod query;

/// Keyset and offset pagination
pub mod pagination;

/// Paginated collections
pub mod collection;

/// Fixed-interval polling
pub mod polling;

/// Resource models and webhook bodies
pub mod models;

/// Client configuration
pub mod config;

/// API clients
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{GitLabClient, ProjectClient};
pub use collection::{CancelToken, CollectionResponse};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use query::{ForkedProjectQuery, ProjectGroupsQuery, ProjectQuery, SingleProjectQuery};
pub use types::{ProjectId, Sha1};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
