//! GitLab API client
//!
//! [`GitLabClient`] owns the transport and the settings shared by every
//! resource client. Resource clients are cheap handles obtained from it:
//!
//! ```ignore
//! let client = GitLabClient::new(ClientConfig::from_env()?)?;
//! let mut projects = client.projects().accessible().stream();
//! while let Some(project) = projects.try_next().await? {
//!     println!("{}", project.path_with_namespace);
//! }
//! ```

mod gitlab;
mod projects;

pub use gitlab::GitLabClient;
pub use projects::ProjectClient;
