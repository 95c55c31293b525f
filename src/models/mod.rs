//! Resource models
//!
//! Response types decode leniently: fields GitLab omits for a given
//! endpoint or `simple=true` view are `Option` or defaulted. Request
//! payloads skip unset fields so only what the caller chose is sent.

mod commit;
mod project;
mod snippet;
mod user;
pub mod webhooks;

pub use commit::{Commit, CommitStats};
pub use project::{
    ForkProject, Namespace, Project, ProjectCreate, ProjectMergeRequestTemplate,
    ProjectStatistics, ProjectTemplate, ProjectUpdate, UploadedProjectFile,
};
pub use snippet::{Snippet, SnippetCreate, SnippetCreateFile, SnippetFile};
pub use user::{Assignee, Group, User};
pub use webhooks::{
    Author, PipelineEventBody, PipelineObjectAttributes, TagCommit, TagEventBody,
    WebhookCommit, WebhookEvent, WebhookProject,
};

#[cfg(test)]
mod tests;
