//! Project operations
//!
//! List operations return a [`CollectionResponse`] that has not been sent
//! yet; single-resource operations send their request immediately.
//! Query validation happens before anything goes over the wire.

use crate::collection::CollectionResponse;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, Transport};
use crate::models::{
    ForkProject, Group, Project, ProjectCreate, ProjectMergeRequestTemplate, ProjectTemplate,
    ProjectUpdate, Snippet, SnippetCreate, UploadedProjectFile,
};
use crate::pagination::PaginationMode;
use crate::polling::{poll_until, PollConfig};
use crate::query::{
    ForkedProjectQuery, ProjectGroupsQuery, ProjectQuery, ProjectQueryScope, ProjectTemplateType,
    SingleProjectQuery, PROJECTS_URL,
};
use crate::types::{escape_uri_component, ProjectId};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Operations on `/projects`
#[derive(Clone)]
pub struct ProjectClient {
    transport: Arc<dyn Transport>,
    default_per_page: Option<u32>,
    languages_poll: PollConfig,
}

impl ProjectClient {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        default_per_page: Option<u32>,
        languages_poll: PollConfig,
    ) -> Self {
        Self {
            transport,
            default_per_page,
            languages_poll,
        }
    }

    // ------------------------------------------------------------------
    // Listing
    // ------------------------------------------------------------------

    /// Projects the current user is a member of
    pub fn accessible(&self) -> Result<CollectionResponse<Project>> {
        self.list(&ProjectQuery::new().scope(ProjectQueryScope::Accessible))
    }

    /// Projects owned by the current user
    pub fn owned(&self) -> Result<CollectionResponse<Project>> {
        self.list(&ProjectQuery::new().scope(ProjectQueryScope::Owned))
    }

    /// Every project visible to the current user
    pub fn visible(&self) -> Result<CollectionResponse<Project>> {
        self.list(&ProjectQuery::new())
    }

    /// Projects matching `query`
    ///
    /// Fails with `Error::InvalidArgument` without sending anything when
    /// the query is invalid.
    pub fn list(&self, query: &ProjectQuery) -> Result<CollectionResponse<Project>> {
        let query = match (query.per_page, self.default_per_page) {
            (None, Some(per_page)) => query.clone().per_page(per_page),
            _ => query.clone(),
        };

        let url = query.to_url()?;
        let mode = query.pagination_mode();
        debug!("Listing projects with {mode:?} pagination: {url}");
        Ok(self.collection(url, mode))
    }

    /// Forks of a project
    pub fn forks(
        &self,
        id: impl Into<ProjectId>,
        query: Option<&ForkedProjectQuery>,
    ) -> Result<CollectionResponse<Project>> {
        let url = ForkedProjectQuery::to_url(query, &id.into())?;
        Ok(self.collection(url, ForkedProjectQuery::pagination_mode(query)))
    }

    /// Ancestor groups of a project, and optionally groups it is shared with
    pub fn groups(
        &self,
        id: impl Into<ProjectId>,
        query: Option<&ProjectGroupsQuery>,
    ) -> CollectionResponse<Group> {
        let url = ProjectGroupsQuery::to_url(query, &id.into());
        self.collection(url, PaginationMode::Offset)
    }

    /// Templates of one type available to a project
    pub fn templates(
        &self,
        id: impl Into<ProjectId>,
        template_type: ProjectTemplateType,
    ) -> CollectionResponse<ProjectTemplate> {
        let url = format!("{}/templates/{template_type}", project_url(&id.into()));
        self.collection(url, PaginationMode::Offset)
    }

    // ------------------------------------------------------------------
    // Single resources
    // ------------------------------------------------------------------

    /// Fetch one project
    pub async fn get(
        &self,
        id: impl Into<ProjectId>,
        query: Option<&SingleProjectQuery>,
    ) -> Result<Project> {
        let url = SingleProjectQuery::to_url(query, &id.into());
        self.send(ApiRequest::get(url)).await
    }

    /// Fetch one project by its full path (`group/subgroup/project`)
    pub async fn get_by_path(&self, path: &str) -> Result<Project> {
        self.get(ProjectId::Path(path.to_string()), None).await
    }

    /// A merge request description template by name
    pub async fn merge_request_template(
        &self,
        id: impl Into<ProjectId>,
        name: &str,
    ) -> Result<ProjectMergeRequestTemplate> {
        let url = format!(
            "{}/templates/{}/{}",
            project_url(&id.into()),
            ProjectTemplateType::MergeRequests,
            escape_uri_component(name)
        );
        self.send(ApiRequest::get(url)).await
    }

    /// Language breakdown of a project's repository, in percent
    ///
    /// GitLab computes this lazily and answers with an empty map until it
    /// is done, so the endpoint is polled on the configured schedule. An
    /// empty map is returned if the statistics never show up in time.
    pub async fn languages(&self, id: impl Into<ProjectId>) -> Result<HashMap<String, f64>> {
        let url = format!("{}/languages", project_url(&id.into()));
        poll_until(
            self.languages_poll,
            || self.send::<HashMap<String, f64>>(ApiRequest::get(url.as_str())),
            |languages| !languages.is_empty(),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create a project
    pub async fn create(&self, project: &ProjectCreate) -> Result<Project> {
        let created: Project = self
            .send(ApiRequest::post(PROJECTS_URL).json(project)?)
            .await?;
        info!("Created project {} ({})", created.path_with_namespace, created.id);
        Ok(created)
    }

    /// Update the fields set in `update`
    pub async fn update(&self, id: impl Into<ProjectId>, update: &ProjectUpdate) -> Result<Project> {
        let url = project_url(&id.into());
        self.send(ApiRequest::put(url).json(update)?).await
    }

    /// Delete a project
    ///
    /// GitLab may only schedule the deletion; the call returns once the
    /// request is accepted.
    pub async fn delete(&self, id: impl Into<ProjectId>) -> Result<()> {
        let id = id.into();
        self.transport
            .execute(ApiRequest::delete(project_url(&id)))
            .await?;
        info!("Deleted project {id}");
        Ok(())
    }

    /// Archive a project
    pub async fn archive(&self, id: impl Into<ProjectId>) -> Result<Project> {
        let url = format!("{}/archive", project_url(&id.into()));
        self.send(ApiRequest::post(url)).await
    }

    /// Unarchive a project
    pub async fn unarchive(&self, id: impl Into<ProjectId>) -> Result<Project> {
        let url = format!("{}/unarchive", project_url(&id.into()));
        self.send(ApiRequest::post(url)).await
    }

    /// Fork a project into another namespace
    pub async fn fork(&self, id: impl Into<ProjectId>, fork: &ForkProject) -> Result<Project> {
        let url = format!("{}/fork", project_url(&id.into()));
        let forked: Project = self.send(ApiRequest::post(url).json(fork)?).await?;
        info!("Forked into {} ({})", forked.path_with_namespace, forked.id);
        Ok(forked)
    }

    /// Create a snippet in a project
    pub async fn create_snippet(
        &self,
        id: impl Into<ProjectId>,
        snippet: &SnippetCreate,
    ) -> Result<Snippet> {
        snippet.validate()?;
        let url = format!("{}/snippets", project_url(&id.into()));
        self.send(ApiRequest::post(url).json(snippet)?).await
    }

    /// Upload a file to a project for use in issue or merge request markdown
    pub async fn upload_file(
        &self,
        id: impl Into<ProjectId>,
        file_name: &str,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<UploadedProjectFile> {
        if file_name.trim().is_empty() {
            return Err(Error::invalid_argument("file_name", "must not be blank"));
        }
        let id = id.into();
        let url = format!("{}/uploads", project_url(&id));
        let uploaded: UploadedProjectFile = self
            .send(ApiRequest::post(url).file("file", file_name, bytes))
            .await?;
        info!("Uploaded {file_name} to project {id}");
        Ok(uploaded)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn collection<T>(&self, url: String, mode: PaginationMode) -> CollectionResponse<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        CollectionResponse::new(Arc::clone(&self.transport), url, mode)
    }

    async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.transport.execute(request).await?.json()
    }
}

fn project_url(id: &ProjectId) -> String {
    format!("{PROJECTS_URL}/{}", id.as_uri_parameter())
}

impl std::fmt::Debug for ProjectClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectClient")
            .field("default_per_page", &self.default_per_page)
            .field("languages_poll", &self.languages_poll)
            .finish_non_exhaustive()
    }
}
