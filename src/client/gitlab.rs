//! Root client

use super::projects::ProjectClient;
use crate::collection::CollectionResponse;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{ApiRequest, HttpClient, Transport};
use crate::pagination::PaginationMode;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Entry point to the GitLab API
#[derive(Clone)]
pub struct GitLabClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl GitLabClient {
    /// Create a client talking HTTP to `config.base_url`
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpClient::with_config(config.to_http_config())?;
        debug!("Created GitLab client for {}", config.base_url);
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Settings this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shared transport
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Project operations
    pub fn projects(&self) -> ProjectClient {
        ProjectClient::new(
            self.transport(),
            self.config.default_per_page,
            self.config.languages,
        )
    }

    /// Enumerate any list endpoint
    pub fn collection<T>(&self, url: impl Into<String>, mode: PaginationMode) -> CollectionResponse<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        CollectionResponse::new(self.transport(), url, mode)
    }

    /// GET a single resource
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.transport.execute(ApiRequest::get(url)).await?.json()
    }
}

impl fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitLabClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
