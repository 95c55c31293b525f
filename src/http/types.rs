//! Transport abstraction
//!
//! Resource clients only assemble an [`ApiRequest`] and hand it to a
//! [`Transport`]; they never talk to sockets directly.

use crate::error::{Error, Result};
use crate::types::Method;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A request ready to be executed by a transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Path relative to the API root (`/projects?...`) or an absolute URL
    pub url: String,
    /// JSON body, if any
    pub body: Option<Value>,
    /// File sent as `multipart/form-data` instead of a JSON body
    pub file: Option<FilePart>,
}

/// A single file field of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name
    pub field: String,
    /// File name reported to the server
    pub file_name: String,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl ApiRequest {
    /// Create a request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            file: None,
        }
    }

    /// GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// PUT request
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    /// DELETE request
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a file as a multipart form field
    #[must_use]
    pub fn file(
        mut self,
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.file = Some(FilePart {
            field: field.into(),
            file_name: file_name.into(),
            bytes: bytes.into(),
        });
        self
    }
}

/// A successful response
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            Error::decode(format!(
                "{e} (body starts with: {:?})",
                self.body.chars().take(120).collect::<String>()
            ))
        })
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Executes API requests
///
/// Implementations must return `Err(Error::HttpStatus { .. })` for
/// non-success responses so callers see the status unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the raw response
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}
