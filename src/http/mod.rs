//! HTTP transport module
//!
//! Defines the [`Transport`] seam the resource clients talk through and
//! the default reqwest-backed [`HttpClient`].
//!
//! There is no retry or rate limiting layer; failures reach the caller
//! unchanged.

mod client;
mod types;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use types::{ApiRequest, ApiResponse, FilePart, Transport};
