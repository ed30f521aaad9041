//! HTTP transport capability.
//!
//! The fetch client is generic over [`HttpTransport`] so tests can
//! substitute a scripted transport; production code uses reqwest.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{FetchError, FetchResult};

/// HTTP method subset used by the Roblox APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A single outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

/// A raw response: status code plus body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Capability to perform an HTTP request and return status + raw body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> FetchResult<HttpResponse>;
}

/// reqwest-backed production transport.
///
/// Reuses one connection pool for the process; clone freely, clones share
/// the pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> FetchResult<HttpResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self
            .client
            .request(method, &request.url)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| FetchError::Transport {
            message: err.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|err| FetchError::Transport {
            message: err.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}
