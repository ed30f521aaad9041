//! Typed fetch client.
//!
//! Issues HTTP requests through an [`HttpTransport`] and deserializes
//! responses into typed result envelopes, distinguishing transport failure
//! from application-level failure. Retryable failures (transport, 429/5xx)
//! are retried per the injected [`RetryPolicy`]; everything else propagates
//! immediately.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::retry::RetryPolicy;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method};

/// Options for a single fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            body: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl FetchOptions {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A decoded response along with the raw status code.
#[derive(Debug, Clone)]
pub struct Typed<V> {
    pub value: V,
    pub status: u16,
}

/// Typed fetch client with retry/backoff.
pub struct FetchClient<T> {
    transport: Arc<T>,
    policy: RetryPolicy,
}

impl<T> FetchClient<T>
where
    T: HttpTransport,
{
    pub fn new(transport: Arc<T>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET a URL and decode the JSON body as `V`.
    pub async fn get_typed<V: DeserializeOwned>(&self, url: &str) -> FetchResult<Typed<V>> {
        self.fetch_typed(Method::Get, url, FetchOptions::default())
            .await
    }

    /// Fetch a URL and decode the JSON body as `V`.
    ///
    /// Retries transport failures and 429/5xx statuses with exponential
    /// backoff; 404 maps to [`FetchError::NotFound`]; a body that does not
    /// match `V` surfaces as [`FetchError::Decode`] without retry.
    pub async fn fetch_typed<V: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        options: FetchOptions,
    ) -> FetchResult<Typed<V>> {
        let response = self.execute_with_retries(method, url, &options).await?;
        let value = serde_json::from_slice(&response.body).map_err(|err| FetchError::Decode {
            message: format!("{url}: {err}"),
        })?;
        Ok(Typed {
            value,
            status: response.status,
        })
    }

    /// Fetch a URL and return the body as text, for endpoints that do not
    /// speak JSON.
    pub async fn fetch_text(
        &self,
        method: Method,
        url: &str,
        options: FetchOptions,
    ) -> FetchResult<Typed<String>> {
        let response = self.execute_with_retries(method, url, &options).await?;
        Ok(Typed {
            value: String::from_utf8_lossy(&response.body).into_owned(),
            status: response.status,
        })
    }

    async fn execute_with_retries(
        &self,
        method: Method,
        url: &str,
        options: &FetchOptions,
    ) -> FetchResult<HttpResponse> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.execute_once(method, url, options).await {
                Ok(response) => {
                    debug!(%url, status = response.status, "fetch ok");
                    return Ok(response);
                }
                Err(err) if self.policy.should_retry(&err, attempt) => {
                    let delay = self.policy.backoff(attempt);
                    warn!(%url, attempt, ?delay, error = %err, "fetch failed, retrying");
                    metrics::counter!("rsblox_fetch_retries_total").increment(1);
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn execute_once(
        &self,
        method: Method,
        url: &str,
        options: &FetchOptions,
    ) -> FetchResult<HttpResponse> {
        let response = self
            .transport
            .execute(HttpRequest {
                method,
                url: url.to_string(),
                headers: options.headers.clone(),
                body: options.body.clone(),
                timeout: options.timeout,
            })
            .await?;

        match response.status {
            404 => Err(FetchError::NotFound),
            status if !(200..300).contains(&status) => Err(FetchError::Http { status }),
            _ => Ok(response),
        }
    }
}

/// Registers fetch metrics descriptions.
pub fn register_fetch_metrics() {
    metrics::describe_counter!(
        "rsblox_fetch_retries_total",
        "Total number of fetch retry attempts"
    );
}
