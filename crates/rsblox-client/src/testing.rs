//! Test doubles for the fetch layer.

use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{FetchError, FetchResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Transport that replays a queue of scripted responses in order.
///
/// Suited to sequential retry tests against a single URL.
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<FetchResult<HttpResponse>>>,
    pub calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: Bytes::from(body.to_string()),
        }));
    }

    pub fn push_text(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: Bytes::from(body.to_string()),
        }));
    }

    pub fn push_error(&self, error: FetchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> FetchResult<HttpResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for {}", request.url))
    }
}

/// Transport that routes by URL substring, replaying the same response for
/// every match. Routes are checked in insertion order, so register more
/// specific patterns first.
///
/// Suited to resolver tests where several endpoints are fetched
/// concurrently.
pub(crate) struct RouteTransport {
    routes: Mutex<Vec<(String, FetchResult<HttpResponse>)>>,
    pub requested_urls: Mutex<Vec<String>>,
}

impl RouteTransport {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            requested_urls: Mutex::new(Vec::new()),
        }
    }

    pub fn route_json(&self, url_contains: &str, status: u16, body: serde_json::Value) {
        self.set_route(
            url_contains,
            Ok(HttpResponse {
                status,
                body: Bytes::from(body.to_string()),
            }),
        );
    }

    pub fn route_text(&self, url_contains: &str, status: u16, body: &str) {
        self.set_route(
            url_contains,
            Ok(HttpResponse {
                status,
                body: Bytes::from(body.to_string()),
            }),
        );
    }

    pub fn route_error(&self, url_contains: &str, error: FetchError) {
        self.set_route(url_contains, Err(error));
    }

    /// Replaces an existing route with the same pattern, or appends.
    fn set_route(&self, url_contains: &str, response: FetchResult<HttpResponse>) {
        let mut routes = self.routes.lock().unwrap();
        match routes.iter_mut().find(|(pattern, _)| pattern == url_contains) {
            Some((_, existing)) => *existing = response,
            None => routes.push((url_contains.to_string(), response)),
        }
    }

    /// Number of requests whose URL contained the given pattern.
    pub fn calls_matching(&self, url_contains: &str) -> usize {
        self.requested_urls
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.contains(url_contains))
            .count()
    }
}

#[async_trait]
impl HttpTransport for RouteTransport {
    async fn execute(&self, request: HttpRequest) -> FetchResult<HttpResponse> {
        self.requested_urls
            .lock()
            .unwrap()
            .push(request.url.clone());
        let routes = self.routes.lock().unwrap();
        routes
            .iter()
            .find(|(pattern, _)| request.url.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| panic!("no route for {}", request.url))
    }
}
