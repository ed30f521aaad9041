//! Shared helpers for service integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use rsblox::{FetchError, FetchResult, HttpRequest, HttpResponse, HttpTransport};

/// Transport that routes by URL substring, replaying the same response for
/// every match. Routes are checked in insertion order, so register more
/// specific patterns first.
pub struct RouteTransport {
    routes: Mutex<Vec<(String, FetchResult<HttpResponse>)>>,
    requested_urls: Mutex<Vec<String>>,
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

    #[allow(dead_code)]
    pub fn route_error(&self, url_contains: &str, error: FetchError) {
        self.set_route(url_contains, Err(error));
    }

    fn set_route(&self, url_contains: &str, response: FetchResult<HttpResponse>) {
        let mut routes = self.routes.lock().unwrap();
        match routes.iter_mut().find(|(pattern, _)| pattern == url_contains) {
            Some((_, existing)) => *existing = response,
            None => routes.push((url_contains.to_string(), response)),
        }
    }

    #[allow(dead_code)]
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
