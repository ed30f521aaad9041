//! rsblox-client: Typed Roblox fetch layer and entity resolvers
//!
//! This crate turns remote Roblox API calls into strongly-typed domain
//! entities while tolerating partial failure:
//! - `HttpTransport` trait over the raw wire (reqwest in production)
//! - `FetchClient` for typed fetches with retry/backoff
//! - `RobloxResolver` implementing the domain's `EntityResolver` trait,
//!   cache-first with per-kind endpoints
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               rsblox-client                  │
//! ├─────────────────────────────────────────────┤
//! │  transport.rs - HttpTransport capability    │
//! │  retry.rs     - Retry policy + backoff      │
//! │  fetch.rs     - Typed fetch client          │
//! │  roblox/      - Endpoints and wire DTOs     │
//! │  resolver.rs  - Cache-backed resolvers      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! There is no hidden global session: the transport handle, cache handle and
//! configuration travel inside the resolver passed into every call.

pub mod error;
pub mod fetch;
pub mod resolver;
pub mod retry;
pub mod roblox;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types at the crate root
pub use error::{FetchError, FetchResult};
pub use fetch::{FetchClient, FetchOptions, Typed};
pub use resolver::{RobloxResolver, UserQuery};
pub use retry::RetryPolicy;
pub use roblox::RobloxEndpoints;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
