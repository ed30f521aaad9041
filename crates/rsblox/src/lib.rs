//! rsblox: Roblox entitlement resolution
//!
//! Given a platform user identified by a Roblox account and a set of
//! administrator-configured binds, this library determines which binds are
//! satisfied and which role/permission grants follow.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   rsblox                     │
//! │        (caller-facing composition)           │
//! ├──────────────┬──────────────┬───────────────┤
//! │ rsblox-domain│ rsblox-client│ rsblox-storage│
//! │ entities,    │ typed fetch, │ bind          │
//! │ binds, cache,│ resolvers    │ persistence   │
//! │ evaluator    │              │               │
//! └──────────────┴──────────────┴───────────────┘
//! ```
//!
//! [`BindService`] is the explicit context object: it owns the transport
//! handle, the entity cache, and the configuration, and every operation
//! flows through it. There is no process-global state.
//!
//! # Example
//!
//! ```rust,ignore
//! use rsblox::{BindService, BindServiceConfig, MemoryBindStore, UserQuery, EvaluateOptions};
//!
//! let store = MemoryBindStore::new_shared();
//! let service = BindService::new(store, BindServiceConfig::default());
//!
//! let user = service.resolve_user(&UserQuery::Username("builderman".into())).await?;
//! let report = service.evaluate_scope(&user, "guild-1", &EvaluateOptions::default()).await?;
//! for grant in &report.grants {
//!     println!("grant: {grant}");
//! }
//! ```

mod service;

pub use service::{BindService, BindServiceConfig, ServiceError, ServiceResult};

// Re-export the public surface of the member crates so callers need one
// dependency only.
pub use rsblox_client::{
    FetchClient, FetchError, FetchOptions, FetchResult, HttpRequest, HttpResponse, HttpTransport,
    Method, ReqwestTransport, RetryPolicy, RobloxEndpoints, RobloxResolver, Typed, UserQuery,
};
pub use rsblox_domain::{
    Bind, BindCriterion, BindEvaluator, BindOutcome, CombineRule, DomainError, DomainResult,
    Entity, EntityCache, EntityCacheConfig, EntityKind, EntityResolver, EvaluateOptions,
    EvaluationReport, GroupMembership, RankRange, RobloxGroup, RobloxUser,
};
pub use rsblox_storage::{BindStore, MemoryBindStore, StorageError, StorageResult};
