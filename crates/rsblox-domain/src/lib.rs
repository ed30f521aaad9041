//! rsblox-domain: Core bind resolution domain logic
//!
//! This crate contains the core entitlement logic including:
//! - Typed Roblox entity model (users, groups, badges, passes, assets)
//! - Bind criteria model with construction-time validation
//! - Entity cache with per-kind TTL and in-flight coalescing
//! - Bind satisfaction evaluator
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               rsblox-domain                  │
//! ├─────────────────────────────────────────────┤
//! │  entity/     - Typed Roblox entities        │
//! │  bind/       - Bind criteria + validation   │
//! │  cache/      - Entity caching               │
//! │  evaluator/  - Bind satisfaction engine     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Network I/O lives behind the [`evaluator::EntityResolver`] trait; this
//! crate never performs a fetch itself.

pub mod bind;
pub mod cache;
pub mod entity;
pub mod error;
pub mod evaluator;

// Re-export commonly used types at the crate root
pub use bind::{Bind, BindCriterion, CombineRule, RankRange};
pub use cache::{EntityCache, EntityCacheConfig, EntityKey};
pub use entity::{Entity, EntityKind, GroupMembership, RobloxGroup, RobloxUser};
pub use error::{DomainError, DomainResult};
pub use evaluator::{
    BindEvaluator, BindOutcome, EntityResolver, EvaluateOptions, EvaluationReport,
};
