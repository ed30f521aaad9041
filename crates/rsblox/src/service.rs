//! Caller-facing bind service.

use std::sync::Arc;

use thiserror::Error;

use rsblox_client::{
    FetchClient, HttpTransport, ReqwestTransport, RetryPolicy, RobloxEndpoints, RobloxResolver,
    UserQuery,
};
use rsblox_domain::cache::{EntityCache, EntityCacheConfig};
use rsblox_domain::entity::RobloxUser;
use rsblox_domain::error::DomainError;
use rsblox_domain::evaluator::{BindEvaluator, EvaluateOptions, EvaluationReport};
use rsblox_domain::Bind;
use rsblox_storage::{BindStore, StorageError};

/// Errors from combined service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Configuration for a [`BindService`].
#[derive(Debug, Clone, Default)]
pub struct BindServiceConfig {
    pub cache: EntityCacheConfig,
    pub retry: RetryPolicy,
    pub endpoints: RobloxEndpoints,
}

/// Explicit context object composing the resolver, the evaluator and the
/// bind store. Holds the transport handle, the entity cache and the
/// configuration; no hidden global state.
pub struct BindService<S, T = ReqwestTransport> {
    resolver: Arc<RobloxResolver<T>>,
    evaluator: BindEvaluator<RobloxResolver<T>>,
    store: Arc<S>,
}

impl<S> BindService<S, ReqwestTransport>
where
    S: BindStore,
{
    /// Builds a service over the production reqwest transport.
    pub fn new(store: Arc<S>, config: BindServiceConfig) -> Self {
        Self::with_transport(store, Arc::new(ReqwestTransport::new()), config)
    }
}

impl<S, T> BindService<S, T>
where
    S: BindStore,
    T: HttpTransport + 'static,
{
    /// Builds a service over a custom transport (tests, proxies).
    pub fn with_transport(store: Arc<S>, transport: Arc<T>, config: BindServiceConfig) -> Self {
        let cache = EntityCache::new_shared(config.cache);
        let resolver = Arc::new(RobloxResolver::new(
            FetchClient::new(transport, config.retry),
            cache,
            config.endpoints,
        ));
        Self {
            evaluator: BindEvaluator::new(Arc::clone(&resolver)),
            resolver,
            store,
        }
    }

    /// The cache-backed entity resolver.
    pub fn resolver(&self) -> &Arc<RobloxResolver<T>> {
        &self.resolver
    }

    /// The typed fetch client, exposed for non-Roblox use.
    pub fn fetcher(&self) -> &FetchClient<T> {
        self.resolver.fetcher()
    }

    /// Resolves a user by id or username, hydrated with group-shell
    /// memberships and owned badge ids.
    pub async fn resolve_user(&self, query: &UserQuery) -> ServiceResult<RobloxUser> {
        Ok(self.resolver.resolve_user(query).await?)
    }

    /// Loads the binds configured for a scope.
    pub async fn get_binds(&self, scope_id: &str) -> ServiceResult<Vec<Bind>> {
        Ok(self.store.load_binds(scope_id).await?)
    }

    /// Evaluates a user against an explicit list of binds.
    pub async fn evaluate(
        &self,
        user: &RobloxUser,
        binds: &[Bind],
        options: &EvaluateOptions,
    ) -> ServiceResult<EvaluationReport> {
        Ok(self.evaluator.evaluate(user, binds, options).await?)
    }

    /// Evaluates a user against a scope's configured binds in one call.
    pub async fn evaluate_scope(
        &self,
        user: &RobloxUser,
        scope_id: &str,
        options: &EvaluateOptions,
    ) -> ServiceResult<EvaluationReport> {
        let binds = self.store.load_binds(scope_id).await?;
        Ok(self.evaluator.evaluate(user, &binds, options).await?)
    }
}
