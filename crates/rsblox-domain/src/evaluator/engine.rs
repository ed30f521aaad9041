//! Bind satisfaction engine.
//!
//! Independent entity resolutions run concurrently (across binds and across
//! criteria within a bind); resolutions for the same cache key coalesce in
//! the entity cache. Suspension points are exactly the resolver calls;
//! criterion decisions and combination are synchronous.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use crate::bind::{Bind, BindCriterion, CombineRule};
use crate::entity::{Entity, EntityKind, RobloxUser};
use crate::error::{DomainError, DomainResult};

use super::traits::EntityResolver;
use super::types::{BindOutcome, EvaluateOptions, EvaluationReport};

/// Evaluates binds against a resolved user.
pub struct BindEvaluator<R> {
    resolver: Arc<R>,
}

impl<R> BindEvaluator<R>
where
    R: EntityResolver + 'static,
{
    pub fn new(resolver: Arc<R>) -> Self {
        Self { resolver }
    }

    /// Returns the satisfied binds, the aggregated grants, and the binds that
    /// could not be resolved in time.
    ///
    /// The order of `satisfied` (and `indeterminate`) matches the input bind
    /// order, independent of resolution completion order. In strict mode,
    /// transient resolution failures and deadline expiry fail the whole call
    /// instead of producing indeterminate binds.
    pub async fn evaluate(
        &self,
        user: &RobloxUser,
        binds: &[Bind],
        options: &EvaluateOptions,
    ) -> DomainResult<EvaluationReport> {
        let deadline = options.deadline.map(|budget| Instant::now() + budget);

        let outcomes = join_all(
            binds
                .iter()
                .map(|bind| self.evaluate_bind(user, bind, options, deadline)),
        )
        .await;

        let mut report = EvaluationReport::default();
        for (bind, outcome) in binds.iter().zip(outcomes) {
            match outcome? {
                BindOutcome::Satisfied => report.satisfied.push(bind.clone()),
                BindOutcome::Unsatisfied => {}
                BindOutcome::Indeterminate => {
                    warn!(bind_id = bind.id, "bind indeterminate after retries");
                    report.indeterminate.push(bind.clone());
                }
            }
        }

        collect_grants(&mut report, options);
        debug!(
            satisfied = report.satisfied.len(),
            indeterminate = report.indeterminate.len(),
            grants = report.grants.len(),
            "evaluation complete"
        );
        Ok(report)
    }

    async fn evaluate_bind(
        &self,
        user: &RobloxUser,
        bind: &Bind,
        options: &EvaluateOptions,
        deadline: Option<Instant>,
    ) -> DomainResult<BindOutcome> {
        let criteria = self.evaluate_criteria(user, bind, options);
        match deadline {
            Some(deadline) => match timeout_at(deadline, criteria).await {
                Ok(outcome) => outcome,
                // Deadline expired: the in-flight resolutions are dropped and
                // the bind is reported indeterminate.
                Err(_) => {
                    if options.strict {
                        return Err(DomainError::Timeout {
                            duration_ms: options
                                .deadline
                                .map(|d| d.as_millis() as u64)
                                .unwrap_or_default(),
                        });
                    }
                    Ok(BindOutcome::Indeterminate)
                }
            },
            None => criteria.await,
        }
    }

    async fn evaluate_criteria(
        &self,
        user: &RobloxUser,
        bind: &Bind,
        options: &EvaluateOptions,
    ) -> DomainResult<BindOutcome> {
        let results = join_all(
            bind.criteria
                .iter()
                .map(|criterion| self.evaluate_criterion(user, criterion, options)),
        )
        .await;

        let mut outcomes = Vec::with_capacity(results.len());
        for result in results {
            outcomes.push(result?);
        }
        Ok(combine(bind.rule, &outcomes))
    }

    async fn evaluate_criterion(
        &self,
        user: &RobloxUser,
        criterion: &BindCriterion,
        options: &EvaluateOptions,
    ) -> DomainResult<BindOutcome> {
        match criterion.kind {
            EntityKind::Group => {
                match self.hydrated_group(criterion.target_id).await {
                    Ok(_group) => {
                        let membership = user.membership(criterion.target_id);
                        Ok(decided(criterion.satisfied_by_membership(membership)))
                    }
                    Err(err) => absorb(err, options),
                }
            }
            EntityKind::Badge | EntityKind::GamePass | EntityKind::Asset => {
                match self
                    .resolver
                    .owns(user, criterion.kind, criterion.target_id)
                    .await
                {
                    Ok(owned) => Ok(decided(criterion.satisfied_by_ownership(owned))),
                    Err(err) => absorb(err, options),
                }
            }
            // Rejected at bind construction; unreachable for validated binds.
            EntityKind::User => Err(DomainError::Validation {
                message: "a user cannot be a bind target".to_string(),
            }),
        }
    }

    /// Resolves a group, forcing a sync if the resolver handed back a shell.
    /// An unhydrated group never participates in a satisfaction decision.
    async fn hydrated_group(&self, group_id: u64) -> DomainResult<Entity> {
        let entity = self.resolver.resolve(EntityKind::Group, group_id).await?;
        match entity.as_group() {
            Some(group) if !group.is_hydrated() => {
                self.resolver.sync(EntityKind::Group, group_id).await
            }
            _ => Ok(entity),
        }
    }
}

fn decided(satisfied: bool) -> BindOutcome {
    if satisfied {
        BindOutcome::Satisfied
    } else {
        BindOutcome::Unsatisfied
    }
}

/// Maps a resolution failure to a criterion outcome.
///
/// `NotFound` means the criterion cannot be satisfied; transient failures
/// make it indeterminate unless strict mode is on, in which case they (and
/// every other error) propagate.
fn absorb(err: DomainError, options: &EvaluateOptions) -> DomainResult<BindOutcome> {
    match err {
        DomainError::NotFound { .. } => Ok(BindOutcome::Unsatisfied),
        DomainError::Unavailable { .. } if !options.strict => Ok(BindOutcome::Indeterminate),
        err => Err(err),
    }
}

/// Combines criterion outcomes under a bind's rule.
///
/// ALL: any unsatisfied criterion decides the bind; otherwise an
/// indeterminate criterion leaves it undecided. ANY: any satisfied criterion
/// decides the bind; otherwise an indeterminate criterion leaves it
/// undecided.
fn combine(rule: CombineRule, outcomes: &[BindOutcome]) -> BindOutcome {
    let any = |target: BindOutcome| outcomes.iter().any(|o| *o == target);
    match rule {
        CombineRule::All => {
            if any(BindOutcome::Unsatisfied) {
                BindOutcome::Unsatisfied
            } else if any(BindOutcome::Indeterminate) {
                BindOutcome::Indeterminate
            } else {
                BindOutcome::Satisfied
            }
        }
        CombineRule::Any => {
            if any(BindOutcome::Satisfied) {
                BindOutcome::Satisfied
            } else if any(BindOutcome::Indeterminate) {
                BindOutcome::Indeterminate
            } else {
                BindOutcome::Unsatisfied
            }
        }
    }
}

/// Aggregates grants from the satisfied binds.
///
/// Grants mapped to an exclusive slot are awarded to the satisfied bind with
/// the highest priority; ties break by bind id ascending, so the result is
/// deterministic for any input order.
fn collect_grants(report: &mut EvaluationReport, options: &EvaluateOptions) {
    let mut by_precedence: Vec<&Bind> = report.satisfied.iter().collect();
    by_precedence.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));

    let mut taken_slots: HashSet<&str> = HashSet::new();
    for bind in by_precedence {
        for grant in &bind.grants {
            match options.exclusive_slots.get(grant) {
                Some(slot) => {
                    if taken_slots.insert(slot.as_str()) {
                        report.grants.insert(grant.clone());
                    }
                }
                None => {
                    report.grants.insert(grant.clone());
                }
            }
        }
    }
}
