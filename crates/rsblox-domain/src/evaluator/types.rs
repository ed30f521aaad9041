//! Types for the bind evaluator.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use crate::bind::Bind;

/// Per-call evaluation options.
#[derive(Debug, Clone, Default)]
pub struct EvaluateOptions {
    /// Fail the whole evaluation on transient resolution failures instead of
    /// marking the affected bind indeterminate.
    pub strict: bool,
    /// Wall-clock budget for the evaluation. Binds still resolving when it
    /// expires are abandoned and reported indeterminate.
    pub deadline: Option<Duration>,
    /// Grant id to exclusive slot name. Within a slot, only the grant from
    /// the highest-priority satisfied bind survives (ties broken by bind id
    /// ascending).
    pub exclusive_slots: HashMap<String, String>,
}

impl EvaluateOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Default::default()
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_exclusive_slot(
        mut self,
        grant: impl Into<String>,
        slot: impl Into<String>,
    ) -> Self {
        self.exclusive_slots.insert(grant.into(), slot.into());
        self
    }
}

/// Tri-state outcome of evaluating a bind (or a single criterion).
///
/// `Indeterminate` means resolution failed transiently after retries; it is
/// an outcome, not an error, and is distinct from "not satisfied".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    Satisfied,
    Unsatisfied,
    Indeterminate,
}

/// Result of evaluating a user against a list of binds.
///
/// `satisfied` and `indeterminate` preserve the input bind order regardless
/// of resolution completion order.
#[derive(Debug, Clone, Default)]
pub struct EvaluationReport {
    pub satisfied: Vec<Bind>,
    /// Grants from all satisfied binds, after exclusivity resolution.
    pub grants: BTreeSet<String>,
    pub indeterminate: Vec<Bind>,
}
