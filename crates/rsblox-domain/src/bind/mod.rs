//! Bind criteria model.
//!
//! Pure data plus a single validation pass run at construction time. A bind
//! that came out of [`Bind::new`] (or passed [`Bind::validate`] after
//! deserialization) never fails structural checks during evaluation.
//!
//! No network or cache interaction happens here; criterion decisions against
//! already-resolved data are synchronous.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entity::{EntityKind, GroupMembership};
use crate::error::{DomainError, DomainResult};

/// How a bind combines its criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineRule {
    /// Every criterion must be satisfied.
    All,
    /// At least one criterion must be satisfied.
    Any,
}

/// Inclusive rank range for a group criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRange {
    pub min: u8,
    pub max: u8,
}

impl RankRange {
    /// Builds a range, rejecting `min > max`.
    pub fn new(min: u8, max: u8) -> DomainResult<Self> {
        if min > max {
            return Err(DomainError::Validation {
                message: format!("rank range min {min} exceeds max {max}"),
            });
        }
        Ok(Self { min, max })
    }

    /// Both boundaries are inclusive.
    pub fn contains(&self, rank: u8) -> bool {
        self.min <= rank && rank <= self.max
    }
}

/// One atomic condition within a bind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindCriterion {
    /// Target entity kind. Users cannot be bind targets.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    #[serde(rename = "id")]
    pub target_id: u64,
    /// Inclusive rank range; group criteria only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<RankRange>,
    /// Exact rank requirement; group criteria only, mutually exclusive with
    /// `rank`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_rank: Option<u8>,
    /// Satisfied when the user does NOT hold/belong.
    #[serde(default)]
    pub negated: bool,
}

impl BindCriterion {
    /// Plain membership/ownership criterion for a target.
    pub fn new(kind: EntityKind, target_id: u64) -> Self {
        Self {
            kind,
            target_id,
            rank: None,
            exact_rank: None,
            negated: false,
        }
    }

    pub fn with_rank_range(mut self, min: u8, max: u8) -> DomainResult<Self> {
        self.rank = Some(RankRange::new(min, max)?);
        Ok(self)
    }

    pub fn with_exact_rank(mut self, rank: u8) -> Self {
        self.exact_rank = Some(rank);
        self
    }

    pub fn negated(mut self) -> Self {
        self.negated = true;
        self
    }

    /// Structural validation, run at bind construction.
    pub fn validate(&self) -> DomainResult<()> {
        if self.kind == EntityKind::User {
            return Err(DomainError::Validation {
                message: "a user cannot be a bind target".to_string(),
            });
        }
        if self.kind != EntityKind::Group && (self.rank.is_some() || self.exact_rank.is_some()) {
            return Err(DomainError::Validation {
                message: format!("rank conditions do not apply to {} criteria", self.kind),
            });
        }
        if self.rank.is_some() && self.exact_rank.is_some() {
            return Err(DomainError::Validation {
                message: "either an exact rank or a rank range can be set, not both".to_string(),
            });
        }
        if let Some(range) = &self.rank {
            // Re-check: deserialized criteria bypass RankRange::new.
            RankRange::new(range.min, range.max)?;
        }
        Ok(())
    }

    /// Group-criterion decision against the user's membership (if any).
    ///
    /// Exact rank requires equality; a range requires membership and a rank
    /// within its inclusive bounds; no rank condition means membership alone
    /// suffices. Negation inverts the result.
    pub fn satisfied_by_membership(&self, membership: Option<&GroupMembership>) -> bool {
        let held = match membership {
            Some(m) => match (self.exact_rank, &self.rank) {
                (Some(exact), _) => m.rank == exact,
                (None, Some(range)) => range.contains(m.rank),
                (None, None) => true,
            },
            None => false,
        };
        held != self.negated
    }

    /// Ownership-criterion decision. Negation inverts the result.
    pub fn satisfied_by_ownership(&self, owned: bool) -> bool {
        owned != self.negated
    }
}

/// A configured rule mapping Roblox-side criteria to platform-side grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bind {
    pub id: u64,
    /// Criteria in configuration order, combined per `rule`.
    pub criteria: Vec<BindCriterion>,
    pub rule: CombineRule,
    /// Role/permission identifiers produced when this bind is satisfied.
    pub grants: BTreeSet<String>,
    /// Higher priority wins when two satisfied binds grant conflicting
    /// exclusive roles.
    #[serde(default)]
    pub priority: i64,
}

impl Bind {
    /// Builds a bind, rejecting empty criteria sets and malformed criteria.
    pub fn new(
        id: u64,
        criteria: Vec<BindCriterion>,
        rule: CombineRule,
        grants: impl IntoIterator<Item = String>,
        priority: i64,
    ) -> DomainResult<Self> {
        let bind = Self {
            id,
            criteria,
            rule,
            grants: grants.into_iter().collect(),
            priority,
        };
        bind.validate()?;
        Ok(bind)
    }

    /// Structural validation; also applied to deserialized binds before use.
    pub fn validate(&self) -> DomainResult<()> {
        if self.criteria.is_empty() {
            return Err(DomainError::Validation {
                message: format!("bind {} has no criteria", self.id),
            });
        }
        for criterion in &self.criteria {
            criterion.validate()?;
        }
        Ok(())
    }
}
