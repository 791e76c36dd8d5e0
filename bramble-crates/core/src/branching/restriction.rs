use std::fmt::Display;

use crate::engine::domains::DomainStore;
use crate::engine::domains::EmptyDomain;
use crate::engine::variables::DomainId;

/// The incremental restriction which a child node adds to the domain of its branching variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Restriction {
    Fix(i32),
    Remove(i32),
    AtMost(i32),
    AtLeast(i32),
}

/// A branching variable together with the restriction of one child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BranchDecision {
    pub domain_id: DomainId,
    pub restriction: Restriction,
}

impl BranchDecision {
    pub(crate) fn new(domain_id: DomainId, restriction: Restriction) -> Self {
        BranchDecision {
            domain_id,
            restriction,
        }
    }

    /// Applies the restriction to the domain store.
    pub(crate) fn apply(&self, domains: &mut DomainStore) -> Result<bool, EmptyDomain> {
        match self.restriction {
            Restriction::Fix(value) => domains.fix(self.domain_id, value),
            Restriction::Remove(value) => domains.remove_value(self.domain_id, value),
            Restriction::AtMost(bound) => domains.restrict_upper_bound(self.domain_id, bound),
            Restriction::AtLeast(bound) => domains.restrict_lower_bound(self.domain_id, bound),
        }
    }

    /// Whether `value` satisfies the restriction.
    pub fn admits(&self, value: i32) -> bool {
        match self.restriction {
            Restriction::Fix(fixed) => value == fixed,
            Restriction::Remove(removed) => value != removed,
            Restriction::AtMost(bound) => value <= bound,
            Restriction::AtLeast(bound) => value >= bound,
        }
    }

    /// Renders the decision with the given name for the variable.
    pub fn describe(&self, name: &str) -> String {
        match self.restriction {
            Restriction::Fix(value) => format!("{name} = {value}"),
            Restriction::Remove(value) => format!("{name} != {value}"),
            Restriction::AtMost(bound) => format!("{name} <= {bound}"),
            Restriction::AtLeast(bound) => format!("{name} >= {bound}"),
        }
    }
}

impl Display for BranchDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe(&self.domain_id.to_string()))
    }
}
