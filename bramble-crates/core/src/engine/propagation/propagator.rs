use std::fmt::Debug;

use crate::basic_types::Solution;
use crate::engine::domains::DomainStore;
use crate::engine::domains::EmptyDomain;
use crate::engine::domains::IntegerDomain;
use crate::engine::variables::DomainId;

/// The logic of a propagator found that the current domains admit no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Inconsistency;

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency
    }
}

pub(crate) type PropagationResult = Result<(), Inconsistency>;

/// The outcome of a single propagator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropagationStatus {
    /// No domain was changed.
    Unchanged,
    /// The listed variables lost at least one value.
    Narrowed(Vec<DomainId>),
    /// The constraint cannot be satisfied by the current domains.
    Infeasible,
}

/// A propagator removes values from domains which cannot be part of any solution, or detects that
/// no solution exists for the current domains.
///
/// Propagators never add values to a domain. They are not required to reach a fixpoint by
/// themselves; the engine calls them again whenever one of their variables changes.
pub(crate) trait Propagator: Debug {
    /// The name of the propagator, used for logging.
    fn name(&self) -> &'static str;

    /// The variables the propagator reads or narrows, in declaration order.
    fn scope(&self) -> &[DomainId];

    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationResult;

    /// Whether the full assignment in `solution` satisfies the constraint.
    fn is_satisfied(&self, solution: &Solution) -> bool;
}

/// The view of the domain store given to a propagator; it records which variables were narrowed.
#[derive(Debug)]
pub(crate) struct PropagationContext<'a> {
    domains: &'a mut DomainStore,
    touched: Vec<DomainId>,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(domains: &'a mut DomainStore) -> Self {
        PropagationContext {
            domains,
            touched: Vec::new(),
        }
    }

    /// Consumes the context and reports the outcome of the propagator call.
    pub(crate) fn into_status(self, result: PropagationResult) -> PropagationStatus {
        match result {
            Err(Inconsistency) => PropagationStatus::Infeasible,
            Ok(()) if self.touched.is_empty() => PropagationStatus::Unchanged,
            Ok(()) => PropagationStatus::Narrowed(self.touched),
        }
    }

    pub(crate) fn domain(&self, domain_id: DomainId) -> &IntegerDomain {
        self.domains.domain(domain_id)
    }

    pub(crate) fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains.lower_bound(domain_id)
    }

    pub(crate) fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains.upper_bound(domain_id)
    }

    pub(crate) fn is_fixed(&self, domain_id: DomainId) -> bool {
        self.domains.is_fixed(domain_id)
    }

    pub(crate) fn assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        self.domains.assigned_value(domain_id)
    }

    pub(crate) fn remove_value(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        let changed = self.domains.remove_value(domain_id, value)?;
        self.record(domain_id, changed);
        Ok(())
    }

    pub(crate) fn restrict_lower_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        let changed = self.domains.restrict_lower_bound(domain_id, bound)?;
        self.record(domain_id, changed);
        Ok(())
    }

    pub(crate) fn restrict_upper_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        let changed = self.domains.restrict_upper_bound(domain_id, bound)?;
        self.record(domain_id, changed);
        Ok(())
    }

    pub(crate) fn intersect(
        &mut self,
        domain_id: DomainId,
        other: &IntegerDomain,
    ) -> Result<(), EmptyDomain> {
        let changed = self.domains.intersect(domain_id, other)?;
        self.record(domain_id, changed);
        Ok(())
    }

    fn record(&mut self, domain_id: DomainId, changed: bool) {
        if changed && !self.touched.contains(&domain_id) {
            self.touched.push(domain_id);
        }
    }
}
