//! A small harness for exercising single propagators in unit tests.
use crate::basic_types::Solution;
use crate::constraints::Constraint;
use crate::containers::KeyedVec;
use crate::engine::domains::DomainStore;
use crate::engine::domains::IntegerDomain;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationStatus;
use crate::engine::variables::DomainId;

#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    pub(crate) domains: DomainStore,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.domains
            .grow(IntegerDomain::interval(lower_bound, upper_bound).expect("non-empty domain"))
    }

    pub(crate) fn new_sparse_variable(&mut self, values: impl IntoIterator<Item = i32>) -> DomainId {
        self.domains
            .grow(IntegerDomain::from_values(values).expect("non-empty domain"))
    }

    /// Calls the propagator of `constraint` once.
    pub(crate) fn propagate(&mut self, constraint: &Constraint) -> PropagationStatus {
        let propagator = constraint.propagator();
        let mut context = PropagationContext::new(&mut self.domains);
        let result = propagator.propagate(&mut context);
        context.into_status(result)
    }

    /// Calls the propagator of `constraint` until it reports no change.
    pub(crate) fn propagate_until_fixpoint(&mut self, constraint: &Constraint) -> PropagationStatus {
        loop {
            match self.propagate(constraint) {
                PropagationStatus::Narrowed(_) => {}
                status => return status,
            }
        }
    }

    pub(crate) fn values(&self, domain_id: DomainId) -> Vec<i32> {
        self.domains.values(domain_id).collect()
    }

    pub(crate) fn assert_bounds(&self, domain_id: DomainId, lower_bound: i32, upper_bound: i32) {
        assert_eq!(
            (lower_bound, upper_bound),
            (
                self.domains.lower_bound(domain_id),
                self.domains.upper_bound(domain_id)
            ),
            "unexpected bounds for {domain_id}"
        );
    }

    pub(crate) fn solution(values: &[i32]) -> Solution {
        Solution::new(values.iter().copied().collect::<KeyedVec<_, _>>(), None)
    }
}
