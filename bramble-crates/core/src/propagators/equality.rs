use crate::basic_types::ProblemSolution;
use crate::basic_types::Solution;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationResult;
use crate::engine::propagation::Propagator;
use crate::engine::variables::DomainId;

/// Propagator for the constraint `a == b`; both domains are reduced to their intersection.
#[derive(Clone, Debug)]
pub(crate) struct EqualityPropagator {
    scope: [DomainId; 2],
}

impl EqualityPropagator {
    pub(crate) fn new(a: DomainId, b: DomainId) -> Self {
        EqualityPropagator { scope: [a, b] }
    }

    pub(crate) fn variables(&self) -> [DomainId; 2] {
        self.scope
    }
}

impl Propagator for EqualityPropagator {
    fn name(&self) -> &'static str {
        "equality"
    }

    fn scope(&self) -> &[DomainId] {
        &self.scope
    }

    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let [a, b] = self.scope;

        let domain_a = context.domain(a).clone();
        context.intersect(b, &domain_a)?;

        // `b` is now a subset of `a`, so this leaves both with the intersection.
        let domain_b = context.domain(b).clone();
        context.intersect(a, &domain_b)?;

        Ok(())
    }

    fn is_satisfied(&self, solution: &Solution) -> bool {
        let [a, b] = self.scope;
        solution.get_integer_value(a) == solution.get_integer_value(b)
    }
}
