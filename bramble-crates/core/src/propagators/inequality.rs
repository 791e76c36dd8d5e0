use crate::basic_types::ProblemSolution;
use crate::basic_types::Solution;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationResult;
use crate::engine::propagation::Propagator;
use crate::engine::variables::DomainId;

/// Propagator for the constraint `a <= b`.
#[derive(Clone, Debug)]
pub(crate) struct LessOrEqualPropagator {
    scope: [DomainId; 2],
}

impl LessOrEqualPropagator {
    pub(crate) fn new(a: DomainId, b: DomainId) -> Self {
        LessOrEqualPropagator { scope: [a, b] }
    }

    pub(crate) fn variables(&self) -> [DomainId; 2] {
        self.scope
    }
}

impl Propagator for LessOrEqualPropagator {
    fn name(&self) -> &'static str {
        "less_or_equal"
    }

    fn scope(&self) -> &[DomainId] {
        &self.scope
    }

    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let [a, b] = self.scope;

        context.restrict_upper_bound(a, context.upper_bound(b))?;
        context.restrict_lower_bound(b, context.lower_bound(a))?;

        Ok(())
    }

    fn is_satisfied(&self, solution: &Solution) -> bool {
        let [a, b] = self.scope;
        solution.get_integer_value(a) <= solution.get_integer_value(b)
    }
}
