use crate::basic_types::ProblemSolution;
use crate::basic_types::Solution;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationResult;
use crate::engine::propagation::Propagator;
use crate::engine::variables::DomainId;

/// Propagator for the constraint `a != b`.
///
/// Only propagates once one of the two sides is fixed.
#[derive(Clone, Debug)]
pub(crate) struct NotEqualPropagator {
    scope: [DomainId; 2],
}

impl NotEqualPropagator {
    pub(crate) fn new(a: DomainId, b: DomainId) -> Self {
        NotEqualPropagator { scope: [a, b] }
    }
}

impl Propagator for NotEqualPropagator {
    fn name(&self) -> &'static str {
        "not_equal"
    }

    fn scope(&self) -> &[DomainId] {
        &self.scope
    }

    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let [a, b] = self.scope;

        if let Some(value) = context.assigned_value(a) {
            context.remove_value(b, value)?;
        }
        if let Some(value) = context.assigned_value(b) {
            context.remove_value(a, value)?;
        }

        Ok(())
    }

    fn is_satisfied(&self, solution: &Solution) -> bool {
        let [a, b] = self.scope;
        solution.get_integer_value(a) != solution.get_integer_value(b)
    }
}
