use crate::basic_types::ProblemSolution;
use crate::basic_types::Solution;
use crate::containers::HashSet;
use crate::engine::propagation::Inconsistency;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationResult;
use crate::engine::propagation::Propagator;
use crate::engine::variables::DomainId;

/// Propagator for the constraint that all variables of the scope take different values.
///
/// This is the value-elimination form: the value of every fixed variable is removed from all other
/// variables. In addition, the scope is infeasible when the union of its domains holds fewer values
/// than there are variables.
#[derive(Clone, Debug)]
pub(crate) struct AllDifferentPropagator {
    scope: Vec<DomainId>,
}

impl AllDifferentPropagator {
    pub(crate) fn new(scope: Vec<DomainId>) -> Self {
        AllDifferentPropagator { scope }
    }

    fn check_pigeonhole(&self, context: &PropagationContext<'_>) -> PropagationResult {
        let num_variables = self.scope.len() as u64;

        let mut intervals = self
            .scope
            .iter()
            .flat_map(|&domain_id| context.domain(domain_id).intervals().iter().copied())
            .collect::<Vec<_>>();
        intervals.sort_unstable();

        let mut union_size = 0_u64;
        let mut current: Option<(i64, i64)> = None;
        for (lower, upper) in intervals {
            let (lower, upper) = (lower as i64, upper as i64);
            current = match current {
                Some((current_lower, current_upper)) if lower <= current_upper + 1 => {
                    Some((current_lower, current_upper.max(upper)))
                }
                Some((current_lower, current_upper)) => {
                    union_size += (current_upper - current_lower + 1) as u64;
                    Some((lower, upper))
                }
                None => Some((lower, upper)),
            };
        }
        if let Some((lower, upper)) = current {
            union_size += (upper - lower + 1) as u64;
        }

        if union_size < num_variables {
            Err(Inconsistency)
        } else {
            Ok(())
        }
    }
}

impl Propagator for AllDifferentPropagator {
    fn name(&self) -> &'static str {
        "all_different"
    }

    fn scope(&self) -> &[DomainId] {
        &self.scope
    }

    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let mut newly_fixed = self
            .scope
            .iter()
            .copied()
            .filter(|&domain_id| context.is_fixed(domain_id))
            .collect::<Vec<_>>();

        while let Some(fixed) = newly_fixed.pop() {
            let Some(value) = context.assigned_value(fixed) else {
                continue;
            };

            for &other in self.scope.iter().filter(|&&other| other != fixed) {
                let was_fixed = context.is_fixed(other);
                context.remove_value(other, value)?;

                if !was_fixed && context.is_fixed(other) {
                    newly_fixed.push(other);
                }
            }
        }

        self.check_pigeonhole(context)
    }

    fn is_satisfied(&self, solution: &Solution) -> bool {
        let mut seen: HashSet<_> = HashSet::default();
        self.scope
            .iter()
            .all(|&domain_id| seen.insert(solution.get_integer_value(domain_id)))
    }
}
