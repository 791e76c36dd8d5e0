use log::debug;

use crate::basic_types::Tolerance;
use crate::bounding::LinearProgram;
use crate::bounding::LinearRelaxation;
use crate::bounding::LinearRow;
use crate::constraints::Constraint;
use crate::constraints::ConstraintId;
use crate::containers::KeyedVec;
use crate::engine::domains::DomainStore;
use crate::model::Objective;
use crate::model::OptimisationDirection;
use crate::options::SolutionType;

/// Computes optimistic objective bounds from the current domains.
///
/// The bound derived from the domains alone sums the best contribution of every objective term.
/// When a relaxation is configured, its optimum is used if it is tighter; the numerical noise of
/// the relaxation is absorbed by the tolerant comparisons of the search. Failures of the
/// relaxation are counted and otherwise ignored.
#[derive(Debug)]
pub(crate) struct BoundEstimator {
    objective: Option<Objective>,
    rows: Vec<LinearRow>,
    relaxation: Option<Box<dyn LinearRelaxation>>,
    tolerance: Tolerance,
    round_to_integer: bool,
    num_relaxation_calls: u64,
    num_relaxation_failures: u64,
}

impl BoundEstimator {
    pub(crate) fn new(
        objective: Option<Objective>,
        constraints: &KeyedVec<ConstraintId, Constraint>,
        relaxation: Option<Box<dyn LinearRelaxation>>,
        tolerance: Tolerance,
        solution_type: SolutionType,
    ) -> Self {
        let round_to_integer = solution_type == SolutionType::Integer
            && objective.as_ref().is_some_and(Objective::is_integral);

        let rows = if relaxation.is_some() {
            constraints
                .iter()
                .flat_map(Constraint::linear_rows)
                .collect()
        } else {
            vec![]
        };

        BoundEstimator {
            objective,
            rows,
            relaxation,
            tolerance,
            round_to_integer,
            num_relaxation_calls: 0,
            num_relaxation_failures: 0,
        }
    }

    pub(crate) fn num_relaxation_calls(&self) -> u64 {
        self.num_relaxation_calls
    }

    pub(crate) fn num_relaxation_failures(&self) -> u64 {
        self.num_relaxation_failures
    }

    /// The bound of the current domains; models without objective have the constant bound 0.
    pub(crate) fn estimate(&mut self, domains: &DomainStore) -> f64 {
        let Some(objective) = &self.objective else {
            return 0.0;
        };
        let direction = objective.direction();

        let mut bound = naive_bound(objective, domains);

        if let Some(relaxation) = self.relaxation.as_mut() {
            self.num_relaxation_calls += 1;

            let program = LinearProgram::new(
                direction,
                objective.terms().to_vec(),
                objective.constant(),
                domains.domain_ids().map(|domain_id| {
                    (
                        domains.lower_bound(domain_id) as f64,
                        domains.upper_bound(domain_id) as f64,
                    )
                }),
                self.rows.clone(),
            );

            match relaxation.solve(&program) {
                Ok(value) => bound = direction.worst(bound, value),
                Err(error) => {
                    self.num_relaxation_failures += 1;
                    debug!("Relaxation failed ({error}), using the domain bound {bound}");
                }
            }
        }

        if self.round_to_integer {
            // A relaxation optimum just below an integer still rounds to that integer.
            let margin = self.tolerance.threshold(bound);
            bound = match direction {
                OptimisationDirection::Minimise => (bound - margin).ceil(),
                OptimisationDirection::Maximise => (bound + margin).floor(),
            };
        }

        bound
    }
}

/// The best objective value the domains allow when every term is considered on its own.
fn naive_bound(objective: &Objective, domains: &DomainStore) -> f64 {
    let terms = objective
        .terms()
        .iter()
        .map(|&(domain_id, coefficient)| {
            let lower = coefficient * domains.lower_bound(domain_id) as f64;
            let upper = coefficient * domains.upper_bound(domain_id) as f64;
            match objective.direction() {
                OptimisationDirection::Minimise => lower.min(upper),
                OptimisationDirection::Maximise => lower.max(upper),
            }
        })
        .sum::<f64>();

    objective.constant() + terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounding::RelaxationError;
    use crate::bounding::SimplexRelaxation;
    use crate::constraints;
    use crate::constraints::LinearRelation;
    use crate::engine::domains::IntegerDomain;
    use crate::engine::variables::DomainId;

    #[derive(Debug)]
    struct FailingRelaxation;

    impl LinearRelaxation for FailingRelaxation {
        fn solve(&mut self, _: &LinearProgram) -> Result<f64, RelaxationError> {
            Err(RelaxationError::IterationLimit(0))
        }
    }

    fn store(domains: &[(i32, i32)]) -> (DomainStore, Vec<DomainId>) {
        let mut store = DomainStore::default();
        let ids = domains
            .iter()
            .map(|&(lower, upper)| store.grow(IntegerDomain::interval(lower, upper).unwrap()))
            .collect();
        (store, ids)
    }

    #[test]
    fn naive_bound_is_sign_aware() {
        let (domains, ids) = store(&[(1, 4), (-2, 3)]);
        let objective = Objective::minimise([(ids[0], 2.0), (ids[1], -1.0)]).with_constant(1.0);

        let mut estimator = BoundEstimator::new(
            Some(objective),
            &KeyedVec::default(),
            None,
            Tolerance::new(1e-6, 1e-6),
            SolutionType::Float,
        );

        // 1 + 2 * 1 - 3
        assert_eq!(0.0, estimator.estimate(&domains));
    }

    #[test]
    fn relaxation_tightens_the_bound() {
        let (domains, ids) = store(&[(0, 15); 10]);
        let constraints = [constraints::linear(vec![1; 10], ids.clone(), LinearRelation::LessOrEqual, 15)]
            .into_iter()
            .collect::<KeyedVec<ConstraintId, Constraint>>();
        let objective = Objective::maximise(ids.iter().map(|&domain_id| (domain_id, 1.0)));

        let mut estimator = BoundEstimator::new(
            Some(objective),
            &constraints,
            Some(Box::new(SimplexRelaxation::default())),
            Tolerance::new(1e-6, 1e-6),
            SolutionType::Integer,
        );

        assert_eq!(15.0, estimator.estimate(&domains));
        assert_eq!(1, estimator.num_relaxation_calls());
    }

    #[derive(Debug)]
    struct NoisyRelaxation(f64);

    impl LinearRelaxation for NoisyRelaxation {
        fn solve(&mut self, _: &LinearProgram) -> Result<f64, RelaxationError> {
            Ok(self.0)
        }
    }

    #[test]
    fn relaxation_optimum_is_used_as_is() {
        let (domains, ids) = store(&[(0, 15); 2]);
        let objective = Objective::maximise(ids.iter().map(|&domain_id| (domain_id, 1.0)));

        let mut estimator = BoundEstimator::new(
            Some(objective),
            &KeyedVec::default(),
            Some(Box::new(NoisyRelaxation(15.0))),
            Tolerance::new(1e-6, 1e-6),
            SolutionType::Float,
        );

        assert_eq!(15.0, estimator.estimate(&domains));
    }

    #[test]
    fn integer_rounding_absorbs_relaxation_noise() {
        let (domains, ids) = store(&[(0, 15); 2]);
        let objective = Objective::maximise(ids.iter().map(|&domain_id| (domain_id, 1.0)));

        let mut estimator = BoundEstimator::new(
            Some(objective),
            &KeyedVec::default(),
            Some(Box::new(NoisyRelaxation(15.0 - 1e-9))),
            Tolerance::new(1e-6, 1e-6),
            SolutionType::Integer,
        );

        assert_eq!(15.0, estimator.estimate(&domains));
    }

    #[test]
    fn failing_relaxation_falls_back_to_the_domain_bound() {
        let (domains, ids) = store(&[(0, 5), (0, 5)]);
        let objective = Objective::maximise([(ids[0], 1.0), (ids[1], 1.0)]);

        let mut estimator = BoundEstimator::new(
            Some(objective),
            &KeyedVec::default(),
            Some(Box::new(FailingRelaxation)),
            Tolerance::new(1e-6, 1e-6),
            SolutionType::Float,
        );

        assert_eq!(10.0, estimator.estimate(&domains));
        assert_eq!(1, estimator.num_relaxation_failures());
    }

    #[test]
    fn fractional_objectives_are_not_rounded() {
        let (domains, ids) = store(&[(0, 3)]);
        let objective = Objective::minimise([(ids[0], 0.5)]).with_constant(0.25);

        let mut estimator = BoundEstimator::new(
            Some(objective),
            &KeyedVec::default(),
            None,
            Tolerance::new(1e-6, 1e-6),
            SolutionType::Integer,
        );

        assert_eq!(0.25, estimator.estimate(&domains));
    }
}
