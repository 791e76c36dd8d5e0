use crate::basic_types::Solution;
use crate::basic_types::Tolerance;
use crate::model::OptimisationDirection;

/// Which of the found solutions are kept besides the incumbent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Collection {
    /// The sequence of improving solutions.
    Improving,
    /// Every solution.
    All,
    /// Every solution whose objective value is within the tolerance of the best one.
    AllOptimal,
}

/// The best solution found so far together with the collected solutions.
#[derive(Debug)]
pub(crate) struct Incumbent {
    direction: Option<OptimisationDirection>,
    tolerance: Tolerance,
    collection: Collection,
    best: Option<Solution>,
    solutions: Vec<Solution>,
}

impl Incumbent {
    pub(crate) fn new(
        direction: Option<OptimisationDirection>,
        tolerance: Tolerance,
        collection: Collection,
    ) -> Self {
        Incumbent {
            direction,
            tolerance,
            collection,
            best: None,
            solutions: Vec::new(),
        }
    }

    pub(crate) fn best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    pub(crate) fn value(&self) -> Option<f64> {
        self.best.as_ref().and_then(Solution::objective_value)
    }

    pub(crate) fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub(crate) fn num_solutions(&self) -> usize {
        self.solutions.len()
    }

    /// Offers a solution; returns whether it became the new incumbent.
    pub(crate) fn record(&mut self, solution: Solution) -> bool {
        let improves = match (&self.best, self.direction) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(best), Some(direction)) => match (solution.objective_value(), best.objective_value()) {
                (Some(candidate), Some(incumbent)) => {
                    self.tolerance.improves(direction, candidate, incumbent)
                }
                _ => false,
            },
        };

        match self.collection {
            Collection::Improving => {
                if improves {
                    self.solutions.push(solution.clone());
                }
            }
            Collection::All => self.solutions.push(solution.clone()),
            Collection::AllOptimal => {
                if improves {
                    self.solutions.clear();
                    self.solutions.push(solution.clone());
                } else if self.is_equal_to_best(&solution) {
                    self.solutions.push(solution.clone());
                }
            }
        }

        if improves {
            self.best = Some(solution);
        }

        improves
    }

    fn is_equal_to_best(&self, solution: &Solution) -> bool {
        match (
            solution.objective_value(),
            self.best.as_ref().and_then(Solution::objective_value),
        ) {
            (Some(candidate), Some(best)) => self.tolerance.equal(candidate, best),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::KeyedVec;

    fn solution(values: &[i32], objective_value: f64) -> Solution {
        Solution::new(values.iter().copied().collect::<KeyedVec<_, _>>(), Some(objective_value))
    }

    fn incumbent(collection: Collection) -> Incumbent {
        Incumbent::new(
            Some(OptimisationDirection::Minimise),
            Tolerance::new(1e-6, 1e-6),
            collection,
        )
    }

    #[test]
    fn only_strict_improvements_replace_the_incumbent() {
        let mut incumbent = incumbent(Collection::Improving);

        assert!(incumbent.record(solution(&[3], 3.0)));
        assert!(!incumbent.record(solution(&[4], 3.0 + 1e-9)));
        assert!(incumbent.record(solution(&[1], 1.0)));

        assert_eq!(Some(1.0), incumbent.value());
        assert_eq!(2, incumbent.num_solutions());
    }

    #[test]
    fn all_optimal_collection_restarts_on_improvement() {
        let mut incumbent = incumbent(Collection::AllOptimal);

        let _ = incumbent.record(solution(&[5], 5.0));
        let _ = incumbent.record(solution(&[6], 5.0));
        assert_eq!(2, incumbent.num_solutions());

        let _ = incumbent.record(solution(&[2], 2.0));
        let _ = incumbent.record(solution(&[7], 7.0));
        let _ = incumbent.record(solution(&[3], 2.0));

        assert_eq!(
            vec![Some(2.0), Some(2.0)],
            incumbent
                .solutions()
                .iter()
                .map(Solution::objective_value)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn all_collection_keeps_worse_solutions() {
        let mut incumbent = incumbent(Collection::All);

        let _ = incumbent.record(solution(&[1], 1.0));
        let _ = incumbent.record(solution(&[9], 9.0));

        assert_eq!(2, incumbent.num_solutions());
        assert_eq!(Some(1.0), incumbent.value());
    }
}
