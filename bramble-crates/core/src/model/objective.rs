use std::cmp::Ordering;

use crate::basic_types::ProblemSolution;
use crate::basic_types::Solution;
use crate::engine::variables::DomainId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptimisationDirection {
    Minimise,
    Maximise,
}

impl OptimisationDirection {
    /// Orders two objective values such that the better one is [`Ordering::Greater`].
    pub(crate) fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            OptimisationDirection::Minimise => b.total_cmp(&a),
            OptimisationDirection::Maximise => a.total_cmp(&b),
        }
    }

    /// The better of the two values.
    pub(crate) fn best(self, a: f64, b: f64) -> f64 {
        match self {
            OptimisationDirection::Minimise => a.min(b),
            OptimisationDirection::Maximise => a.max(b),
        }
    }

    /// The worse of the two values.
    pub(crate) fn worst(self, a: f64, b: f64) -> f64 {
        match self {
            OptimisationDirection::Minimise => a.max(b),
            OptimisationDirection::Maximise => a.min(b),
        }
    }
}

/// A linear objective `constant + sum(coefficient * variable)` to be minimised or maximised.
#[derive(Clone, Debug, PartialEq)]
pub struct Objective {
    direction: OptimisationDirection,
    terms: Vec<(DomainId, f64)>,
    constant: f64,
}

impl Objective {
    pub fn minimise(terms: impl IntoIterator<Item = (DomainId, f64)>) -> Self {
        Objective {
            direction: OptimisationDirection::Minimise,
            terms: terms.into_iter().collect(),
            constant: 0.0,
        }
    }

    pub fn maximise(terms: impl IntoIterator<Item = (DomainId, f64)>) -> Self {
        Objective {
            direction: OptimisationDirection::Maximise,
            terms: terms.into_iter().collect(),
            constant: 0.0,
        }
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn direction(&self) -> OptimisationDirection {
        self.direction
    }

    pub fn terms(&self) -> &[(DomainId, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Whether the objective can only take integer values on integer assignments.
    pub fn is_integral(&self) -> bool {
        self.constant.fract() == 0.0
            && self
                .terms
                .iter()
                .all(|(_, coefficient)| coefficient.fract() == 0.0)
    }

    /// The objective value of a full assignment.
    pub fn evaluate(&self, solution: &Solution) -> f64 {
        self.constant
            + self
                .terms
                .iter()
                .map(|&(domain_id, coefficient)| {
                    coefficient * solution.get_integer_value(domain_id) as f64
                })
                .sum::<f64>()
    }
}
