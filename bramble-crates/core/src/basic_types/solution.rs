use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;

/// A trait which specifies the common behaviours of solutions.
pub trait ProblemSolution {
    /// Returns the number of defined [`DomainId`]s.
    fn num_domains(&self) -> usize;

    fn get_integer_value(&self, var: DomainId) -> i32;
}

/// A full assignment of the variables of a model, together with its objective value if the model
/// has an objective.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    values: KeyedVec<DomainId, i32>,
    objective_value: Option<f64>,
}

impl Solution {
    pub(crate) fn new(values: KeyedVec<DomainId, i32>, objective_value: Option<f64>) -> Self {
        Solution {
            values,
            objective_value,
        }
    }

    pub(crate) fn with_objective_value(self, objective_value: Option<f64>) -> Self {
        Solution {
            objective_value,
            ..self
        }
    }

    pub fn objective_value(&self) -> Option<f64> {
        self.objective_value
    }

    /// The assigned values in the order in which the variables were created.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.iter().copied()
    }

    pub fn contains_domain_id(&self, domain_id: DomainId) -> bool {
        domain_id.id() < self.values.len() as u32
    }
}

impl ProblemSolution for Solution {
    fn num_domains(&self) -> usize {
        self.values.len()
    }

    fn get_integer_value(&self, var: DomainId) -> i32 {
        self.values[var]
    }
}
