use std::fmt::Debug;

use thiserror::Error;

use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;
use crate::model::OptimisationDirection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowRelation {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

/// A linear row `sum(coefficient * variable) <relation> rhs` over real-valued variables.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearRow {
    terms: Vec<(DomainId, f64)>,
    relation: RowRelation,
    rhs: f64,
}

impl LinearRow {
    pub fn new(terms: Vec<(DomainId, f64)>, relation: RowRelation, rhs: f64) -> Self {
        LinearRow {
            terms,
            relation,
            rhs,
        }
    }

    pub fn terms(&self) -> &[(DomainId, f64)] {
        &self.terms
    }

    pub fn relation(&self) -> RowRelation {
        self.relation
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }
}

/// The continuous relaxation of the model at a search node: every variable ranges over the reals
/// between its current bounds and only the linear constraints are kept.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearProgram {
    pub(crate) direction: OptimisationDirection,
    pub(crate) objective: Vec<(DomainId, f64)>,
    pub(crate) objective_constant: f64,
    pub(crate) bounds: KeyedVec<DomainId, (f64, f64)>,
    pub(crate) rows: Vec<LinearRow>,
}

impl LinearProgram {
    pub fn new(
        direction: OptimisationDirection,
        objective: Vec<(DomainId, f64)>,
        objective_constant: f64,
        bounds: impl IntoIterator<Item = (f64, f64)>,
        rows: Vec<LinearRow>,
    ) -> Self {
        LinearProgram {
            direction,
            objective,
            objective_constant,
            bounds: bounds.into_iter().collect(),
            rows,
        }
    }

    pub fn direction(&self) -> OptimisationDirection {
        self.direction
    }

    pub fn objective(&self) -> &[(DomainId, f64)] {
        &self.objective
    }

    pub fn objective_constant(&self) -> f64 {
        self.objective_constant
    }

    /// The `(lower, upper)` bounds of a variable.
    pub fn bounds(&self, domain_id: DomainId) -> (f64, f64) {
        self.bounds[domain_id]
    }

    pub fn num_variables(&self) -> usize {
        self.bounds.len()
    }

    pub fn rows(&self) -> &[LinearRow] {
        &self.rows
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxationError {
    #[error("the relaxation is infeasible")]
    Infeasible,
    #[error("the relaxation is unbounded")]
    Unbounded,
    #[error("the relaxation exceeded its iteration limit of {0}")]
    IterationLimit(usize),
}

/// A solver for the continuous relaxation of a node.
///
/// Implementations are consumed as a black box: the solver only uses the optimal objective value,
/// and any error makes it fall back to the bound derived from the domains alone.
pub trait LinearRelaxation: Debug + Send {
    /// Returns the optimal objective value of `program`, including its constant.
    fn solve(&mut self, program: &LinearProgram) -> Result<f64, RelaxationError>;
}
