//! The constraints which can be added to a [`Model`].
//!
//! A [`Constraint`] is created through one of the functions in this module, for example:
//! ```rust
//! # use bramble_core::model::Model;
//! # use bramble_core::constraints;
//! # use bramble_core::constraints::LinearRelation;
//! let mut model = Model::default();
//! let x = model.new_bounded_integer(1, 9);
//! let y = model.new_bounded_integer(1, 5);
//!
//! model.add_constraint(constraints::linear(vec![1, 1], vec![x, y], LinearRelation::Equal, 14));
//! model.add_constraint(constraints::not_equals(x, y));
//! ```
use std::fmt::Display;

use crate::basic_types::ModelError;
use crate::basic_types::Solution;
use crate::bounding::LinearRow;
use crate::bounding::RowRelation;
use crate::containers::HashSet;
use crate::containers::StorageKey;
use crate::engine::propagation::Propagator;
use crate::engine::variables::DomainId;
#[cfg(doc)]
use crate::model::Model;
use crate::propagators::AllDifferentPropagator;
use crate::propagators::EqualityPropagator;
use crate::propagators::LessOrEqualPropagator;
use crate::propagators::LinearSumPropagator;
use crate::propagators::NotEqualPropagator;

/// The identity of a constraint: its position in the order of registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub(crate) u32);

impl StorageKey for ConstraintId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ConstraintId(index as u32)
    }
}

impl Display for ConstraintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// The relation between the weighted sum and the right-hand side of a linear constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinearRelation {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

impl LinearRelation {
    pub(crate) fn holds(self, lhs: i128, rhs: i128) -> bool {
        match self {
            LinearRelation::LessOrEqual => lhs <= rhs,
            LinearRelation::GreaterOrEqual => lhs >= rhs,
            LinearRelation::Equal => lhs == rhs,
            LinearRelation::NotEqual => lhs != rhs,
        }
    }
}

/// A constraint over integer variables; immutable once created.
#[derive(Clone, Debug)]
pub struct Constraint {
    kind: ConstraintKind,
}

#[derive(Clone, Debug)]
enum ConstraintKind {
    Equality(EqualityPropagator),
    Inequality(LessOrEqualPropagator),
    NotEqual(NotEqualPropagator),
    LinearSum(LinearSumPropagator),
    AllDifferent(AllDifferentPropagator),
}

/// Creates the constraint `a == b`.
pub fn equals(a: DomainId, b: DomainId) -> Constraint {
    Constraint {
        kind: ConstraintKind::Equality(EqualityPropagator::new(a, b)),
    }
}

/// Creates the constraint `a <= b`.
pub fn less_than_or_equals(a: DomainId, b: DomainId) -> Constraint {
    Constraint {
        kind: ConstraintKind::Inequality(LessOrEqualPropagator::new(a, b)),
    }
}

/// Creates the constraint `a >= b`, which is stored as `b <= a`.
pub fn greater_than_or_equals(a: DomainId, b: DomainId) -> Constraint {
    less_than_or_equals(b, a)
}

/// Creates the constraint `a != b`.
pub fn not_equals(a: DomainId, b: DomainId) -> Constraint {
    Constraint {
        kind: ConstraintKind::NotEqual(NotEqualPropagator::new(a, b)),
    }
}

/// Creates the constraint `sum(coefficients[i] * variables[i]) <relation> rhs`.
///
/// The lengths of `coefficients` and `variables` are checked when the solver is created.
pub fn linear(
    coefficients: Vec<i32>,
    variables: Vec<DomainId>,
    relation: LinearRelation,
    rhs: i32,
) -> Constraint {
    Constraint {
        kind: ConstraintKind::LinearSum(LinearSumPropagator::new(
            coefficients,
            variables,
            relation,
            rhs,
        )),
    }
}

/// Creates the constraint that all `variables` take pairwise different values.
pub fn all_different(variables: Vec<DomainId>) -> Constraint {
    Constraint {
        kind: ConstraintKind::AllDifferent(AllDifferentPropagator::new(variables)),
    }
}

impl Constraint {
    pub(crate) fn propagator(&self) -> &dyn Propagator {
        match &self.kind {
            ConstraintKind::Equality(propagator) => propagator,
            ConstraintKind::Inequality(propagator) => propagator,
            ConstraintKind::NotEqual(propagator) => propagator,
            ConstraintKind::LinearSum(propagator) => propagator,
            ConstraintKind::AllDifferent(propagator) => propagator,
        }
    }

    /// The name of the constraint kind.
    pub fn name(&self) -> &'static str {
        self.propagator().name()
    }

    /// The variables of the constraint in declaration order.
    pub fn scope(&self) -> &[DomainId] {
        self.propagator().scope()
    }

    /// Whether the full assignment in `solution` satisfies this constraint.
    pub fn is_satisfied(&self, solution: &Solution) -> bool {
        self.propagator().is_satisfied(solution)
    }

    pub(crate) fn validate(&self, num_domains: usize) -> Result<(), ModelError> {
        let scope = self.scope();
        if scope.is_empty() {
            return Err(ModelError::EmptyScope(self.name()));
        }

        if let Some(&variable) = scope
            .iter()
            .find(|domain_id| domain_id.index() >= num_domains)
        {
            return Err(ModelError::UnknownVariable {
                constraint: self.name(),
                variable,
            });
        }

        match &self.kind {
            ConstraintKind::LinearSum(propagator)
                if propagator.coefficients().len() != scope.len() =>
            {
                Err(ModelError::CoefficientMismatch {
                    num_coefficients: propagator.coefficients().len(),
                    num_variables: scope.len(),
                })
            }
            ConstraintKind::AllDifferent(_) => {
                let mut seen: HashSet<_> = HashSet::default();
                match scope.iter().find(|&&domain_id| !seen.insert(domain_id)) {
                    Some(&repeated) => Err(ModelError::RepeatedVariable(repeated)),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }

    /// The rows this constraint contributes to a linear relaxation; constraints which cannot be
    /// expressed as linear (in)equalities contribute none.
    pub(crate) fn linear_rows(&self) -> Vec<LinearRow> {
        match &self.kind {
            ConstraintKind::Equality(propagator) => {
                let [a, b] = propagator.variables();
                vec![LinearRow::new(vec![(a, 1.0), (b, -1.0)], RowRelation::Equal, 0.0)]
            }
            ConstraintKind::Inequality(propagator) => {
                let [a, b] = propagator.variables();
                vec![LinearRow::new(
                    vec![(a, 1.0), (b, -1.0)],
                    RowRelation::LessOrEqual,
                    0.0,
                )]
            }
            ConstraintKind::LinearSum(propagator) => {
                let relation = match propagator.relation() {
                    LinearRelation::LessOrEqual => RowRelation::LessOrEqual,
                    LinearRelation::GreaterOrEqual => RowRelation::GreaterOrEqual,
                    LinearRelation::Equal => RowRelation::Equal,
                    LinearRelation::NotEqual => return vec![],
                };
                let terms = propagator
                    .variables()
                    .iter()
                    .zip(propagator.coefficients())
                    .map(|(&domain_id, &coefficient)| (domain_id, coefficient as f64))
                    .collect();
                vec![LinearRow::new(terms, relation, propagator.rhs() as f64)]
            }
            ConstraintKind::NotEqual(_) | ConstraintKind::AllDifferent(_) => vec![],
        }
    }
}
