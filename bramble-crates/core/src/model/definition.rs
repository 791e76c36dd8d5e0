use log::info;

use crate::basic_types::ModelError;
use crate::constraints::Constraint;
use crate::constraints::ConstraintId;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::domains::IntegerDomain;
use crate::engine::variables::DomainId;
use crate::model::Objective;
use crate::model::VariableNames;

/// A problem to be handed to the [`Solver`](crate::Solver).
///
/// Variables are created with their initial domains; constraints are registered in order and
/// receive consecutive [`ConstraintId`]s. A model is only checked when the solver is created.
#[derive(Clone, Debug, Default)]
pub struct Model {
    initial_domains: KeyedVec<DomainId, Option<IntegerDomain>>,
    variable_names: VariableNames,
    constraints: KeyedVec<ConstraintId, Constraint>,
    objective: Option<Objective>,
}

impl Model {
    /// Creates a variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.initial_domains
            .push(IntegerDomain::interval(lower_bound, upper_bound))
    }

    pub fn new_named_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
        name: impl Into<String>,
    ) -> DomainId {
        let domain_id = self.new_bounded_integer(lower_bound, upper_bound);
        self.variable_names.add_integer(domain_id, name.into());
        domain_id
    }

    /// Creates a variable whose domain consists of exactly the given values.
    pub fn new_sparse_integer(&mut self, values: impl IntoIterator<Item = i32>) -> DomainId {
        self.initial_domains.push(IntegerDomain::from_values(values))
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> ConstraintId {
        self.constraints.push(constraint)
    }

    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    pub fn num_variables(&self) -> usize {
        self.initial_domains.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variable_names(&self) -> &VariableNames {
        &self.variable_names
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    pub fn constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    /// Checks the model and splits it into the parts the solver consumes.
    pub(crate) fn finalise(self) -> Result<FinalisedModel, ModelError> {
        let num_domains = self.initial_domains.len();

        let initial_domains = self
            .initial_domains
            .iter_with_keys()
            .map(|(domain_id, domain)| domain.clone().ok_or(ModelError::EmptyInitialDomain(domain_id)))
            .collect::<Result<KeyedVec<DomainId, IntegerDomain>, _>>()?;

        for constraint in self.constraints.iter() {
            constraint.validate(num_domains)?;
        }

        if let Some(objective) = &self.objective {
            if !objective.constant().is_finite() {
                return Err(ModelError::NonFiniteObjectiveConstant);
            }
            for &(domain_id, coefficient) in objective.terms() {
                if domain_id.index() >= num_domains {
                    return Err(ModelError::UnknownObjectiveVariable(domain_id));
                }
                if !coefficient.is_finite() {
                    return Err(ModelError::NonFiniteObjectiveCoefficient(domain_id));
                }
            }
        }

        let mut constraints_per_kind: HashMap<&'static str, usize> = HashMap::default();
        for constraint in self.constraints.iter() {
            *constraints_per_kind.entry(constraint.name()).or_default() += 1;
        }
        let mut summary = constraints_per_kind.into_iter().collect::<Vec<_>>();
        summary.sort_unstable();
        info!(
            "Model has {} variables and {} constraints {summary:?}",
            num_domains,
            self.constraints.len()
        );

        Ok(FinalisedModel {
            initial_domains,
            variable_names: self.variable_names,
            constraints: self.constraints,
            objective: self.objective,
        })
    }
}

/// A model which passed validation; every domain is non-empty and every id is known.
#[derive(Debug)]
pub(crate) struct FinalisedModel {
    pub(crate) initial_domains: KeyedVec<DomainId, IntegerDomain>,
    pub(crate) variable_names: VariableNames,
    pub(crate) constraints: KeyedVec<ConstraintId, Constraint>,
    pub(crate) objective: Option<Objective>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;

    #[test]
    fn empty_initial_domain_is_reported() {
        let mut model = Model::default();
        let _ = model.new_bounded_integer(0, 3);
        let empty = model.new_bounded_integer(5, 4);

        assert_eq!(
            Some(ModelError::EmptyInitialDomain(empty)),
            model.finalise().err()
        );
    }

    #[test]
    fn unknown_objective_variable_is_reported() {
        let mut model = Model::default();
        let x = model.new_bounded_integer(0, 3);
        model.set_objective(Objective::minimise([(x, 1.0), (DomainId::new(7), 1.0)]));

        assert_eq!(
            Some(ModelError::UnknownObjectiveVariable(DomainId::new(7))),
            model.finalise().err()
        );
    }

    #[test]
    fn non_finite_coefficients_are_reported() {
        let mut model = Model::default();
        let x = model.new_bounded_integer(0, 3);
        model.set_objective(Objective::maximise([(x, f64::NAN)]));

        assert_eq!(
            Some(ModelError::NonFiniteObjectiveCoefficient(x)),
            model.finalise().err()
        );
    }

    #[test]
    fn constraints_keep_registration_order() {
        let mut model = Model::default();
        let x = model.new_named_bounded_integer(0, 3, "x");
        let y = model.new_sparse_integer([1, 5, 9]);

        let first = model.add_constraint(constraints::not_equals(x, y));
        let second = model.add_constraint(constraints::less_than_or_equals(x, y));

        assert_eq!((ConstraintId(0), ConstraintId(1)), (first, second));
        assert_eq!(Some("x"), model.variable_names().get_int_name(x));

        let finalised = model.finalise().unwrap();
        assert_eq!(3, finalised.initial_domains[y].size());
    }
}
