use thiserror::Error;

use crate::engine::variables::DomainId;

/// Errors which make a model unusable; they are reported when the solver is created.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("the variable {0} was created with an empty domain")]
    EmptyInitialDomain(DomainId),
    #[error("the constraint '{constraint}' refers to the unknown variable {variable}")]
    UnknownVariable {
        constraint: &'static str,
        variable: DomainId,
    },
    #[error("the objective refers to the unknown variable {0}")]
    UnknownObjectiveVariable(DomainId),
    #[error("the constraint '{0}' has an empty scope")]
    EmptyScope(&'static str),
    #[error("the linear constraint has {num_coefficients} coefficients for {num_variables} variables")]
    CoefficientMismatch {
        num_coefficients: usize,
        num_variables: usize,
    },
    #[error("the variable {0} occurs more than once in an all-different constraint")]
    RepeatedVariable(DomainId),
    #[error("the objective coefficient of {0} is not finite")]
    NonFiniteObjectiveCoefficient(DomainId),
    #[error("the objective constant is not finite")]
    NonFiniteObjectiveConstant,
}
