//! Objective bounds for search nodes.
//!
//! The [`BoundEstimator`] derives a bound from the current domains and can tighten it with a
//! [`LinearRelaxation`] of the linear constraints. [`SimplexRelaxation`] is the relaxation which
//! ships with the solver; any other implementation of the trait can be plugged in through the
//! [`SolverOptions`](crate::options::SolverOptions).
mod bound_estimator;
mod linear_relaxation;
mod simplex;

pub(crate) use bound_estimator::BoundEstimator;
pub use linear_relaxation::LinearProgram;
pub use linear_relaxation::LinearRelaxation;
pub use linear_relaxation::LinearRow;
pub use linear_relaxation::RelaxationError;
pub use linear_relaxation::RowRelation;
pub use simplex::SimplexRelaxation;
