pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod propagators;

pub mod bounding;
pub mod branching;
pub mod constraints;
pub mod model;
pub mod search;
pub mod statistics;

pub use convert_case;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
//
// Example:
// `use bramble_core::Solver;`
// vs.
// `use bramble_core::api::Solver;`
mod api;

pub use api::*;

pub use crate::api::solver::Solver;
pub use crate::basic_types::ModelError;
pub use crate::basic_types::ProblemSolution;
pub use crate::basic_types::Solution;
pub use crate::engine::propagation::PropagationStatus;
pub use crate::engine::termination;
pub use crate::engine::variables;
pub use crate::engine::DomainStore;
pub use crate::engine::EmptyDomain;
pub use crate::engine::IntegerDomain;
