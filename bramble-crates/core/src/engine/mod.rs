pub(crate) mod domains;
pub(crate) mod propagation;
pub mod termination;
pub mod variables;

pub use domains::DomainStore;
pub use domains::EmptyDomain;
pub use domains::IntegerDomain;
pub(crate) use propagation::PropagationEngine;
#[cfg(test)]
pub(crate) mod test_solver;
