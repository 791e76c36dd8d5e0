//! The description of a problem: its variables, constraints and (optional) objective.
mod definition;
mod objective;
mod variable_names;

pub use definition::Model;
pub use objective::Objective;
pub use objective::OptimisationDirection;
pub use variable_names::VariableNames;
