pub mod options;
pub mod results;
pub(crate) mod solver;
