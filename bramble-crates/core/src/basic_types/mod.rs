mod model_error;
mod solution;
mod tolerance;
mod trail;

pub use model_error::ModelError;
pub use solution::ProblemSolution;
pub use solution::Solution;
pub(crate) use tolerance::Tolerance;
pub(crate) use trail::Trail;
