//! Propagation of the constraints until a fixpoint is reached.
//!
//! Every constraint kind implements [`Propagator`]; the [`PropagationEngine`] schedules the
//! propagators of the constraints which watch a variable whenever that variable is narrowed.
mod propagation_engine;
mod propagator;
mod propagator_queue;

pub(crate) use propagation_engine::PropagationEngine;
pub(crate) use propagator::Inconsistency;
pub(crate) use propagator::PropagationContext;
pub(crate) use propagator::PropagationResult;
pub use propagator::PropagationStatus;
pub(crate) use propagator::Propagator;
pub(crate) use propagator_queue::PropagatorQueue;
