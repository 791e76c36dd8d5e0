//! A [`TerminationCondition`] is a condition which is polled by the solver during the search
//! process. It indicates when the solver should stop, even if no definitive conclusions have been
//! made. The most common example would be [`TimeBudget`], which gives the solver a certain time
//! budget to complete its search.

mod combinator;
mod indefinite;
mod node_budget;
mod time_budget;

pub use combinator::Combinator;
pub use indefinite::Indefinite;
pub use node_budget::NodeBudget;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition. A termination condition determines when
/// the solver should give up searching for solutions.
pub trait TerminationCondition {
    /// Returns `true` when the solver should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called every time the solver expands a node.
    fn node_has_been_expanded(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn node_has_been_expanded(&mut self) {
        if let Some(t) = self {
            t.node_has_been_expanded()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn node_has_been_expanded(&mut self) {
        (**self).node_has_been_expanded()
    }
}
