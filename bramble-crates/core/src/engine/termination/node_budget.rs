use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once the given number of nodes was expanded.
#[derive(Debug, Copy, Clone)]
pub struct NodeBudget {
    budget: u64,
    num_expanded: u64,
}

impl NodeBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_expanded: 0,
        }
    }
}

impl TerminationCondition for NodeBudget {
    fn should_stop(&mut self) -> bool {
        self.num_expanded >= self.budget
    }

    fn node_has_been_expanded(&mut self) {
        self.num_expanded += 1;
    }
}
