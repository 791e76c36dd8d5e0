//! Contains the outcome of a call to [`Solver::solve`](crate::Solver::solve).
use std::fmt::Display;

use crate::basic_types::Solution;
#[cfg(doc)]
use crate::options::SolverOptions;

/// The terminal status of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// The search tree was exhausted with a solution, or the first solution of a model without
    /// objective was found.
    Optimal,
    /// Solutions were found but the search stopped after [`SolverOptions::solution_limit`]
    /// solutions.
    Feasible,
    /// The search tree was exhausted without a solution.
    Infeasible,
    /// The search ran out of time.
    TimeLimit,
    /// The search reached [`SolverOptions::max_bt_steps`] node expansions.
    NodeLimit,
    /// An external termination condition stopped the search.
    Interrupted,
    /// Backtracking is disabled and the root is neither infeasible nor fully fixed; this is also
    /// the status before the first search.
    Unknown,
}

impl SolveStatus {
    /// Whether the search stopped because of a limit rather than by exhausting the tree.
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            SolveStatus::TimeLimit | SolveStatus::NodeLimit | SolveStatus::Interrupted
        )
    }
}

impl Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::TimeLimit => "TIME_LIMIT",
            SolveStatus::NodeLimit => "NODE_LIMIT",
            SolveStatus::Interrupted => "INTERRUPTED",
            SolveStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{status}")
    }
}

/// The result of [`Solver::solve`](crate::Solver::solve).
#[derive(Clone, Debug, PartialEq)]
pub struct SolveResult {
    pub status: SolveStatus,
    /// The best solution found, if any.
    pub incumbent: Option<Solution>,
    /// The collected solutions; which solutions are kept depends on
    /// [`SolverOptions::all_solutions`] and [`SolverOptions::all_optimal_solutions`].
    pub solutions: Vec<Solution>,
    /// The best objective value any solution can attain, as far as the search has proven.
    pub best_bound: Option<f64>,
}
