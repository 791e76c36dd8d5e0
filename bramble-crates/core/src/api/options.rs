//! Contains the options which configure the [`Solver`](crate::Solver).
use std::time::Duration;

use crate::bounding::LinearRelaxation;
#[cfg(doc)]
use crate::bounding::SimplexRelaxation;

/// The order in which open nodes are expanded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TraverseStrategy {
    /// Depth-first search for models without objective, best-first search otherwise.
    #[default]
    Auto,
    /// Best-first search: the node with the best bound is expanded first, ties are broken by
    /// depth (deeper first) and then by creation order.
    Bfs,
    /// Depth-first search.
    Dfs,
    /// Depth-first search until the first solution is found, best-first search afterwards.
    Dbfs,
}

/// How the domain of the branching variable is split into two children.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum BranchSplit {
    /// Fix the variable to its smallest value, or remove that value.
    #[default]
    Smallest,
    /// Fix the variable to its largest value, or remove that value.
    Biggest,
    /// Split the domain at the midpoint of its bounds.
    InHalf,
}

/// Which variable is branched on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum VariableSelection {
    /// The unfixed variable with the smallest domain; ties are broken by the number of constraints
    /// it occurs in (more first) and then by creation order.
    #[default]
    MostConstrained,
    /// The first unfixed variable in creation order.
    InputOrder,
}

/// The numeric representation of bounds and objective values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SolutionType {
    #[default]
    Float,
    /// Bounds of objectives with integral coefficients are rounded to integers.
    Integer,
}

/// Options which determine how the solver searches; they are fixed for the lifetime of a solver.
#[derive(Debug)]
pub struct SolverOptions {
    /// The wall-clock budget of a call to [`Solver::solve`](crate::Solver::solve).
    pub time_limit: Option<Duration>,
    /// The relative tolerance for comparisons of bounds and objective values.
    pub rtol: f64,
    /// The absolute tolerance for comparisons of bounds and objective values.
    pub atol: f64,
    /// The relaxation used to tighten node bounds, for example a [`SimplexRelaxation`].
    pub lp_optimizer: Option<Box<dyn LinearRelaxation>>,
    pub traverse_strategy: TraverseStrategy,
    pub branch_split: BranchSplit,
    pub variable_selection: VariableSelection,
    /// Record every feasible assignment instead of only improving ones.
    pub all_solutions: bool,
    /// Record every assignment with the optimal objective value.
    pub all_optimal_solutions: bool,
    /// When disabled, the solver only propagates the root node.
    pub backtrack: bool,
    /// The maximum number of node expansions.
    pub max_bt_steps: Option<u64>,
    /// Push children with the best bound first.
    pub backtrack_sorting: bool,
    /// Record the search tree, see [`SearchLog`](crate::search::SearchLog).
    pub keep_logs: bool,
    pub solution_type: SolutionType,
    /// Stop after this many solutions were recorded.
    pub solution_limit: Option<usize>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            time_limit: None,
            rtol: 1e-6,
            atol: 1e-6,
            lp_optimizer: None,
            traverse_strategy: TraverseStrategy::default(),
            branch_split: BranchSplit::default(),
            variable_selection: VariableSelection::default(),
            all_solutions: false,
            all_optimal_solutions: false,
            backtrack: true,
            max_bt_steps: None,
            backtrack_sorting: true,
            keep_logs: false,
            solution_type: SolutionType::default(),
            solution_limit: None,
        }
    }
}
