use crate::create_statistics_struct;

create_statistics_struct!(
    /// The counters of a branch-and-bound search.
    pub SearchStatistics {
        /// The number of nodes added to the search tree, including the root.
        nodes_created: u64,
        /// The number of nodes which were popped and restored.
        nodes_expanded: u64,
        infeasible_nodes: u64,
        pruned_nodes: u64,
        /// The number of solutions which were offered to the incumbent.
        solutions: u64,
        peak_depth: usize,
        propagator_calls: u64,
        relaxation_calls: u64,
        relaxation_failures: u64,
        solve_time_secs: f64,
});
