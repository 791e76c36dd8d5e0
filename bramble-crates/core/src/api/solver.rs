use std::time::Duration;
use std::time::Instant;

use log::debug;
use log::trace;
use log::warn;

use crate::basic_types::ModelError;
use crate::basic_types::Solution;
use crate::basic_types::Tolerance;
use crate::bounding::BoundEstimator;
use crate::bramble_assert_moderate;
use crate::bramble_assert_simple;
use crate::branching::BranchDecision;
use crate::branching::Brancher;
use crate::constraints::Constraint;
use crate::constraints::ConstraintId;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::engine::domains::DomainStore;
use crate::engine::domains::IntegerDomain;
use crate::engine::propagation::Inconsistency;
use crate::engine::propagation::PropagationResult;
use crate::engine::termination::NodeBudget;
use crate::engine::termination::TerminationCondition;
use crate::engine::termination::TimeBudget;
use crate::engine::variables::DomainId;
use crate::engine::PropagationEngine;
use crate::model::Model;
use crate::model::Objective;
use crate::model::OptimisationDirection;
use crate::model::VariableNames;
use crate::options::SolutionType;
use crate::options::SolverOptions;
use crate::options::TraverseStrategy;
use crate::results::SolveResult;
use crate::results::SolveStatus;
use crate::search::Collection;
use crate::search::Incumbent;
use crate::search::Node;
use crate::search::NodeId;
use crate::search::NodeStatus;
use crate::search::OpenNodes;
use crate::search::SearchLog;
use crate::search::SearchLogEntry;
use crate::search::SearchStatistics;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// A branch-and-bound solver for finite-domain models.
///
/// The solver owns the domains of the model, the trail which allows restoring them, and the search
/// tree. Nodes are stored in an arena and refer to their parent; only the nodes on the active path
/// (the root up to the node whose state the domains currently represent) have their decisions
/// applied. Moving to another node rolls the domains back to the deepest common ancestor and
/// re-applies the remaining decisions of the new node, propagating after each.
///
/// # Example
/// ```rust
/// # use bramble_core::Solver;
/// # use bramble_core::model::Model;
/// # use bramble_core::constraints;
/// # use bramble_core::constraints::LinearRelation;
/// # use bramble_core::options::SolverOptions;
/// # use bramble_core::results::SolveStatus;
/// # use bramble_core::termination::Indefinite;
/// # use bramble_core::ProblemSolution;
/// let mut model = Model::default();
/// let x = model.new_bounded_integer(1, 9);
/// let y = model.new_bounded_integer(1, 5);
/// let _ = model.add_constraint(constraints::linear(
///     vec![1, 1],
///     vec![x, y],
///     LinearRelation::Equal,
///     14,
/// ));
///
/// let mut solver = Solver::new(model, SolverOptions::default()).expect("valid model");
/// let result = solver.solve(&mut Indefinite);
///
/// assert_eq!(result.status, SolveStatus::Optimal);
/// let solution = result.incumbent.expect("a solution exists");
/// assert_eq!(solution.get_integer_value(x), 9);
/// assert_eq!(solution.get_integer_value(y), 5);
/// ```
#[derive(Debug)]
pub struct Solver {
    domains: DomainStore,
    initial_domains: KeyedVec<DomainId, IntegerDomain>,
    constraints: KeyedVec<ConstraintId, Constraint>,
    propagation_engine: PropagationEngine,
    bound_estimator: BoundEstimator,
    brancher: Brancher,
    objective: Option<Objective>,
    variable_names: VariableNames,
    tolerance: Tolerance,
    options: SolverOptions,
    nodes: KeyedVec<NodeId, Node>,
    open_nodes: OpenNodes,
    /// The nodes whose decisions are applied to the domains, from the root down; the node at index
    /// `i` owns checkpoint `i` of the trail.
    active_path: Vec<NodeId>,
    incumbent: Incumbent,
    status: SolveStatus,
    statistics: SearchStatistics,
    search_log: Option<SearchLog>,
    started: Instant,
    elapsed: Duration,
}

impl Solver {
    /// Validates the model and sets up a solver for it.
    pub fn new(model: Model, mut options: SolverOptions) -> Result<Solver, ModelError> {
        let model = model.finalise()?;

        if options.all_optimal_solutions && model.objective.is_none() {
            warn!("All optimal solutions were requested for a model without objective; the search stops at the first solution");
        }

        let mut domains = DomainStore::default();
        for domain in model.initial_domains.iter() {
            let _ = domains.grow(domain.clone());
        }

        let propagation_engine =
            PropagationEngine::new(domains.num_domains(), &model.constraints);
        let num_occurrences = domains
            .domain_ids()
            .map(|domain_id| propagation_engine.num_watchers(domain_id))
            .collect();
        let brancher = Brancher::new(
            options.variable_selection,
            options.branch_split,
            num_occurrences,
        );

        let tolerance = Tolerance::new(options.rtol, options.atol);
        let bound_estimator = BoundEstimator::new(
            model.objective.clone(),
            &model.constraints,
            options.lp_optimizer.take(),
            tolerance,
            options.solution_type,
        );

        let direction = direction_of(model.objective.as_ref());
        let incumbent = Incumbent::new(
            model.objective.as_ref().map(Objective::direction),
            tolerance,
            collection_of(&options),
        );

        Ok(Solver {
            domains,
            initial_domains: model.initial_domains,
            constraints: model.constraints,
            propagation_engine,
            bound_estimator,
            brancher,
            objective: model.objective,
            variable_names: model.variable_names,
            tolerance,
            open_nodes: OpenNodes::new(direction, tolerance, false),
            search_log: options.keep_logs.then(SearchLog::default),
            options,
            nodes: KeyedVec::default(),
            active_path: Vec::new(),
            incumbent,
            status: SolveStatus::Unknown,
            statistics: SearchStatistics::default(),
            started: Instant::now(),
            elapsed: Duration::ZERO,
        })
    }

    /// Runs the branch-and-bound search until the tree is exhausted or a limit is reached.
    ///
    /// Besides the limits in the [`SolverOptions`], the search stops when `termination` triggers;
    /// the status is then [`SolveStatus::Interrupted`]. Calling `solve` again restarts the search
    /// from the initial domains.
    pub fn solve(&mut self, termination: &mut impl TerminationCondition) -> SolveResult {
        self.reset();

        let propagator_calls = self.propagation_engine.num_propagator_calls();
        let relaxation_calls = self.bound_estimator.num_relaxation_calls();
        let relaxation_failures = self.bound_estimator.num_relaxation_failures();

        self.status = self.search(termination);
        self.elapsed = self.started.elapsed();

        self.statistics.propagator_calls =
            self.propagation_engine.num_propagator_calls() - propagator_calls;
        self.statistics.relaxation_calls =
            self.bound_estimator.num_relaxation_calls() - relaxation_calls;
        self.statistics.relaxation_failures =
            self.bound_estimator.num_relaxation_failures() - relaxation_failures;
        self.statistics.solve_time_secs = self.elapsed.as_secs_f64();

        debug!(
            "Search ended with status {} after {} expanded nodes",
            self.status, self.statistics.nodes_expanded
        );
        self.log_statistics();

        SolveResult {
            status: self.status,
            incumbent: self.incumbent.best().cloned(),
            solutions: self.incumbent.solutions().to_vec(),
            best_bound: self.best_bound(),
        }
    }

    /// The values which remain in the current domain of `domain_id`.
    pub fn values(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        self.domains.values(domain_id)
    }

    /// The current domain of `domain_id`.
    pub fn domain(&self, domain_id: DomainId) -> &IntegerDomain {
        self.domains.domain(domain_id)
    }

    pub fn num_variables(&self) -> usize {
        self.domains.num_domains()
    }

    pub fn incumbent(&self) -> Option<&Solution> {
        self.incumbent.best()
    }

    pub fn solutions(&self) -> &[Solution] {
        self.incumbent.solutions()
    }

    /// The best objective value any solution can attain, as far as the search has proven; `None`
    /// for models without objective.
    pub fn best_bound(&self) -> Option<f64> {
        let direction = self.objective.as_ref()?.direction();

        match (self.open_nodes.best_bound(), self.incumbent.value()) {
            (Some(open), Some(incumbent)) => Some(direction.best(open, incumbent)),
            (Some(open), None) => Some(open),
            (None, Some(incumbent)) => Some(incumbent),
            (None, None) if self.status == SolveStatus::Unknown => {
                self.nodes.iter().next().map(|root| root.bound)
            }
            (None, None) => None,
        }
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn num_open_nodes(&self) -> usize {
        self.open_nodes.len()
    }

    pub fn num_closed_nodes(&self) -> usize {
        self.nodes.len() - self.open_nodes.len()
    }

    /// The wall-clock time of the last call to [`Solver::solve`].
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// The record of the last search; only kept if [`SolverOptions::keep_logs`] is enabled.
    pub fn search_log(&self) -> Option<&SearchLog> {
        self.search_log.as_ref()
    }

    pub fn variable_names(&self) -> &VariableNames {
        &self.variable_names
    }

    /// Logs the statistics of the last search if statistic logging is configured.
    pub fn log_statistics(&self) {
        if !should_log_statistics() {
            return;
        }

        self.statistics.log(StatisticLogger::default());
        log_statistic_postfix();
    }
}

// Search
impl Solver {
    fn reset(&mut self) {
        self.domains.rollback_to(0);
        bramble_assert_simple!(self.domains.get_checkpoint() == 0);
        bramble_assert_moderate!(self
            .initial_domains
            .iter_with_keys()
            .all(|(domain_id, domain)| self.domains.domain(domain_id) == domain));

        self.nodes = KeyedVec::default();
        self.open_nodes = OpenNodes::new(
            direction_of(self.objective.as_ref()),
            self.tolerance,
            match self.options.traverse_strategy {
                TraverseStrategy::Auto => self.objective.is_some(),
                TraverseStrategy::Bfs => true,
                TraverseStrategy::Dfs | TraverseStrategy::Dbfs => false,
            },
        );
        self.active_path.clear();
        self.incumbent = Incumbent::new(
            self.objective.as_ref().map(Objective::direction),
            self.tolerance,
            collection_of(&self.options),
        );
        self.status = SolveStatus::Unknown;
        self.statistics = SearchStatistics::default();
        if self.options.keep_logs {
            self.search_log = Some(SearchLog::default());
        }
        self.started = Instant::now();
    }

    fn search(&mut self, termination: &mut impl TerminationCondition) -> SolveStatus {
        let mut time_budget = self.options.time_limit.map(TimeBudget::starting_now);
        let mut node_budget = self.options.max_bt_steps.map(NodeBudget::new);

        if let Some(status) = self.initialise_root() {
            return status;
        }

        loop {
            if time_budget.should_stop() {
                return SolveStatus::TimeLimit;
            }
            if node_budget.should_stop() {
                return SolveStatus::NodeLimit;
            }
            if termination.should_stop() {
                return SolveStatus::Interrupted;
            }
            if self.solution_limit_reached() && !self.open_nodes.is_empty() {
                return SolveStatus::Feasible;
            }

            let Some(node_id) = self.open_nodes.pop() else {
                return if self.incumbent.best().is_some() {
                    SolveStatus::Optimal
                } else {
                    SolveStatus::Infeasible
                };
            };

            if self.cannot_improve(self.nodes[node_id].bound) {
                self.statistics.pruned_nodes += 1;
                self.close(node_id, NodeStatus::Pruned, Vec::new());
                continue;
            }

            node_budget.node_has_been_expanded();
            termination.node_has_been_expanded();
            self.statistics.nodes_expanded += 1;
            self.nodes[node_id].step = Some(self.statistics.nodes_expanded);
            trace!(
                "Expanding {node_id} at depth {} with bound {}",
                self.nodes[node_id].depth,
                self.nodes[node_id].bound
            );

            if self.restore(node_id).is_err() {
                self.statistics.infeasible_nodes += 1;
                self.close(node_id, NodeStatus::Infeasible, Vec::new());
                continue;
            }

            let removed = if self.search_log.is_some() {
                self.removed_values(self.nodes[node_id].depth)
            } else {
                Vec::new()
            };

            if self.domains.all_fixed() {
                self.record_solution();
                self.close(node_id, NodeStatus::Solved, removed);

                if self.objective.is_none() && !self.options.all_solutions {
                    return SolveStatus::Optimal;
                }
                continue;
            }

            self.close(node_id, NodeStatus::Branched, removed);
            self.branch(node_id);
        }
    }

    /// Propagates the root; returns the final status if the search ends there.
    fn initialise_root(&mut self) -> Option<SolveStatus> {
        let root = self.nodes.push(Node::root(0.0));
        self.nodes[root].trail_position = Some(self.domains.trail_position());
        self.active_path.push(root);
        self.statistics.nodes_created += 1;

        self.propagation_engine.enqueue_all(&self.constraints);
        if self
            .propagation_engine
            .propagate(&self.constraints, &mut self.domains)
            .is_err()
        {
            self.statistics.infeasible_nodes += 1;
            self.close(root, NodeStatus::Infeasible, Vec::new());
            return Some(SolveStatus::Infeasible);
        }

        let bound = self.bound_estimator.estimate(&self.domains);
        self.nodes[root].bound = bound;

        if !self.options.backtrack {
            let removed = self.removed_values(0);
            if self.domains.all_fixed() {
                self.record_solution();
                self.close(root, NodeStatus::Solved, removed);
                return Some(SolveStatus::Optimal);
            }
            self.close(root, NodeStatus::Open, removed);
            return Some(SolveStatus::Unknown);
        }

        self.open_nodes.push(root, bound, 0);
        None
    }

    /// Evaluates both children of the node whose state the domains currently hold and pushes the
    /// ones which can still lead to an improving solution.
    fn branch(&mut self, node_id: NodeId) {
        let Some(decisions) = self.brancher.branch(&self.domains) else {
            return;
        };
        let direction = direction_of(self.objective.as_ref());
        let parent_bound = self.nodes[node_id].bound;
        let depth = self.nodes[node_id].depth + 1;

        let mut children = Vec::with_capacity(decisions.len());
        for decision in decisions {
            let child = Node::child(node_id, &self.nodes[node_id], decision);
            let child_id = self.nodes.push(child);
            self.statistics.nodes_created += 1;

            match self.evaluate_child(decision) {
                Ok(estimate) => {
                    let bound = direction.worst(parent_bound, estimate);
                    self.nodes[child_id].bound = bound;

                    if self.cannot_improve(bound) {
                        self.statistics.pruned_nodes += 1;
                        self.close(child_id, NodeStatus::Pruned, Vec::new());
                    } else {
                        children.push((child_id, bound));
                    }
                }
                Err(_) => {
                    self.statistics.infeasible_nodes += 1;
                    self.close(child_id, NodeStatus::Infeasible, Vec::new());
                }
            }
        }

        if self.options.backtrack_sorting {
            children.sort_by(|(_, a), (_, b)| direction.compare(*b, *a));
        }
        if !children.is_empty() {
            self.statistics.peak_depth = self.statistics.peak_depth.max(depth);
        }
        self.open_nodes.push_children(&children, depth);
    }

    /// Applies the decision on top of the current state, propagates and estimates the bound;
    /// the domains are rolled back afterwards.
    fn evaluate_child(&mut self, decision: BranchDecision) -> Result<f64, Inconsistency> {
        let checkpoint = self.domains.get_checkpoint();
        self.domains.new_checkpoint();

        let result = self
            .apply_and_propagate(decision)
            .map(|_| self.bound_estimator.estimate(&self.domains));

        self.domains.synchronise(checkpoint);
        result
    }

    fn apply_and_propagate(&mut self, decision: BranchDecision) -> PropagationResult {
        if decision.apply(&mut self.domains)? {
            self.propagation_engine
                .notify_narrowed(decision.domain_id);
        }
        self.propagation_engine
            .propagate(&self.constraints, &mut self.domains)
    }

    /// Brings the domains into the state of `node_id`.
    fn restore(&mut self, node_id: NodeId) -> PropagationResult {
        let path = self.path_to(node_id);
        let num_shared = self
            .active_path
            .iter()
            .zip(&path)
            .take_while(|(active, next)| active == next)
            .count();
        bramble_assert_simple!(num_shared >= 1, "every path starts at the root");

        for &inactive in &self.active_path[num_shared..] {
            self.nodes[inactive].trail_position = None;
        }
        self.active_path.truncate(num_shared);
        self.domains.synchronise(num_shared - 1);

        for &next in &path[num_shared..] {
            self.domains.new_checkpoint();
            self.nodes[next].trail_position = Some(self.domains.trail_position());
            self.active_path.push(next);

            let Some(decision) = self.nodes[next].decision else {
                continue;
            };
            if let Err(inconsistency) = self.apply_and_propagate(decision) {
                let _ = self.active_path.pop();
                self.nodes[next].trail_position = None;
                self.domains.synchronise(self.active_path.len() - 1);
                return Err(inconsistency);
            }
        }

        bramble_assert_simple!(self.domains.get_checkpoint() + 1 == self.active_path.len());
        bramble_assert_moderate!(self
            .active_path
            .iter()
            .all(|&active| self.nodes[active].trail_position.is_some()));
        Ok(())
    }

    /// The nodes from the root down to `node_id`.
    fn path_to(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut path = vec![node_id];
        let mut current = node_id;
        while let Some(parent) = self.nodes[current].parent {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// The values removed while `checkpoint` was the current checkpoint, per variable.
    fn removed_values(&self, checkpoint: usize) -> Vec<(DomainId, Vec<i32>)> {
        let mut seen: HashSet<_> = HashSet::default();
        let mut removed = self
            .domains
            .entries_at_checkpoint(checkpoint)
            .iter()
            .filter(|entry| seen.insert(entry.domain_id))
            .map(|entry| {
                let current = self.domains.domain(entry.domain_id);
                let values = entry
                    .previous
                    .values()
                    .filter(|&value| !current.contains(value))
                    .collect();
                (entry.domain_id, values)
            })
            .collect::<Vec<_>>();
        removed.sort_by_key(|(domain_id, _)| *domain_id);
        removed
    }

    /// Whether a node with the given bound can no longer lead to a solution worth keeping.
    fn cannot_improve(&self, bound: f64) -> bool {
        let Some(objective) = &self.objective else {
            return false;
        };
        if self.options.all_solutions {
            return false;
        }
        let Some(incumbent) = self.incumbent.value() else {
            return false;
        };

        if self.options.all_optimal_solutions {
            self.tolerance
                .improves(objective.direction(), incumbent, bound)
        } else {
            !self
                .tolerance
                .improves(objective.direction(), bound, incumbent)
        }
    }

    fn solution_limit_reached(&self) -> bool {
        self.options
            .solution_limit
            .is_some_and(|limit| self.incumbent.num_solutions() >= limit)
    }

    /// Records the assignment of the current, fully fixed, domains.
    fn record_solution(&mut self) {
        bramble_assert_simple!(self.domains.all_fixed());

        let values = self
            .domains
            .domain_ids()
            .map(|domain_id| self.domains.lower_bound(domain_id))
            .collect::<KeyedVec<DomainId, i32>>();
        let solution = Solution::new(values, None);
        let objective_value = self.objective.as_ref().map(|objective| {
            let value = objective.evaluate(&solution);
            if self.options.solution_type == SolutionType::Integer && objective.is_integral() {
                value.round()
            } else {
                value
            }
        });
        let solution = solution.with_objective_value(objective_value);

        bramble_assert_simple!(
            self.constraints
                .iter()
                .all(|constraint| constraint.is_satisfied(&solution)),
            "a fully fixed fixpoint satisfies every constraint"
        );

        self.statistics.solutions += 1;
        let is_first = self.incumbent.best().is_none();
        if self.incumbent.record(solution) {
            debug!(
                "New incumbent with objective value {:?} after {} expanded nodes",
                objective_value, self.statistics.nodes_expanded
            );
        }

        if is_first
            && self.options.traverse_strategy == TraverseStrategy::Dbfs
            && !self.open_nodes.is_best_first()
        {
            debug!("First solution found, switching to best-first search");
            self.open_nodes.switch_to_best_first();
        }
    }

    fn close(&mut self, node_id: NodeId, status: NodeStatus, removed: Vec<(DomainId, Vec<i32>)>) {
        bramble_assert_simple!(
            self.nodes[node_id].status == NodeStatus::Open,
            "a node is closed once"
        );
        self.nodes[node_id].status = status;
        trace!("Closed {node_id} as {status}");

        if let Some(search_log) = self.search_log.as_mut() {
            let node = &self.nodes[node_id];
            search_log.record(SearchLogEntry {
                node_id,
                parent: node.parent,
                depth: node.depth,
                decision: node.decision,
                status,
                bound: node.bound,
                step: node.step,
                timestamp: self.started.elapsed(),
                removed,
            });
        }
    }
}

fn direction_of(objective: Option<&Objective>) -> OptimisationDirection {
    objective
        .map(Objective::direction)
        .unwrap_or(OptimisationDirection::Minimise)
}

fn collection_of(options: &SolverOptions) -> Collection {
    if options.all_solutions {
        Collection::All
    } else if options.all_optimal_solutions {
        Collection::AllOptimal
    } else {
        Collection::Improving
    }
}
