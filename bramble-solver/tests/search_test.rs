#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use bramble_solver::bounding::SimplexRelaxation;
use bramble_solver::constraints;
use bramble_solver::constraints::LinearRelation;
use bramble_solver::model::Model;
use bramble_solver::model::Objective;
use bramble_solver::options::BranchSplit;
use bramble_solver::options::SolutionType;
use bramble_solver::options::SolverOptions;
use bramble_solver::options::TraverseStrategy;
use bramble_solver::options::VariableSelection;
use bramble_solver::results::SolveStatus;
use bramble_solver::search::NodeStatus;
use bramble_solver::termination::Indefinite;
use bramble_solver::termination::TerminationCondition;
use bramble_solver::variables::DomainId;
use bramble_solver::ProblemSolution;
use bramble_solver::Solver;

/// Maximise `5a + 4b + 3c` subject to `2a + 3b + c <= 5`, `4a + b + 2c <= 11` and
/// `3a + 4b + 2c <= 8` with every variable in `[0, 3]`; the optimum is 13 at `(2, 0, 1)`.
fn production_model() -> (Model, [DomainId; 3]) {
    let mut model = Model::default();
    let a = model.new_named_bounded_integer(0, 3, "a");
    let b = model.new_named_bounded_integer(0, 3, "b");
    let c = model.new_named_bounded_integer(0, 3, "c");

    for (coefficients, rhs) in [(vec![2, 3, 1], 5), (vec![4, 1, 2], 11), (vec![3, 4, 2], 8)] {
        let _ = model.add_constraint(constraints::linear(
            coefficients,
            vec![a, b, c],
            LinearRelation::LessOrEqual,
            rhs,
        ));
    }
    model.set_objective(Objective::maximise([(a, 5.0), (b, 4.0), (c, 3.0)]));

    (model, [a, b, c])
}

#[derive(Debug)]
struct StopAfter {
    remaining: u64,
}

impl TerminationCondition for StopAfter {
    fn should_stop(&mut self) -> bool {
        self.remaining == 0
    }

    fn node_has_been_expanded(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[test]
fn traversal_strategies_agree_on_the_optimum() {
    for traverse_strategy in [
        TraverseStrategy::Auto,
        TraverseStrategy::Bfs,
        TraverseStrategy::Dfs,
        TraverseStrategy::Dbfs,
    ] {
        for with_relaxation in [false, true] {
            for backtrack_sorting in [false, true] {
                let (model, [a, b, c]) = production_model();
                let mut solver = Solver::new(
                    model,
                    SolverOptions {
                        traverse_strategy,
                        backtrack_sorting,
                        lp_optimizer: if with_relaxation {
                            Some(Box::new(SimplexRelaxation::default()))
                        } else {
                            None
                        },
                        ..Default::default()
                    },
                )
                .expect("valid model");

                let result = solver.solve(&mut Indefinite);

                let description = format!("{traverse_strategy:?} {with_relaxation} {backtrack_sorting}");
                assert_eq!(SolveStatus::Optimal, result.status, "{description}");
                assert_eq!(Some(13.0), result.best_bound, "{description}");
                let solution = result.incumbent.expect("the model is feasible");
                assert_eq!(
                    [2, 0, 1],
                    [a, b, c].map(|x| solution.get_integer_value(x)),
                    "{description}"
                );
            }
        }
    }
}

#[test]
fn branching_options_agree_on_the_optimum() {
    for branch_split in [BranchSplit::Smallest, BranchSplit::Biggest, BranchSplit::InHalf] {
        for variable_selection in [VariableSelection::MostConstrained, VariableSelection::InputOrder]
        {
            let (model, _) = production_model();
            let mut solver = Solver::new(
                model,
                SolverOptions {
                    branch_split,
                    variable_selection,
                    ..Default::default()
                },
            )
            .expect("valid model");

            let result = solver.solve(&mut Indefinite);

            assert_eq!(Some(13.0), result.best_bound, "{branch_split:?} {variable_selection:?}");
        }
    }
}

#[test]
fn pigeonhole_is_proven_infeasible_by_search() {
    // Pairwise disequalities only propagate on fixed variables, so the conflict needs search.
    let mut model = Model::default();
    let pigeons = (0..4)
        .map(|_| model.new_bounded_integer(1, 3))
        .collect::<Vec<_>>();
    for (i, &a) in pigeons.iter().enumerate() {
        for &b in &pigeons[i + 1..] {
            let _ = model.add_constraint(constraints::not_equals(a, b));
        }
    }

    let mut solver = Solver::new(model, SolverOptions::default()).expect("valid model");
    let result = solver.solve(&mut Indefinite);

    assert_eq!(SolveStatus::Infeasible, result.status);
    assert!(result.incumbent.is_none());
    assert!(solver.statistics().nodes_expanded > 1);
    assert_eq!(0, solver.num_open_nodes());
}

#[test]
fn node_limit_is_reported_with_the_incumbent_so_far() {
    let mut model = Model::default();
    let variables = (0..12)
        .map(|_| model.new_bounded_integer(0, 9))
        .collect::<Vec<_>>();
    let _ = model.add_constraint(constraints::all_different(variables[..10].to_vec()));
    model.set_objective(Objective::minimise(
        variables.iter().enumerate().map(|(i, &x)| (x, (i % 3) as f64 - 1.0)),
    ));

    let mut solver = Solver::new(
        model,
        SolverOptions {
            max_bt_steps: Some(50),
            traverse_strategy: TraverseStrategy::Dfs,
            ..Default::default()
        },
    )
    .expect("valid model");
    let result = solver.solve(&mut Indefinite);

    assert_eq!(SolveStatus::NodeLimit, result.status);
    assert_eq!(50, solver.statistics().nodes_expanded);
}

#[test]
fn external_termination_interrupts_the_search() {
    let (model, _) = production_model();
    let mut solver = Solver::new(
        model,
        SolverOptions {
            traverse_strategy: TraverseStrategy::Dfs,
            ..Default::default()
        },
    )
    .expect("valid model");

    let result = solver.solve(&mut StopAfter { remaining: 2 });

    assert_eq!(SolveStatus::Interrupted, result.status);
    assert!(result.status.is_limit());
    assert_eq!(2, solver.statistics().nodes_expanded);
}

#[test]
fn disabled_backtracking_reports_root_domains() {
    let mut model = Model::default();
    let x = model.new_bounded_integer(0, 10);
    let y = model.new_bounded_integer(3, 6);
    let _ = model.add_constraint(constraints::less_than_or_equals(x, y));
    let _ = model.add_constraint(constraints::not_equals(x, y));

    let mut solver = Solver::new(
        model,
        SolverOptions {
            backtrack: false,
            ..Default::default()
        },
    )
    .expect("valid model");
    let result = solver.solve(&mut Indefinite);

    assert_eq!(SolveStatus::Unknown, result.status);
    assert!(result.incumbent.is_none());
    assert_eq!(6, solver.domain(x).upper_bound());
    assert_eq!(vec![3, 4, 5, 6], solver.values(y).collect::<Vec<_>>());
}

#[test]
fn all_optimal_solutions_of_a_permutation() {
    let mut model = Model::default();
    let tasks = (0..3)
        .map(|_| model.new_bounded_integer(0, 2))
        .collect::<Vec<_>>();
    let _ = model.add_constraint(constraints::all_different(tasks.clone()));
    let total = model.new_bounded_integer(0, 6);
    let _ = model.add_constraint(constraints::linear(
        vec![1, 1, 1, -1],
        vec![tasks[0], tasks[1], tasks[2], total],
        LinearRelation::Equal,
        0,
    ));
    // Every permutation sums to 3, so the optimum fixes the first task to 0.
    model.set_objective(Objective::minimise([(tasks[0], 1.0), (total, 1.0)]));

    let mut solver = Solver::new(
        model,
        SolverOptions {
            all_optimal_solutions: true,
            ..Default::default()
        },
    )
    .expect("valid model");
    let result = solver.solve(&mut Indefinite);

    assert_eq!(SolveStatus::Optimal, result.status);
    assert_eq!(Some(3.0), result.best_bound);
    assert_eq!(2, result.solutions.len());
    assert!(result
        .solutions
        .iter()
        .all(|solution| solution.get_integer_value(tasks[0]) == 0));
}

#[test]
fn solution_limit_stops_enumeration() {
    let mut model = Model::default();
    let variables = (0..4)
        .map(|_| model.new_bounded_integer(1, 4))
        .collect::<Vec<_>>();
    let _ = model.add_constraint(constraints::all_different(variables));

    let mut solver = Solver::new(
        model,
        SolverOptions {
            all_solutions: true,
            solution_limit: Some(5),
            ..Default::default()
        },
    )
    .expect("valid model");
    let result = solver.solve(&mut Indefinite);

    assert_eq!(SolveStatus::Feasible, result.status);
    assert_eq!(5, result.solutions.len());
}

#[test]
fn all_solutions_of_a_permutation() {
    let mut model = Model::default();
    let variables = (0..4)
        .map(|_| model.new_bounded_integer(1, 4))
        .collect::<Vec<_>>();
    let _ = model.add_constraint(constraints::all_different(variables));

    let mut solver = Solver::new(
        model,
        SolverOptions {
            all_solutions: true,
            ..Default::default()
        },
    )
    .expect("valid model");
    let result = solver.solve(&mut Indefinite);

    assert_eq!(SolveStatus::Optimal, result.status);
    assert_eq!(24, result.solutions.len());
}

#[test]
fn integer_solutions_round_the_relaxation_bound() {
    let (model, _) = production_model();
    let mut solver = Solver::new(
        model,
        SolverOptions {
            lp_optimizer: Some(Box::new(SimplexRelaxation::default())),
            solution_type: SolutionType::Integer,
            ..Default::default()
        },
    )
    .expect("valid model");

    let result = solver.solve(&mut Indefinite);

    assert_eq!(Some(13.0), result.best_bound);
    assert!(solver.statistics().relaxation_calls > 0);
}

#[test]
fn search_log_export_uses_variable_names() {
    let (model, _) = production_model();
    let mut solver = Solver::new(
        model,
        SolverOptions {
            keep_logs: true,
            traverse_strategy: TraverseStrategy::Dfs,
            ..Default::default()
        },
    )
    .expect("valid model");
    let _ = solver.solve(&mut Indefinite);

    let search_log = solver.search_log().expect("logs are kept");
    let document = search_log.export(solver.variable_names());

    assert_eq!(1, document.roots.len());
    assert_eq!(search_log.len(), document.num_nodes());
    assert_eq!(NodeStatus::Branched, document.roots[0].status);
    assert!(document.roots[0]
        .children
        .iter()
        .filter_map(|child| child.decision.as_deref())
        .all(|decision| ["a ", "b ", "c "]
            .iter()
            .any(|name| decision.starts_with(name))));

    let rendered = document.to_string();
    assert!(rendered.starts_with("n0 root [branched]"));
    assert_eq!(document.num_nodes(), rendered.lines().count());
    assert_eq!(
        Some(1),
        search_log
            .entries()
            .iter()
            .find(|entry| entry.parent.is_none())
            .and_then(|entry| entry.step)
    );
}
