//! # Bramble
//! Bramble is a finite-domain constraint solver. Integer variables with bounded domains are pruned
//! by constraint propagation, and a branch-and-bound search over the remaining values proves
//! infeasibility or finds a (provably optimal) solution.
//!
//! The solver supports a small set of constraints:
//! * [Equality][crate::constraints::equals] and [disequality][crate::constraints::not_equals] of
//!   two variables.
//! * [Ordering][crate::constraints::less_than_or_equals] of two variables.
//! * [Linear (in)equalities][crate::constraints::linear] with integer coefficients.
//! * [All different][crate::constraints::all_different].
//!
//! # Using Bramble
//! A problem is described by a [`Model`](crate::model::Model): first the **variables** are
//! created, then the **constraints** over them are added.
//! ```rust
//! # use bramble_solver::constraints;
//! # use bramble_solver::constraints::LinearRelation;
//! # use bramble_solver::model::Model;
//! let mut model = Model::default();
//!
//! let x = model.new_named_bounded_integer(1, 9, "x");
//! let y = model.new_bounded_integer(1, 5);
//! let z = model.new_sparse_integer([2, 4, 8]);
//!
//! let _ = model.add_constraint(constraints::linear(
//!     vec![1, 1, -1],
//!     vec![x, y, z],
//!     LinearRelation::Equal,
//!     6,
//! ));
//! let _ = model.add_constraint(constraints::all_different(vec![x, y, z]));
//! ```
//!
//! An optional linear **objective** turns the model into an optimisation problem. The
//! [`Solver`] takes the model together with [`SolverOptions`](crate::options::SolverOptions) and
//! searches until the tree is exhausted or one of the limits is reached.
//! ```rust
//! # use bramble_solver::constraints;
//! # use bramble_solver::constraints::LinearRelation;
//! # use bramble_solver::bounding::SimplexRelaxation;
//! # use bramble_solver::model::Model;
//! # use bramble_solver::model::Objective;
//! # use bramble_solver::options::SolverOptions;
//! # use bramble_solver::results::SolveStatus;
//! # use bramble_solver::termination::Indefinite;
//! # use bramble_solver::Solver;
//! let mut model = Model::default();
//! let variables = (0..10)
//!     .map(|_| model.new_bounded_integer(0, 15))
//!     .collect::<Vec<_>>();
//!
//! let _ = model.add_constraint(constraints::linear(
//!     vec![1; 10],
//!     variables.clone(),
//!     LinearRelation::LessOrEqual,
//!     15,
//! ));
//! model.set_objective(Objective::maximise(variables.iter().map(|&x| (x, 1.0))));
//!
//! let mut solver = Solver::new(
//!     model,
//!     SolverOptions {
//!         lp_optimizer: Some(Box::new(SimplexRelaxation::default())),
//!         ..Default::default()
//!     },
//! )
//! .expect("the model is valid");
//!
//! let result = solver.solve(&mut Indefinite);
//! assert_eq!(result.status, SolveStatus::Optimal);
//! assert_eq!(result.best_bound, Some(15.0));
//! ```
//!
//! After the search, the [`Solver`] can be queried for its statistics and, when
//! [`keep_logs`](crate::options::SolverOptions::keep_logs) is enabled, for the
//! [`SearchLog`](crate::search::SearchLog) of the explored tree.
//!
//! ## Feature Flags
//! - `debug-checks`: Enable expensive assertions in the solver. This slows down the solver
//!   considerably, so it is turned off by default.
pub use bramble_core as core;
pub use bramble_core::*;
