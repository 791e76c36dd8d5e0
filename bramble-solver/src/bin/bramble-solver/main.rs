mod colouring;
mod os_signal_termination;
mod result;
mod sudoku;

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use bramble_solver::bounding::SimplexRelaxation;
use bramble_solver::core::convert_case::Case;
use bramble_solver::model::Model;
use bramble_solver::options::BranchSplit;
use bramble_solver::options::SolutionType;
use bramble_solver::options::SolverOptions;
use bramble_solver::options::TraverseStrategy;
use bramble_solver::options::VariableSelection;
use bramble_solver::results::SolveResult;
use bramble_solver::statistics::configure_statistic_logging;
use bramble_solver::Solution;
use bramble_solver::Solver;
use clap::Parser;
use colouring::Graph;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use result::BrambleError;
use result::BrambleResult;
use sudoku::Sudoku;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The instance to solve. The file should have one of the following extensions:
    ///  - '*.sudoku' for Sudoku puzzles: 81 cells in row-major order, '0' or '.' for an empty
    ///    cell, whitespace is ignored.
    ///  - '*.col' for graph colouring instances, given in the DIMACS format.
    #[clap(verbatim_doc_comment)]
    instance_path: PathBuf,

    /// The time budget for the search in milliseconds.
    ///
    /// When the budget runs out, the best solution found so far is reported.
    ///
    /// Possible values: u64
    #[arg(long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// The order in which the open nodes of the search tree are expanded.
    ///
    /// 'auto' uses depth-first search for satisfaction problems and best-first search for
    /// optimisation problems.
    #[arg(long, value_enum, default_value_t)]
    traverse_strategy: TraverseStrategy,

    /// How the domain of the branching variable is split into two children.
    #[arg(long, value_enum, default_value_t)]
    branch_split: BranchSplit,

    /// Which variable is branched on.
    #[arg(long, value_enum, default_value_t)]
    variable_selection: VariableSelection,

    /// Instructs the solver to report all solutions instead of only the best one.
    ///
    /// Possible values: bool
    #[arg(short = 'a', long = "all-solutions", verbatim_doc_comment)]
    all_solutions: bool,

    /// Instructs the solver to report every solution with the optimal objective value.
    ///
    /// Possible values: bool
    #[arg(long = "all-optimal-solutions", verbatim_doc_comment)]
    all_optimal_solutions: bool,

    /// Only propagate the root node; the remaining domains are reported.
    ///
    /// Possible values: bool
    #[arg(long = "no-backtrack", verbatim_doc_comment)]
    no_backtrack: bool,

    /// The maximum number of node expansions.
    ///
    /// Possible values: u64
    #[arg(long = "max-bt-steps", verbatim_doc_comment)]
    max_bt_steps: Option<u64>,

    /// Push the children of a node in creation order rather than best bound first.
    ///
    /// Possible values: bool
    #[arg(long = "no-backtrack-sorting", verbatim_doc_comment)]
    no_backtrack_sorting: bool,

    /// Stop after this many solutions have been recorded.
    ///
    /// Possible values: usize
    #[arg(long = "solution-limit", verbatim_doc_comment)]
    solution_limit: Option<usize>,

    /// Disables the linear relaxation, node bounds are then derived from the domains alone.
    ///
    /// Possible values: bool
    #[arg(long = "no-relaxation", verbatim_doc_comment)]
    no_relaxation: bool,

    /// The numeric representation of bounds and objective values.
    #[arg(long, value_enum, default_value_t)]
    solution_type: SolutionType,

    /// The relative tolerance used when comparing bounds and objective values.
    ///
    /// Possible values: f64
    #[arg(long, default_value_t = 1e-6, verbatim_doc_comment)]
    rtol: f64,

    /// The absolute tolerance used when comparing bounds and objective values.
    ///
    /// Possible values: f64
    #[arg(long, default_value_t = 1e-6, verbatim_doc_comment)]
    atol: f64,

    /// The output path for the search tree; the explored nodes are written as an indented tree.
    #[arg(long = "search-log", verbatim_doc_comment)]
    search_log: Option<PathBuf>,

    /// The largest colour which may be used when solving a graph colouring instance.
    ///
    /// Defaults to the number of nodes of the graph.
    ///
    /// Possible values: i32
    #[arg(long = "max-colours", verbatim_doc_comment)]
    max_colours: Option<i32>,

    /// Enables log message output from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,
}

impl Args {
    fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            time_limit: self.time_limit.map(Duration::from_millis),
            rtol: self.rtol,
            atol: self.atol,
            lp_optimizer: if self.no_relaxation {
                None
            } else {
                Some(Box::new(SimplexRelaxation::default()))
            },
            traverse_strategy: self.traverse_strategy,
            branch_split: self.branch_split,
            variable_selection: self.variable_selection,
            all_solutions: self.all_solutions,
            all_optimal_solutions: self.all_optimal_solutions,
            backtrack: !self.no_backtrack,
            max_bt_steps: self.max_bt_steps,
            backtrack_sorting: !self.no_backtrack_sorting,
            keep_logs: self.search_log.is_some(),
            solution_type: self.solution_type,
            solution_limit: self.solution_limit,
        }
    }

    fn reports_every_solution(&self) -> bool {
        self.all_solutions || self.all_optimal_solutions
    }
}

#[derive(Clone, Copy, Debug)]
enum FileFormat {
    Sudoku,
    Colouring,
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging(
            "%%%bramble-stat:",
            Some("%%%bramble-stat-end"),
            Some(Case::Camel),
            None,
        );
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> BrambleResult<()> {
    let args = Args::parse();

    let file_format = match args.instance_path.extension().and_then(|ext| ext.to_str()) {
        Some("sudoku") => FileFormat::Sudoku,
        Some("col") => FileFormat::Colouring,
        _ => {
            configure_logging(false, false)?;
            return Err(BrambleError::invalid_instance(args.instance_path.display()));
        }
    };

    configure_logging(args.verbose, args.log_statistics)?;

    if bramble_solver::core::asserts::BRAMBLE_ASSERT_LEVEL_DEFINITION
        >= bramble_solver::core::asserts::BRAMBLE_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the Bramble assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            bramble_solver::core::asserts::BRAMBLE_ASSERT_LEVEL_DEFINITION
        );
    };

    let source = std::fs::read_to_string(&args.instance_path)?;

    match file_format {
        FileFormat::Sudoku => {
            let sudoku = Sudoku::parse(&source)?;
            info!("Read a Sudoku with {} given cells", sudoku.num_givens());

            let (model, cells) = sudoku.model();
            solve_and_report(model, &args, |solution| {
                sudoku::format_grid(solution, &cells)
            })
        }
        FileFormat::Colouring => {
            let graph = Graph::parse(&source)?;
            info!(
                "Read a graph with {} nodes and {} edges",
                graph.num_nodes(),
                graph.num_edges()
            );

            let (model, colours, max_colour) = graph.model(args.max_colours);
            solve_and_report(model, &args, |solution| {
                colouring::format_colouring(solution, &colours, max_colour)
            })
        }
    }
}

fn solve_and_report(
    model: Model,
    args: &Args,
    format_solution: impl Fn(&Solution) -> String,
) -> BrambleResult<()> {
    let mut solver = Solver::new(model, args.solver_options())?;
    let mut termination = OsSignal::install()?;

    let result = solver.solve(&mut termination);
    print_result(&result, args.reports_every_solution(), format_solution);

    if let Some(path) = args.search_log.as_ref() {
        write_search_log(&solver, path)?;
    }

    Ok(())
}

fn print_result(
    result: &SolveResult,
    every_solution: bool,
    format_solution: impl Fn(&Solution) -> String,
) {
    println!("status: {}", result.status);

    if every_solution {
        println!("solutions: {}", result.solutions.len());
        for solution in &result.solutions {
            println!("----------");
            print_solution(solution, &format_solution);
        }
    } else if let Some(incumbent) = result.incumbent.as_ref() {
        print_solution(incumbent, &format_solution);
    }

    if let Some(best_bound) = result.best_bound {
        println!("best bound: {best_bound}");
    }
}

fn print_solution(solution: &Solution, format_solution: &impl Fn(&Solution) -> String) {
    if let Some(objective_value) = solution.objective_value() {
        println!("objective: {objective_value}");
    }
    println!("{}", format_solution(solution));
}

fn write_search_log(solver: &Solver, path: &Path) -> BrambleResult<()> {
    let Some(search_log) = solver.search_log() else {
        return Ok(());
    };

    let document = search_log.export(solver.variable_names());
    std::fs::write(path, document.to_string())?;
    info!(
        "Wrote {} nodes of the search tree to {}",
        document.num_nodes(),
        path.display()
    );
    Ok(())
}
