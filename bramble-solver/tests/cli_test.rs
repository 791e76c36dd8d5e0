#![cfg(test)]

mod helpers;

use helpers::instance;
use helpers::run_solver;
use helpers::run_solver_with_options;
use regex::Regex;

const SOLVED_ROWS: [&str; 9] = [
    "6 8 2 1 5 4 3 7 9",
    "9 5 1 7 6 3 8 4 2",
    "3 7 4 8 9 2 1 6 5",
    "4 3 7 5 2 8 9 1 6",
    "8 1 6 9 3 7 2 5 4",
    "2 9 5 4 1 6 7 3 8",
    "5 6 8 2 7 1 4 9 3",
    "7 2 9 3 4 5 6 8 1",
    "1 4 3 6 8 9 5 2 7",
];

macro_rules! colouring_test {
    ($name:ident, $colours:expr) => {
        #[test]
        fn $name() {
            run_colouring_test(stringify!($name), $colours);
        }
    };
}
colouring_test!(countries, 3);
colouring_test!(wheel, 4);

fn run_colouring_test(instance_name: &str, expected_colours: i32) {
    for relaxation in [true, false] {
        let prefix = if relaxation { "lp" } else { "plain" };
        let args = if relaxation {
            vec![]
        } else {
            vec!["--no-relaxation".to_owned()]
        };

        let files = run_solver_with_options(
            instance(&format!("{instance_name}.col")),
            false,
            args,
            Some(prefix),
        );
        assert!(files.exit_status.success(), "{}", files.log());

        let log = files.log();
        assert!(log.contains("status: OPTIMAL"), "{log}");
        assert!(
            log.contains(&format!("colours: {expected_colours}")),
            "{log}"
        );
        assert!(
            log.contains(&format!("best bound: {expected_colours}")),
            "{log}"
        );

        let node_colour = Regex::new(r"^node (\d+): (\d+)$").expect("valid regex");
        let colours = log
            .lines()
            .filter_map(|line| node_colour.captures(line))
            .map(|captures| captures[2].parse::<i32>().expect("colour is an integer"))
            .collect::<Vec<_>>();
        assert!(!colours.is_empty());
        assert!(colours
            .iter()
            .all(|&colour| (1..=expected_colours).contains(&colour)));

        files.cleanup().expect("Failed to clean up the output files.");
    }
}

#[test]
fn sudoku_is_solved() {
    let files = run_solver(instance("tutorial.sudoku"));
    assert!(files.exit_status.success());

    let log = files.log();
    assert!(log.contains("status: OPTIMAL"), "{log}");

    let grid_row = Regex::new(r"^(\d )+\d$").expect("valid regex");
    let rows = log
        .lines()
        .filter(|line| grid_row.is_match(line))
        .collect::<Vec<_>>();
    assert_eq!(SOLVED_ROWS.to_vec(), rows);

    files.cleanup().expect("Failed to clean up the output files.");
}

#[test]
fn sudoku_with_all_solutions_reports_a_single_solution() {
    let files = run_solver_with_options(
        instance("tutorial.sudoku"),
        false,
        ["--all-solutions".to_owned()],
        Some("all"),
    );
    assert!(files.exit_status.success());

    let log = files.log();
    assert!(log.contains("status: OPTIMAL"), "{log}");
    assert!(log.contains("solutions: 1"), "{log}");
    assert_eq!(1, log.lines().filter(|line| *line == "----------").count());

    files.cleanup().expect("Failed to clean up the output files.");
}

#[test]
fn zero_time_limit_reports_the_limit() {
    let files = run_solver_with_options(
        instance("tutorial.sudoku"),
        false,
        ["--time-limit".to_owned(), "0".to_owned()],
        Some("timeout"),
    );
    assert!(files.exit_status.success());
    assert!(files.log().contains("status: TIME_LIMIT"));

    files.cleanup().expect("Failed to clean up the output files.");
}

#[test]
fn search_log_is_written_as_a_tree() {
    let files = run_solver_with_options(
        instance("countries.col"),
        true,
        ["--traverse-strategy".to_owned(), "dfs".to_owned()],
        Some("tree"),
    );
    assert!(files.exit_status.success());

    let tree = std::fs::read_to_string(&files.search_log_file).expect("the search log is written");
    let mut lines = tree.lines();
    let root = lines.next().expect("the tree has a root");
    assert!(root.starts_with("n0 root [branched]"), "{root}");

    let child = Regex::new(r"^(  )+n\d+ \S+ (=|!=|<=|>=) -?\d+ \[(open|infeasible|solved|pruned|branched)\]")
        .expect("valid regex");
    assert!(lines.all(|line| child.is_match(line)), "{tree}");

    files.cleanup().expect("Failed to clean up the output files.");
}

#[test]
fn statistics_are_logged_on_request() {
    let files = run_solver_with_options(
        instance("countries.col"),
        false,
        ["--log-statistics".to_owned()],
        Some("stats"),
    );
    assert!(files.exit_status.success());

    let log = files.log();
    assert!(log.contains("%%%bramble-stat: nodesExpanded="), "{log}");
    assert!(log.contains("%%%bramble-stat-end"), "{log}");

    files.cleanup().expect("Failed to clean up the output files.");
}

#[test]
fn malformed_instance_fails() {
    let files = run_solver(instance("malformed.col"));
    assert!(!files.exit_status.success());
    assert!(files.log().contains("line 3"), "{}", files.log());

    files.cleanup().expect("Failed to clean up the output files.");
}

#[test]
fn unknown_extension_fails() {
    let files = run_solver(instance("countries.txt"));
    assert!(!files.exit_status.success());

    files.cleanup().expect("Failed to clean up the output files.");
}
