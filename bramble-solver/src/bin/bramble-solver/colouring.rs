//! Graph colouring instances in the DIMACS format.
//!
//! The instance consists of comment lines (`c ...`), one problem line `p edge <nodes> <edges>` and
//! one line `e <u> <v>` per edge, with nodes numbered from 1.
use bramble_solver::constraints;
use bramble_solver::model::Model;
use bramble_solver::model::Objective;
use bramble_solver::variables::DomainId;
use bramble_solver::ProblemSolution;
use bramble_solver::Solution;
use fnv::FnvHashSet;
use log::warn;

use crate::result::BrambleError;
use crate::result::BrambleResult;

#[derive(Debug)]
pub(crate) struct Graph {
    num_nodes: usize,
    /// The edges with the smaller endpoint first, zero-based.
    edges: Vec<(usize, usize)>,
}

impl Graph {
    pub(crate) fn parse(source: &str) -> BrambleResult<Graph> {
        let mut num_nodes = None;
        let mut declared_edges = 0;
        let mut seen = FnvHashSet::default();
        let mut edges = Vec::new();

        for (index, line) in source.lines().enumerate() {
            let line_number = index + 1;
            let mut tokens = line.split_whitespace();

            match tokens.next() {
                None | Some("c") => {}
                Some("p") => {
                    if num_nodes.is_some() {
                        return Err(BrambleError::parse(line_number, "repeated problem line"));
                    }
                    if tokens.next() != Some("edge") {
                        return Err(BrambleError::parse(
                            line_number,
                            "expected a problem line of the form 'p edge <nodes> <edges>'",
                        ));
                    }
                    num_nodes = Some(parse_number(tokens.next(), line_number)?);
                    declared_edges = parse_number(tokens.next(), line_number)?;
                }
                Some("e") => {
                    let Some(n) = num_nodes else {
                        return Err(BrambleError::parse(
                            line_number,
                            "edge before the problem line",
                        ));
                    };
                    let u = parse_node(tokens.next(), n, line_number)?;
                    let v = parse_node(tokens.next(), n, line_number)?;
                    if u == v {
                        return Err(BrambleError::parse(
                            line_number,
                            format!("node {} has an edge to itself", u + 1),
                        ));
                    }

                    let edge = (u.min(v), u.max(v));
                    if seen.insert(edge) {
                        edges.push(edge);
                    }
                }
                Some(other) => {
                    return Err(BrambleError::parse(
                        line_number,
                        format!("unknown line type '{other}'"),
                    ))
                }
            }
        }

        let Some(num_nodes) = num_nodes else {
            return Err(BrambleError::parse(
                source.lines().count().max(1),
                "missing problem line",
            ));
        };
        if declared_edges != edges.len() {
            warn!(
                "The problem line declares {declared_edges} edges but {} distinct edges were found",
                edges.len()
            );
        }

        Ok(Graph { num_nodes, edges })
    }

    pub(crate) fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub(crate) fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Creates a colour per node and a variable for the largest colour, which is minimised.
    ///
    /// Colours range over `[1, max_colours]`, where `max_colours` defaults to the number of nodes.
    pub(crate) fn model(&self, max_colours: Option<i32>) -> (Model, Vec<DomainId>, DomainId) {
        let max_colours = max_colours.unwrap_or(self.num_nodes as i32).max(1);
        let mut model = Model::default();

        let colours = (0..self.num_nodes)
            .map(|node| model.new_named_bounded_integer(1, max_colours, format!("colour_{}", node + 1)))
            .collect::<Vec<_>>();
        let max_colour = model.new_named_bounded_integer(1, max_colours, "max_colour");

        for &(u, v) in &self.edges {
            let _ = model.add_constraint(constraints::not_equals(colours[u], colours[v]));
        }
        for &colour in &colours {
            let _ = model.add_constraint(constraints::greater_than_or_equals(max_colour, colour));
        }
        model.set_objective(Objective::minimise([(max_colour, 1.0)]));

        (model, colours, max_colour)
    }
}

fn parse_number(token: Option<&str>, line_number: usize) -> BrambleResult<usize> {
    let token = token.ok_or_else(|| BrambleError::parse(line_number, "missing number"))?;
    token
        .parse()
        .map_err(|_| BrambleError::parse(line_number, format!("'{token}' is not a number")))
}

fn parse_node(token: Option<&str>, num_nodes: usize, line_number: usize) -> BrambleResult<usize> {
    let node = parse_number(token, line_number)?;
    if node == 0 || node > num_nodes {
        return Err(BrambleError::parse(
            line_number,
            format!("node {node} is outside [1, {num_nodes}]"),
        ));
    }
    Ok(node - 1)
}

/// Renders the colour of every node followed by the number of colours.
pub(crate) fn format_colouring(
    solution: &Solution,
    colours: &[DomainId],
    max_colour: DomainId,
) -> String {
    let mut lines = colours
        .iter()
        .enumerate()
        .map(|(node, &colour)| format!("node {}: {}", node + 1, solution.get_integer_value(colour)))
        .collect::<Vec<_>>();
    lines.push(format!("colours: {}", solution.get_integer_value(max_colour)));
    lines.join("\n")
}
