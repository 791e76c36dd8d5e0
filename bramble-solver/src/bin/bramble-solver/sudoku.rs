//! Sudoku puzzles given as 81 cells in row-major order.
//!
//! A cell is a digit `1..=9`, or `0`/`.` when it is empty; whitespace is ignored.
use bramble_solver::constraints;
use bramble_solver::model::Model;
use bramble_solver::variables::DomainId;
use bramble_solver::ProblemSolution;
use bramble_solver::Solution;

use crate::result::BrambleError;
use crate::result::BrambleResult;

const SIZE: usize = 9;
const BOX_SIZE: usize = 3;

#[derive(Debug)]
pub(crate) struct Sudoku {
    /// The given digits in row-major order.
    cells: Vec<Option<i32>>,
}

impl Sudoku {
    pub(crate) fn parse(source: &str) -> BrambleResult<Sudoku> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        let mut last_line = 1;

        for (index, line) in source.lines().enumerate() {
            let line_number = index + 1;
            last_line = line_number;

            for character in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = match character {
                    '0' | '.' => None,
                    '1'..='9' => character.to_digit(10).map(|digit| digit as i32),
                    other => {
                        return Err(BrambleError::parse(
                            line_number,
                            format!("unexpected character '{other}'"),
                        ))
                    }
                };

                if cells.len() == SIZE * SIZE {
                    return Err(BrambleError::parse(
                        line_number,
                        format!("more than {} cells", SIZE * SIZE),
                    ));
                }
                cells.push(cell);
            }
        }

        if cells.len() != SIZE * SIZE {
            return Err(BrambleError::parse(
                last_line,
                format!("expected {} cells, found {}", SIZE * SIZE, cells.len()),
            ));
        }

        Ok(Sudoku { cells })
    }

    pub(crate) fn num_givens(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Creates one variable per cell, in row-major order, with an all-different constraint for
    /// every row, column and box.
    pub(crate) fn model(&self) -> (Model, Vec<DomainId>) {
        let mut model = Model::default();

        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(index, given)| {
                let name = format!("cell_{}_{}", index / SIZE + 1, index % SIZE + 1);
                match *given {
                    Some(digit) => model.new_named_bounded_integer(digit, digit, name),
                    None => model.new_named_bounded_integer(1, SIZE as i32, name),
                }
            })
            .collect::<Vec<_>>();

        for row in 0..SIZE {
            let _ = model.add_constraint(constraints::all_different(
                (0..SIZE).map(|column| cells[row * SIZE + column]).collect(),
            ));
        }
        for column in 0..SIZE {
            let _ = model.add_constraint(constraints::all_different(
                (0..SIZE).map(|row| cells[row * SIZE + column]).collect(),
            ));
        }
        for box_row in (0..SIZE).step_by(BOX_SIZE) {
            for box_column in (0..SIZE).step_by(BOX_SIZE) {
                let _ = model.add_constraint(constraints::all_different(
                    (0..SIZE * SIZE)
                        .filter(|index| {
                            (box_row..box_row + BOX_SIZE).contains(&(index / SIZE))
                                && (box_column..box_column + BOX_SIZE).contains(&(index % SIZE))
                        })
                        .map(|index| cells[index])
                        .collect(),
                ));
            }
        }

        (model, cells)
    }
}

/// Renders the grid of a solution, one row per line.
pub(crate) fn format_grid(solution: &Solution, cells: &[DomainId]) -> String {
    cells
        .chunks(SIZE)
        .map(|row| {
            row.iter()
                .map(|&cell| solution.get_integer_value(cell).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_and_zeros_are_empty_cells() {
        let source = format!("12.0\n{}", "0".repeat(77));

        let sudoku = Sudoku::parse(&source).expect("valid puzzle");

        assert_eq!(2, sudoku.num_givens());
        assert_eq!(81, sudoku.model().1.len());
    }

    #[test]
    fn unexpected_characters_report_their_line() {
        let source = format!("{}\n00x", "0".repeat(78));

        let error = Sudoku::parse(&source).expect_err("invalid character");

        assert!(matches!(error, BrambleError::Parse { line: 2, .. }));
    }

    #[test]
    fn missing_cells_are_an_error() {
        let error = Sudoku::parse("123").expect_err("too few cells");

        assert!(matches!(error, BrambleError::Parse { line: 1, .. }));
    }
}
