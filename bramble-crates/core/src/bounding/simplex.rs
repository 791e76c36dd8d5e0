use crate::bounding::LinearProgram;
use crate::bounding::LinearRelaxation;
use crate::bounding::RelaxationError;
use crate::bounding::RowRelation;
use crate::containers::HashMap;
use crate::engine::variables::DomainId;
use crate::model::OptimisationDirection;

const EPSILON: f64 = 1e-9;
const FEASIBILITY_TOLERANCE: f64 = 1e-7;

/// A dense two-phase primal simplex method using Bland's rule.
///
/// Intended for the small relaxations which arise from models with a handful of linear
/// constraints; every call builds a fresh tableau.
#[derive(Clone, Copy, Debug)]
pub struct SimplexRelaxation {
    max_iterations: usize,
}

impl Default for SimplexRelaxation {
    fn default() -> Self {
        SimplexRelaxation {
            max_iterations: 50_000,
        }
    }
}

impl SimplexRelaxation {
    pub fn new(max_iterations: usize) -> Self {
        SimplexRelaxation { max_iterations }
    }
}

impl LinearRelaxation for SimplexRelaxation {
    fn solve(&mut self, program: &LinearProgram) -> Result<f64, RelaxationError> {
        let mut tableau = Tableau::new(program);
        tableau.solve(self.max_iterations)
    }
}

/// The simplex tableau of a [`LinearProgram`] in which every structural variable is shifted by
/// its lower bound, so that all of them range over `[0, upper - lower]`.
#[derive(Debug)]
struct Tableau {
    /// The constraint rows; the last entry of each row is its right-hand side.
    rows: Vec<Vec<f64>>,
    basis: Vec<usize>,
    is_artificial: Vec<bool>,
    /// The objective coefficient of every structural column, in the original direction.
    objective: Vec<f64>,
    direction: OptimisationDirection,
    /// The objective value when every structural column is zero.
    offset: f64,
    num_iterations: usize,
}

impl Tableau {
    fn new(program: &LinearProgram) -> Tableau {
        let mut columns: HashMap<DomainId, usize> = HashMap::default();
        let mut variables = Vec::new();
        let mut column_of = |domain_id: DomainId| {
            *columns.entry(domain_id).or_insert_with(|| {
                variables.push(domain_id);
                variables.len() - 1
            })
        };

        let objective_terms = program
            .objective()
            .iter()
            .map(|&(domain_id, coefficient)| (column_of(domain_id), coefficient))
            .collect::<Vec<_>>();
        let row_terms = program
            .rows()
            .iter()
            .map(|row| {
                row.terms()
                    .iter()
                    .map(|&(domain_id, coefficient)| (column_of(domain_id), coefficient))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let num_structural = variables.len();
        let lower_bounds = variables
            .iter()
            .map(|&domain_id| program.bounds(domain_id).0)
            .collect::<Vec<_>>();

        let mut objective = vec![0.0; num_structural];
        let mut offset = program.objective_constant();
        for (column, coefficient) in objective_terms {
            objective[column] += coefficient;
            offset += coefficient * lower_bounds[column];
        }

        // Every constraint as dense coefficients over the shifted columns.
        let mut constraints: Vec<(Vec<f64>, RowRelation, f64)> = Vec::new();
        for (row, terms) in program.rows().iter().zip(row_terms) {
            let mut coefficients = vec![0.0; num_structural];
            let mut rhs = row.rhs();
            for (column, coefficient) in terms {
                coefficients[column] += coefficient;
                rhs -= coefficient * lower_bounds[column];
            }
            constraints.push((coefficients, row.relation(), rhs));
        }
        for (column, &domain_id) in variables.iter().enumerate() {
            let (lower, upper) = program.bounds(domain_id);
            let mut coefficients = vec![0.0; num_structural];
            coefficients[column] = 1.0;
            constraints.push((coefficients, RowRelation::LessOrEqual, upper - lower));
        }

        for (coefficients, relation, rhs) in constraints.iter_mut() {
            if *rhs < 0.0 {
                coefficients.iter_mut().for_each(|coefficient| *coefficient = -*coefficient);
                *rhs = -*rhs;
                *relation = match relation {
                    RowRelation::LessOrEqual => RowRelation::GreaterOrEqual,
                    RowRelation::GreaterOrEqual => RowRelation::LessOrEqual,
                    RowRelation::Equal => RowRelation::Equal,
                };
            }
        }

        let num_slack = constraints
            .iter()
            .filter(|(_, relation, _)| *relation != RowRelation::Equal)
            .count();
        let num_artificial = constraints
            .iter()
            .filter(|(_, relation, _)| *relation != RowRelation::LessOrEqual)
            .count();
        let num_columns = num_structural + num_slack + num_artificial;

        let mut rows = Vec::with_capacity(constraints.len());
        let mut basis = Vec::with_capacity(constraints.len());
        let mut is_artificial = vec![false; num_columns];
        let mut next_slack = num_structural;
        let mut next_artificial = num_structural + num_slack;

        for (coefficients, relation, rhs) in constraints {
            let mut row = coefficients;
            row.resize(num_columns + 1, 0.0);
            row[num_columns] = rhs;

            match relation {
                RowRelation::LessOrEqual => {
                    row[next_slack] = 1.0;
                    basis.push(next_slack);
                    next_slack += 1;
                }
                RowRelation::GreaterOrEqual => {
                    row[next_slack] = -1.0;
                    next_slack += 1;
                    row[next_artificial] = 1.0;
                    is_artificial[next_artificial] = true;
                    basis.push(next_artificial);
                    next_artificial += 1;
                }
                RowRelation::Equal => {
                    row[next_artificial] = 1.0;
                    is_artificial[next_artificial] = true;
                    basis.push(next_artificial);
                    next_artificial += 1;
                }
            }

            rows.push(row);
        }

        Tableau {
            rows,
            basis,
            is_artificial,
            objective,
            direction: program.direction(),
            offset,
            num_iterations: 0,
        }
    }

    fn num_columns(&self) -> usize {
        self.is_artificial.len()
    }

    fn solve(&mut self, max_iterations: usize) -> Result<f64, RelaxationError> {
        let num_columns = self.num_columns();

        if self.is_artificial.iter().any(|&artificial| artificial) {
            let cost = self
                .is_artificial
                .iter()
                .map(|&artificial| if artificial { 1.0 } else { 0.0 })
                .collect::<Vec<_>>();
            self.optimise(&cost, &vec![true; num_columns], max_iterations)?;

            let infeasibility: f64 = self
                .rows
                .iter()
                .zip(&self.basis)
                .filter(|&(_, &column)| self.is_artificial[column])
                .map(|(row, _)| row[num_columns])
                .sum();
            if infeasibility > FEASIBILITY_TOLERANCE {
                return Err(RelaxationError::Infeasible);
            }

            self.drive_out_artificials();
        }

        let mut cost = vec![0.0; num_columns];
        for (column, &coefficient) in self.objective.iter().enumerate() {
            cost[column] = match self.direction {
                OptimisationDirection::Minimise => coefficient,
                OptimisationDirection::Maximise => -coefficient,
            };
        }
        let allowed = self
            .is_artificial
            .iter()
            .map(|&artificial| !artificial)
            .collect::<Vec<_>>();
        self.optimise(&cost, &allowed, max_iterations)?;

        let value = self
            .rows
            .iter()
            .zip(&self.basis)
            .filter(|&(_, &column)| column < self.objective.len())
            .map(|(row, &column)| self.objective[column] * row[num_columns])
            .sum::<f64>();

        Ok(self.offset + value)
    }

    /// Minimises `cost` over the current basis, only letting `allowed` columns enter.
    fn optimise(
        &mut self,
        cost: &[f64],
        allowed: &[bool],
        max_iterations: usize,
    ) -> Result<(), RelaxationError> {
        let num_columns = self.num_columns();

        loop {
            let entering = (0..num_columns)
                .filter(|&column| allowed[column])
                .find(|&column| self.reduced_cost(cost, column) < -EPSILON);
            let Some(entering) = entering else {
                return Ok(());
            };

            let leaving = self
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row[entering] > EPSILON)
                .map(|(index, row)| (index, row[num_columns] / row[entering]))
                .min_by(|(a_index, a_ratio), (b_index, b_ratio)| {
                    a_ratio
                        .total_cmp(b_ratio)
                        .then(self.basis[*a_index].cmp(&self.basis[*b_index]))
                })
                .map(|(index, _)| index);
            let Some(leaving) = leaving else {
                return Err(RelaxationError::Unbounded);
            };

            self.pivot(leaving, entering);

            self.num_iterations += 1;
            if self.num_iterations > max_iterations {
                return Err(RelaxationError::IterationLimit(max_iterations));
            }
        }
    }

    fn reduced_cost(&self, cost: &[f64], column: usize) -> f64 {
        cost[column]
            - self
                .rows
                .iter()
                .zip(&self.basis)
                .map(|(row, &basic)| cost[basic] * row[column])
                .sum::<f64>()
    }

    /// Replaces artificial columns which are still basic (at value zero) by structural or slack
    /// columns. Rows in which that is impossible are redundant and keep their artificial.
    fn drive_out_artificials(&mut self) {
        for index in 0..self.rows.len() {
            if !self.is_artificial[self.basis[index]] {
                continue;
            }

            let replacement = (0..self.num_columns()).find(|&column| {
                !self.is_artificial[column] && self.rows[index][column].abs() > EPSILON
            });
            if let Some(column) = replacement {
                self.pivot(index, column);
            }
        }
    }

    fn pivot(&mut self, pivot_row: usize, pivot_column: usize) {
        let pivot = self.rows[pivot_row][pivot_column];
        self.rows[pivot_row]
            .iter_mut()
            .for_each(|value| *value /= pivot);

        let normalised = self.rows[pivot_row].clone();
        for (index, row) in self.rows.iter_mut().enumerate() {
            if index == pivot_row {
                continue;
            }

            let factor = row[pivot_column];
            if factor.abs() > 0.0 {
                row.iter_mut()
                    .zip(&normalised)
                    .for_each(|(value, &pivot_value)| *value -= factor * pivot_value);
            }
        }

        self.basis[pivot_row] = pivot_column;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounding::LinearRow;

    fn ids(count: u32) -> Vec<DomainId> {
        (0..count).map(DomainId::new).collect()
    }

    fn assert_close(expected: f64, actual: Result<f64, RelaxationError>) {
        let actual = actual.expect("relaxation is solved");
        assert!(
            (expected - actual).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn bounded_sum_is_maximised() {
        let x = ids(10);
        let program = LinearProgram::new(
            OptimisationDirection::Maximise,
            x.iter().map(|&domain_id| (domain_id, 1.0)).collect(),
            0.0,
            vec![(0.0, 15.0); 10],
            vec![LinearRow::new(
                x.iter().map(|&domain_id| (domain_id, 1.0)).collect(),
                RowRelation::LessOrEqual,
                15.0,
            )],
        );

        assert_close(15.0, SimplexRelaxation::default().solve(&program));
    }

    #[test]
    fn fractional_optimum() {
        let x = ids(2);
        // max x + y s.t. x + 2y <= 4 with x, y in [0, 3]
        let program = LinearProgram::new(
            OptimisationDirection::Maximise,
            vec![(x[0], 1.0), (x[1], 1.0)],
            0.0,
            vec![(0.0, 3.0), (0.0, 3.0)],
            vec![LinearRow::new(
                vec![(x[0], 1.0), (x[1], 2.0)],
                RowRelation::LessOrEqual,
                4.0,
            )],
        );

        assert_close(3.5, SimplexRelaxation::default().solve(&program));
    }

    #[test]
    fn covering_row_needs_the_first_phase() {
        let x = ids(2);
        // min x + 2y + 1 s.t. x + y >= 2.5 with x in [0, 2], y in [0, 5]
        let program = LinearProgram::new(
            OptimisationDirection::Minimise,
            vec![(x[0], 1.0), (x[1], 2.0)],
            1.0,
            vec![(0.0, 2.0), (0.0, 5.0)],
            vec![LinearRow::new(
                vec![(x[0], 1.0), (x[1], 1.0)],
                RowRelation::GreaterOrEqual,
                2.5,
            )],
        );

        assert_close(4.0, SimplexRelaxation::default().solve(&program));
    }

    #[test]
    fn equality_rows_link_variables() {
        let x = ids(2);
        // max x s.t. x - y == 0 with x in [0, 4], y in [1, 2]
        let program = LinearProgram::new(
            OptimisationDirection::Maximise,
            vec![(x[0], 1.0)],
            0.0,
            vec![(0.0, 4.0), (1.0, 2.0)],
            vec![LinearRow::new(
                vec![(x[0], 1.0), (x[1], -1.0)],
                RowRelation::Equal,
                0.0,
            )],
        );

        assert_close(2.0, SimplexRelaxation::default().solve(&program));
    }

    #[test]
    fn negative_lower_bounds_are_shifted() {
        let x = ids(1);
        let program = LinearProgram::new(
            OptimisationDirection::Minimise,
            vec![(x[0], 3.0)],
            0.0,
            vec![(-5.0, 5.0)],
            vec![],
        );

        assert_close(-15.0, SimplexRelaxation::default().solve(&program));
    }

    #[test]
    fn infeasible_rows_are_reported() {
        let x = ids(2);
        let program = LinearProgram::new(
            OptimisationDirection::Minimise,
            vec![(x[0], 1.0)],
            0.0,
            vec![(0.0, 3.0), (0.0, 3.0)],
            vec![LinearRow::new(
                vec![(x[0], 1.0), (x[1], 1.0)],
                RowRelation::GreaterOrEqual,
                10.0,
            )],
        );

        assert_eq!(
            Err(RelaxationError::Infeasible),
            SimplexRelaxation::default().solve(&program)
        );
    }
}
