use crate::basic_types::ProblemSolution;
use crate::basic_types::Solution;
use crate::constraints::LinearRelation;
use crate::engine::propagation::Inconsistency;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationResult;
use crate::engine::propagation::Propagator;
use crate::engine::variables::DomainId;

/// Propagator for the constraint `sum(coefficients[i] * variables[i]) <relation> rhs`.
///
/// The inequality and equality relations are propagated to bound consistency: the smallest
/// possible value of the sum is compared against the right-hand side, and the slack which remains
/// bounds each individual term. Bounds are propagated in saturating 64-bit arithmetic; exact sums
/// of fixed terms are accumulated in 128 bits.
#[derive(Clone, Debug)]
pub(crate) struct LinearSumPropagator {
    coefficients: Vec<i32>,
    variables: Vec<DomainId>,
    relation: LinearRelation,
    rhs: i32,
}

impl LinearSumPropagator {
    pub(crate) fn new(
        coefficients: Vec<i32>,
        variables: Vec<DomainId>,
        relation: LinearRelation,
        rhs: i32,
    ) -> Self {
        LinearSumPropagator {
            coefficients,
            variables,
            relation,
            rhs,
        }
    }

    pub(crate) fn coefficients(&self) -> &[i32] {
        &self.coefficients
    }

    pub(crate) fn variables(&self) -> &[DomainId] {
        &self.variables
    }

    pub(crate) fn relation(&self) -> LinearRelation {
        self.relation
    }

    pub(crate) fn rhs(&self) -> i32 {
        self.rhs
    }

    fn terms(&self, sign: i64) -> impl Iterator<Item = (DomainId, i64)> + '_ {
        self.variables
            .iter()
            .zip(&self.coefficients)
            .map(move |(&domain_id, &coefficient)| (domain_id, sign * coefficient as i64))
    }

    /// Enforces `sum(sign * c_i * x_i) <= sign * rhs`.
    fn propagate_at_most(&self, context: &mut PropagationContext<'_>, sign: i64) -> PropagationResult {
        let bound = sign * self.rhs as i64;

        let minima = self
            .terms(sign)
            .map(|(domain_id, coefficient)| min_contribution(context, domain_id, coefficient))
            .collect::<Vec<_>>();
        let min_sum = minima.iter().fold(0_i64, |sum, &term| sum.saturating_add(term));

        if min_sum > bound {
            return Err(Inconsistency);
        }

        for ((domain_id, coefficient), min_term) in self.terms(sign).zip(minima) {
            // Bounds each term by `coefficient * x <= slack`.
            let slack = bound.saturating_sub(min_sum.saturating_sub(min_term));

            if coefficient > 0 {
                let upper_bound = div_floor(slack, coefficient);
                if upper_bound < context.upper_bound(domain_id) as i64 {
                    context.restrict_upper_bound(domain_id, clamp_to_i32(upper_bound))?;
                }
            } else if coefficient < 0 {
                let lower_bound = div_ceil(slack, coefficient);
                if lower_bound > context.lower_bound(domain_id) as i64 {
                    context.restrict_lower_bound(domain_id, clamp_to_i32(lower_bound))?;
                }
            }
        }

        Ok(())
    }

    /// Removes the single value which would make the sum equal to the right-hand side once all
    /// other terms are fixed.
    fn propagate_not_equal(&self, context: &mut PropagationContext<'_>) -> PropagationResult {
        let mut fixed_sum = 0_i128;
        let mut unfixed = None;

        for (domain_id, coefficient) in self.terms(1).filter(|&(_, coefficient)| coefficient != 0) {
            match context.assigned_value(domain_id) {
                Some(value) => fixed_sum += coefficient as i128 * value as i128,
                None if unfixed.is_none() => unfixed = Some((domain_id, coefficient as i128)),
                None => return Ok(()),
            }
        }

        let residual = self.rhs as i128 - fixed_sum;
        match unfixed {
            None if residual == 0 => Err(Inconsistency),
            None => Ok(()),
            Some((domain_id, coefficient)) => {
                if residual % coefficient == 0 {
                    if let Ok(value) = i32::try_from(residual / coefficient) {
                        context.remove_value(domain_id, value)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl Propagator for LinearSumPropagator {
    fn name(&self) -> &'static str {
        "linear_sum"
    }

    fn scope(&self) -> &[DomainId] {
        &self.variables
    }

    fn propagate(&self, context: &mut PropagationContext<'_>) -> PropagationResult {
        match self.relation {
            LinearRelation::LessOrEqual => self.propagate_at_most(context, 1),
            LinearRelation::GreaterOrEqual => self.propagate_at_most(context, -1),
            LinearRelation::Equal => {
                self.propagate_at_most(context, 1)?;
                self.propagate_at_most(context, -1)
            }
            LinearRelation::NotEqual => self.propagate_not_equal(context),
        }
    }

    fn is_satisfied(&self, solution: &Solution) -> bool {
        let lhs = self
            .terms(1)
            .map(|(domain_id, coefficient)| {
                coefficient as i128 * solution.get_integer_value(domain_id) as i128
            })
            .sum::<i128>();
        self.relation.holds(lhs, self.rhs as i128)
    }
}

fn min_contribution(context: &PropagationContext<'_>, domain_id: DomainId, coefficient: i64) -> i64 {
    if coefficient >= 0 {
        coefficient * context.lower_bound(domain_id) as i64
    } else {
        coefficient * context.upper_bound(domain_id) as i64
    }
}

fn div_floor(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    if numerator % denominator != 0 && ((numerator < 0) != (denominator < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

fn div_ceil(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    if numerator % denominator != 0 && ((numerator < 0) == (denominator < 0)) {
        quotient + 1
    } else {
        quotient
    }
}

fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
