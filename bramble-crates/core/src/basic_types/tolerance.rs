use std::cmp::Ordering;

use crate::model::OptimisationDirection;

/// The numerical tolerances used for every comparison between objective values and bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Tolerance {
    pub(crate) rtol: f64,
    pub(crate) atol: f64,
}

impl Tolerance {
    pub(crate) fn new(rtol: f64, atol: f64) -> Self {
        Tolerance { rtol, atol }
    }

    /// The margin by which a value has to differ from `reference` to count as different.
    pub(crate) fn threshold(&self, reference: f64) -> f64 {
        self.atol.max(self.rtol * reference.abs())
    }

    /// Whether `candidate` is better than `incumbent` by more than the tolerance.
    pub(crate) fn improves(
        &self,
        direction: OptimisationDirection,
        candidate: f64,
        incumbent: f64,
    ) -> bool {
        let threshold = self.threshold(incumbent);
        match direction {
            OptimisationDirection::Minimise => candidate < incumbent - threshold,
            OptimisationDirection::Maximise => candidate > incumbent + threshold,
        }
    }

    /// Whether `a` and `b` are equal up to the tolerance; symmetric in its arguments.
    pub(crate) fn equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.threshold(a.abs().max(b.abs()))
    }

    /// Orders `a` before `b` when it is better by more than the tolerance, otherwise they tie.
    pub(crate) fn compare(&self, direction: OptimisationDirection, a: f64, b: f64) -> Ordering {
        if self.equal(a, b) {
            Ordering::Equal
        } else {
            direction.compare(a, b)
        }
    }
}
