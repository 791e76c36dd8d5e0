use std::fmt::Display;

use crate::bramble_assert_moderate;

/// A finite set of integers stored as sorted, disjoint, non-adjacent inclusive intervals.
///
/// A domain is never empty; every operation which would produce an empty set returns `None`
/// instead. The number of values is cached, so the singleton check and the bounds are O(1) while
/// membership is a binary search over the intervals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerDomain {
    intervals: Vec<(i32, i32)>,
    size: u64,
}

impl IntegerDomain {
    /// Creates the domain `[lower_bound, upper_bound]`, or `None` if the range is empty.
    pub fn interval(lower_bound: i32, upper_bound: i32) -> Option<IntegerDomain> {
        Self::from_sorted_intervals(vec![(lower_bound, upper_bound)])
    }

    /// Creates the domain which contains exactly the given values; duplicates are ignored.
    pub fn from_values(values: impl IntoIterator<Item = i32>) -> Option<IntegerDomain> {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_unstable();
        values.dedup();

        let mut intervals: Vec<(i32, i32)> = Vec::new();
        for value in values {
            match intervals.last_mut() {
                Some((_, upper)) if *upper as i64 + 1 == value as i64 => *upper = value,
                _ => intervals.push((value, value)),
            }
        }

        Self::from_sorted_intervals(intervals)
    }

    fn from_sorted_intervals(intervals: Vec<(i32, i32)>) -> Option<IntegerDomain> {
        let intervals = intervals
            .into_iter()
            .filter(|(lower, upper)| lower <= upper)
            .collect::<Vec<_>>();
        if intervals.is_empty() {
            return None;
        }

        bramble_assert_moderate!(intervals
            .windows(2)
            .all(|pair| (pair[0].1 as i64) + 1 < pair[1].0 as i64));

        let size = intervals
            .iter()
            .map(|&(lower, upper)| (upper as i64 - lower as i64 + 1) as u64)
            .sum();

        Some(IntegerDomain { intervals, size })
    }

    pub fn lower_bound(&self) -> i32 {
        self.intervals[0].0
    }

    pub fn upper_bound(&self) -> i32 {
        self.intervals[self.intervals.len() - 1].1
    }

    /// The number of values in the domain.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_fixed(&self) -> bool {
        self.size == 1
    }

    /// The single value of the domain, if it is a singleton.
    pub fn assigned_value(&self) -> Option<i32> {
        self.is_fixed().then(|| self.lower_bound())
    }

    pub fn contains(&self, value: i32) -> bool {
        self.interval_index_of(value).is_some()
    }

    pub fn intervals(&self) -> &[(i32, i32)] {
        &self.intervals
    }

    /// Iterates over the values in increasing order.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.intervals
            .iter()
            .flat_map(|&(lower, upper)| lower..=upper)
    }

    pub fn is_subset_of(&self, other: &IntegerDomain) -> bool {
        self.intersection(other).is_some_and(|common| common == *self)
    }

    fn interval_index_of(&self, value: i32) -> Option<usize> {
        let index = self.intervals.partition_point(|&(_, upper)| upper < value);
        (index < self.intervals.len() && self.intervals[index].0 <= value).then_some(index)
    }

    /// The values of this domain which are at least `bound`.
    pub(crate) fn with_lower_bound(&self, bound: i32) -> Option<IntegerDomain> {
        let intervals = self
            .intervals
            .iter()
            .filter(|&&(_, upper)| upper >= bound)
            .map(|&(lower, upper)| (lower.max(bound), upper))
            .collect();
        Self::from_sorted_intervals(intervals)
    }

    /// The values of this domain which are at most `bound`.
    pub(crate) fn with_upper_bound(&self, bound: i32) -> Option<IntegerDomain> {
        let intervals = self
            .intervals
            .iter()
            .filter(|&&(lower, _)| lower <= bound)
            .map(|&(lower, upper)| (lower, upper.min(bound)))
            .collect();
        Self::from_sorted_intervals(intervals)
    }

    /// This domain with `value` removed.
    pub(crate) fn without_value(&self, value: i32) -> Option<IntegerDomain> {
        let Some(index) = self.interval_index_of(value) else {
            return Some(self.clone());
        };

        let (lower, upper) = self.intervals[index];
        let mut intervals = Vec::with_capacity(self.intervals.len() + 1);
        intervals.extend_from_slice(&self.intervals[..index]);
        if lower < value {
            intervals.push((lower, value - 1));
        }
        if value < upper {
            intervals.push((value + 1, upper));
        }
        intervals.extend_from_slice(&self.intervals[index + 1..]);

        Self::from_sorted_intervals(intervals)
    }

    /// The values which are in both domains.
    pub(crate) fn intersection(&self, other: &IntegerDomain) -> Option<IntegerDomain> {
        let mut intervals = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < self.intervals.len() && j < other.intervals.len() {
            let (a_lower, a_upper) = self.intervals[i];
            let (b_lower, b_upper) = other.intervals[j];

            let lower = a_lower.max(b_lower);
            let upper = a_upper.min(b_upper);
            if lower <= upper {
                intervals.push((lower, upper));
            }

            if a_upper < b_upper {
                i += 1;
            } else {
                j += 1;
            }
        }

        Self::from_sorted_intervals(intervals)
    }
}

impl Display for IntegerDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, &(lower, upper)) in self.intervals.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            if lower == upper {
                write!(f, "{lower}")?;
            } else {
                write!(f, "{lower}..{upper}")?;
            }
        }
        write!(f, "}}")
    }
}
