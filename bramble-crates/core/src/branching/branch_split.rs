use crate::branching::Restriction;
use crate::bramble_assert_simple;
use crate::engine::domains::IntegerDomain;
use crate::options::BranchSplit;

/// Splits a domain with at least two values into the restrictions of two children.
///
/// The children partition the domain. When the second child would keep a single value it is
/// expressed as fixing the variable to that value.
pub(crate) fn split(domain: &IntegerDomain, branch_split: BranchSplit) -> [Restriction; 2] {
    bramble_assert_simple!(domain.size() >= 2);

    let lower_bound = domain.lower_bound();
    let upper_bound = domain.upper_bound();

    match branch_split {
        BranchSplit::Smallest => {
            let remainder = if domain.size() == 2 {
                Restriction::Fix(upper_bound)
            } else {
                Restriction::Remove(lower_bound)
            };
            [Restriction::Fix(lower_bound), remainder]
        }
        BranchSplit::Biggest => {
            let remainder = if domain.size() == 2 {
                Restriction::Fix(lower_bound)
            } else {
                Restriction::Remove(upper_bound)
            };
            [Restriction::Fix(upper_bound), remainder]
        }
        BranchSplit::InHalf => {
            let midpoint = (lower_bound as i64 + upper_bound as i64).div_euclid(2) as i32;

            let num_lower = domain
                .with_upper_bound(midpoint)
                .map_or(0, |lower_half| lower_half.size());

            let lower_half = if num_lower == 1 {
                Restriction::Fix(lower_bound)
            } else {
                Restriction::AtMost(midpoint)
            };
            let upper_half = if domain.size() - num_lower == 1 {
                Restriction::Fix(upper_bound)
            } else {
                Restriction::AtLeast(midpoint + 1)
            };

            [lower_half, upper_half]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::BranchDecision;
    use crate::engine::variables::DomainId;

    fn assert_partition(domain: &IntegerDomain, branch_split: BranchSplit) {
        let children = split(domain, branch_split)
            .map(|restriction| BranchDecision::new(DomainId::new(0), restriction));

        for value in domain.values() {
            let num_admitting = children.iter().filter(|child| child.admits(value)).count();
            assert_eq!(1, num_admitting, "{value} is in {num_admitting} children");
        }
        for child in children {
            assert!(domain.values().any(|value| child.admits(value)), "{child} is empty");
        }
    }

    #[test]
    fn children_partition_the_domain() {
        let domains = [
            IntegerDomain::interval(1, 9).unwrap(),
            IntegerDomain::interval(-3, 4).unwrap(),
            IntegerDomain::from_values([2, 7]).unwrap(),
            IntegerDomain::from_values([-9, -1, 0, 5, 6]).unwrap(),
            IntegerDomain::interval(i32::MAX - 2, i32::MAX).unwrap(),
        ];

        for domain in &domains {
            for branch_split in [BranchSplit::Smallest, BranchSplit::Biggest, BranchSplit::InHalf] {
                assert_partition(domain, branch_split);
            }
        }
    }

    #[test]
    fn two_values_give_two_fixes() {
        let domain = IntegerDomain::from_values([2, 7]).unwrap();

        assert_eq!(
            [Restriction::Fix(2), Restriction::Fix(7)],
            split(&domain, BranchSplit::Smallest)
        );
        assert_eq!(
            [Restriction::Fix(7), Restriction::Fix(2)],
            split(&domain, BranchSplit::Biggest)
        );
        assert_eq!(
            [Restriction::Fix(2), Restriction::Fix(7)],
            split(&domain, BranchSplit::InHalf)
        );
    }

    #[test]
    fn in_half_uses_the_floor_of_the_midpoint() {
        let domain = IntegerDomain::interval(-3, 4).unwrap();

        assert_eq!(
            [Restriction::AtMost(0), Restriction::AtLeast(1)],
            split(&domain, BranchSplit::InHalf)
        );
        assert_eq!(
            [Restriction::Fix(-3), Restriction::Remove(-3)],
            split(&domain, BranchSplit::Smallest)
        );
    }
}
