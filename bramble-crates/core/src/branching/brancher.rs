use std::cmp::Reverse;

use super::branch_split::split;
use crate::branching::BranchDecision;
use crate::containers::KeyedVec;
use crate::engine::domains::DomainStore;
use crate::engine::variables::DomainId;
use crate::options::BranchSplit;
use crate::options::VariableSelection;

/// Decides on which variable to branch and how its domain is split.
#[derive(Debug, Clone)]
pub(crate) struct Brancher {
    variable_selection: VariableSelection,
    branch_split: BranchSplit,
    /// The number of constraints each variable occurs in, used to break ties.
    num_occurrences: KeyedVec<DomainId, usize>,
}

impl Brancher {
    pub(crate) fn new(
        variable_selection: VariableSelection,
        branch_split: BranchSplit,
        num_occurrences: KeyedVec<DomainId, usize>,
    ) -> Self {
        Brancher {
            variable_selection,
            branch_split,
            num_occurrences,
        }
    }

    /// The variable to branch on, or `None` if every variable is fixed.
    pub(crate) fn select_variable(&self, domains: &DomainStore) -> Option<DomainId> {
        let mut unfixed = domains
            .domain_ids()
            .filter(|&domain_id| !domains.is_fixed(domain_id));

        match self.variable_selection {
            VariableSelection::InputOrder => unfixed.next(),
            VariableSelection::MostConstrained => unfixed.min_by_key(|&domain_id| {
                (
                    domains.size(domain_id),
                    Reverse(self.num_occurrences[domain_id]),
                    domain_id,
                )
            }),
        }
    }

    /// The two child decisions of the current node, or `None` if every variable is fixed.
    pub(crate) fn branch(&self, domains: &DomainStore) -> Option<[BranchDecision; 2]> {
        let domain_id = self.select_variable(domains)?;
        let restrictions = split(domains.domain(domain_id), self.branch_split);

        Some(restrictions.map(|restriction| BranchDecision::new(domain_id, restriction)))
    }
}
