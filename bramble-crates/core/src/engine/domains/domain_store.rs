use crate::basic_types::Trail;
use crate::bramble_assert_moderate;
use crate::bramble_assert_simple;
use crate::containers::KeyedVec;
use crate::engine::domains::IntegerDomain;
use crate::engine::variables::DomainId;

/// Signals that a domain operation would have left a variable without values.
///
/// The operation which returned it did not change the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDomain;

/// The undo information for a single domain mutation.
#[derive(Clone, Debug)]
pub(crate) struct TrailEntry {
    pub(crate) domain_id: DomainId,
    pub(crate) previous: IntegerDomain,
}

/// Holds the current domain of every variable together with the trail which allows restoring
/// earlier states.
///
/// Every mutation which changes a domain first records the old domain on the trail. Mutations
/// return `Ok(true)` when the domain changed, `Ok(false)` when it did not, and [`EmptyDomain`]
/// when the result would be empty, in which case nothing is modified.
#[derive(Clone, Debug, Default)]
pub struct DomainStore {
    domains: KeyedVec<DomainId, IntegerDomain>,
    trail: Trail<TrailEntry>,
}

impl DomainStore {
    /// Adds a variable with the given initial domain.
    pub fn grow(&mut self, domain: IntegerDomain) -> DomainId {
        bramble_assert_simple!(
            self.trail.is_empty(),
            "variables are created before any mutation"
        );
        self.domains.push(domain)
    }

    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub fn domain_ids(&self) -> impl Iterator<Item = DomainId> {
        self.domains.keys()
    }

    pub fn domain(&self, domain_id: DomainId) -> &IntegerDomain {
        &self.domains[domain_id]
    }

    pub fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound()
    }

    pub fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound()
    }

    pub fn size(&self, domain_id: DomainId) -> u64 {
        self.domains[domain_id].size()
    }

    pub fn contains(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub fn is_fixed(&self, domain_id: DomainId) -> bool {
        self.domains[domain_id].is_fixed()
    }

    pub fn assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        self.domains[domain_id].assigned_value()
    }

    pub fn values(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        self.domains[domain_id].values()
    }

    /// Whether every variable has a singleton domain.
    pub fn all_fixed(&self) -> bool {
        self.domains.iter().all(IntegerDomain::is_fixed)
    }

    /// Restricts the domain of `domain_id` to `value`.
    pub fn fix(&mut self, domain_id: DomainId, value: i32) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        if !domain.contains(value) {
            return Err(EmptyDomain);
        }
        if domain.is_fixed() {
            return Ok(false);
        }

        let new_domain = IntegerDomain::interval(value, value).ok_or(EmptyDomain)?;
        self.replace(domain_id, new_domain);
        Ok(true)
    }

    pub fn remove_value(&mut self, domain_id: DomainId, value: i32) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        if !domain.contains(value) {
            return Ok(false);
        }

        let new_domain = domain.without_value(value).ok_or(EmptyDomain)?;
        self.replace(domain_id, new_domain);
        Ok(true)
    }

    pub fn restrict_lower_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        if bound <= domain.lower_bound() {
            return Ok(false);
        }

        let new_domain = domain.with_lower_bound(bound).ok_or(EmptyDomain)?;
        self.replace(domain_id, new_domain);
        Ok(true)
    }

    pub fn restrict_upper_bound(
        &mut self,
        domain_id: DomainId,
        bound: i32,
    ) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        if bound >= domain.upper_bound() {
            return Ok(false);
        }

        let new_domain = domain.with_upper_bound(bound).ok_or(EmptyDomain)?;
        self.replace(domain_id, new_domain);
        Ok(true)
    }

    /// Removes every value of `domain_id` which is not in `other`.
    pub fn intersect(
        &mut self,
        domain_id: DomainId,
        other: &IntegerDomain,
    ) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        let new_domain = domain.intersection(other).ok_or(EmptyDomain)?;
        if new_domain.size() == domain.size() {
            return Ok(false);
        }

        self.replace(domain_id, new_domain);
        Ok(true)
    }

    fn replace(&mut self, domain_id: DomainId, new_domain: IntegerDomain) {
        bramble_assert_moderate!(new_domain.is_subset_of(&self.domains[domain_id]));

        let previous = std::mem::replace(&mut self.domains[domain_id], new_domain);
        self.trail.push(TrailEntry {
            domain_id,
            previous,
        });
    }

    /// The number of entries on the trail.
    pub fn trail_position(&self) -> usize {
        self.trail.len()
    }

    /// Undoes every mutation made since the trail had length `trail_position`.
    pub fn rollback_to(&mut self, trail_position: usize) {
        for entry in self.trail.rollback_to(trail_position) {
            self.domains[entry.domain_id] = entry.previous;
        }
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    /// Undoes every mutation made after `checkpoint` was the current checkpoint.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) {
        if checkpoint >= self.trail.get_checkpoint() {
            return;
        }

        for entry in self.trail.synchronise(checkpoint) {
            self.domains[entry.domain_id] = entry.previous;
        }
    }

    pub(crate) fn entries_at_checkpoint(&self, checkpoint: usize) -> &[TrailEntry] {
        self.trail.values_at_checkpoint(checkpoint)
    }
}
