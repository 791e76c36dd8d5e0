use log::trace;

use super::Inconsistency;
use super::PropagationContext;
use super::PropagationResult;
use super::PropagationStatus;
use super::PropagatorQueue;
use crate::constraints::Constraint;
use crate::constraints::ConstraintId;
use crate::containers::KeyedVec;
use crate::engine::domains::DomainStore;
use crate::engine::variables::DomainId;

/// Runs the propagators of the model until none of them can narrow a domain any further.
///
/// Each variable has a watch list of the constraints which contain it, in registration order.
/// When a propagator narrows a variable, every constraint watching it is scheduled again.
#[derive(Debug, Clone, Default)]
pub(crate) struct PropagationEngine {
    watch_lists: KeyedVec<DomainId, Vec<ConstraintId>>,
    queue: PropagatorQueue,
    num_propagator_calls: u64,
}

impl PropagationEngine {
    pub(crate) fn new(num_domains: usize, constraints: &KeyedVec<ConstraintId, Constraint>) -> Self {
        let mut watch_lists: KeyedVec<DomainId, Vec<ConstraintId>> =
            (0..num_domains).map(|_| Vec::new()).collect();

        for (constraint_id, constraint) in constraints.iter_with_keys() {
            for &domain_id in constraint.scope() {
                let watchers = &mut watch_lists[domain_id];
                if watchers.last() != Some(&constraint_id) && !watchers.contains(&constraint_id) {
                    watchers.push(constraint_id);
                }
            }
        }

        PropagationEngine {
            watch_lists,
            queue: PropagatorQueue::default(),
            num_propagator_calls: 0,
        }
    }

    pub(crate) fn num_propagator_calls(&self) -> u64 {
        self.num_propagator_calls
    }

    /// The number of constraints which contain `domain_id`.
    pub(crate) fn num_watchers(&self, domain_id: DomainId) -> usize {
        self.watch_lists[domain_id].len()
    }

    /// Schedules every constraint, used for the initial propagation.
    pub(crate) fn enqueue_all(&mut self, constraints: &KeyedVec<ConstraintId, Constraint>) {
        for constraint_id in constraints.keys() {
            self.queue.enqueue(constraint_id);
        }
    }

    /// Schedules the constraints watching `domain_id`.
    pub(crate) fn notify_narrowed(&mut self, domain_id: DomainId) {
        for &constraint_id in &self.watch_lists[domain_id] {
            self.queue.enqueue(constraint_id);
        }
    }

    /// Propagates the scheduled constraints until the queue is empty.
    ///
    /// On an inconsistency the queue is cleared and the domains are left as they were at the
    /// moment of failure; the caller is expected to roll them back.
    pub(crate) fn propagate(
        &mut self,
        constraints: &KeyedVec<ConstraintId, Constraint>,
        domains: &mut DomainStore,
    ) -> PropagationResult {
        while let Some(constraint_id) = self.queue.pop() {
            self.num_propagator_calls += 1;

            let propagator = constraints[constraint_id].propagator();
            let mut context = PropagationContext::new(domains);
            let result = propagator.propagate(&mut context);

            match context.into_status(result) {
                PropagationStatus::Unchanged => {}
                PropagationStatus::Narrowed(touched) => {
                    for domain_id in touched {
                        self.notify_narrowed(domain_id);
                    }
                }
                PropagationStatus::Infeasible => {
                    trace!("{} {constraint_id} failed", propagator.name());
                    self.queue.clear();
                    return Err(Inconsistency);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;
    use crate::constraints::LinearRelation;
    use crate::engine::domains::IntegerDomain;

    fn setup(
        domains: &[(i32, i32)],
        build: impl FnOnce(&[DomainId]) -> Vec<Constraint>,
    ) -> (DomainStore, Vec<DomainId>, KeyedVec<ConstraintId, Constraint>) {
        let mut store = DomainStore::default();
        let ids = domains
            .iter()
            .map(|&(lower, upper)| store.grow(IntegerDomain::interval(lower, upper).unwrap()))
            .collect::<Vec<_>>();
        let constraints = build(&ids).into_iter().collect();
        (store, ids, constraints)
    }

    #[test]
    fn chained_inequalities_reach_the_fixpoint() {
        let (mut store, ids, constraints) = setup(&[(0, 10), (0, 10), (0, 3)], |ids| {
            vec![
                constraints::less_than_or_equals(ids[0], ids[1]),
                constraints::less_than_or_equals(ids[1], ids[2]),
            ]
        });
        let mut engine = PropagationEngine::new(store.num_domains(), &constraints);

        engine.enqueue_all(&constraints);
        assert_eq!(Ok(()), engine.propagate(&constraints, &mut store));

        assert_eq!(3, store.upper_bound(ids[0]));
        assert_eq!(3, store.upper_bound(ids[1]));
    }

    #[test]
    fn second_run_changes_nothing() {
        let (mut store, _, constraints) = setup(&[(1, 9), (1, 5), (0, 4)], |ids| {
            vec![
                constraints::linear(vec![1, 1], ids[..2].to_vec(), LinearRelation::Equal, 12),
                constraints::not_equals(ids[1], ids[2]),
                constraints::all_different(ids.to_vec()),
            ]
        });
        let mut engine = PropagationEngine::new(store.num_domains(), &constraints);

        engine.enqueue_all(&constraints);
        assert_eq!(Ok(()), engine.propagate(&constraints, &mut store));
        let position = store.trail_position();

        engine.enqueue_all(&constraints);
        assert_eq!(Ok(()), engine.propagate(&constraints, &mut store));

        assert_eq!(position, store.trail_position());
    }

    #[test]
    fn failure_clears_the_queue() {
        let (mut store, ids, constraints) = setup(&[(5, 9), (0, 3)], |ids| {
            vec![
                constraints::less_than_or_equals(ids[0], ids[1]),
                constraints::not_equals(ids[0], ids[1]),
            ]
        });
        let mut engine = PropagationEngine::new(store.num_domains(), &constraints);

        engine.enqueue_all(&constraints);
        assert_eq!(Err(Inconsistency), engine.propagate(&constraints, &mut store));

        store.rollback_to(0);
        assert_eq!(Ok(()), engine.propagate(&constraints, &mut store));
        assert_eq!(5, store.lower_bound(ids[0]));
    }

    #[test]
    fn watch_lists_follow_registration_order() {
        let (store, ids, constraints) = setup(&[(0, 1), (0, 1)], |ids| {
            vec![
                constraints::not_equals(ids[0], ids[1]),
                constraints::all_different(vec![ids[1], ids[0]]),
            ]
        });
        let engine = PropagationEngine::new(store.num_domains(), &constraints);

        assert_eq!(2, engine.num_watchers(ids[0]));
        assert_eq!(
            vec![ConstraintId(0), ConstraintId(1)],
            engine.watch_lists[ids[1]]
        );
    }
}
