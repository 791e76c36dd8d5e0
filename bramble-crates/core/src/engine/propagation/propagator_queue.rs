use std::collections::VecDeque;

use crate::bramble_assert_moderate;
use crate::constraints::ConstraintId;
use crate::containers::KeyedVec;

/// A FIFO queue of constraints waiting to be propagated; a constraint is in the queue at most
/// once.
#[derive(Debug, Clone, Default)]
pub(crate) struct PropagatorQueue {
    queue: VecDeque<ConstraintId>,
    is_enqueued: KeyedVec<ConstraintId, bool>,
}

impl PropagatorQueue {
    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn enqueue(&mut self, constraint_id: ConstraintId) {
        if !self.is_enqueued(constraint_id) {
            self.is_enqueued.accomodate(constraint_id, false);
            self.is_enqueued[constraint_id] = true;
            self.queue.push_back(constraint_id);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<ConstraintId> {
        let next = self.queue.pop_front();

        if let Some(constraint_id) = next {
            bramble_assert_moderate!(self.is_enqueued[constraint_id]);
            self.is_enqueued[constraint_id] = false;
        }

        next
    }

    pub(crate) fn clear(&mut self) {
        self.queue.clear();
        for is_enqueued in self.is_enqueued.iter_mut() {
            *is_enqueued = false;
        }
    }

    pub(crate) fn is_enqueued(&self, constraint_id: ConstraintId) -> bool {
        self.is_enqueued
            .get(constraint_id)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraints_are_popped_in_insertion_order_without_duplicates() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue(ConstraintId(2));
        queue.enqueue(ConstraintId(0));
        queue.enqueue(ConstraintId(2));
        queue.enqueue(ConstraintId(1));

        assert_eq!(Some(ConstraintId(2)), queue.pop());
        assert_eq!(Some(ConstraintId(0)), queue.pop());
        assert_eq!(Some(ConstraintId(1)), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn a_popped_constraint_can_be_enqueued_again() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue(ConstraintId(0));
        let _ = queue.pop();
        queue.enqueue(ConstraintId(0));

        assert!(queue.is_enqueued(ConstraintId(0)));
        queue.clear();
        assert!(queue.is_empty());
        assert!(!queue.is_enqueued(ConstraintId(0)));
    }
}
