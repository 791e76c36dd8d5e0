use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::bramble_assert_simple;

/// An append-only log of undo entries, partitioned into checkpoints.
///
/// The search opens one checkpoint per decision on the active path, so the checkpoint index of an
/// entry equals the depth of the node that caused it.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_checkpoint: usize,
    /// At index i is the position where the i-th checkpoint ends (exclusive) on the trail
    trail_delimiter: Vec<usize>,
    trail: Vec<T>,
}

// Implemented by hand so that `T` is not required to implement `Default`.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_checkpoint: Default::default(),
            trail_delimiter: Default::default(),
            trail: Default::default(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.current_checkpoint += 1;
        self.trail_delimiter.push(self.trail.len());
    }

    /// The entries which were pushed while `checkpoint` was the current checkpoint.
    pub(crate) fn values_at_checkpoint(&self, checkpoint: usize) -> &[T] {
        bramble_assert_simple!(checkpoint <= self.current_checkpoint);

        let start = if checkpoint == 0 {
            0
        } else {
            self.trail_delimiter[checkpoint - 1]
        };

        let end = if checkpoint == self.current_checkpoint {
            self.trail.len()
        } else {
            self.trail_delimiter[checkpoint]
        };

        &self.trail[start..end]
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.current_checkpoint
    }

    /// Removes every entry pushed after `new_checkpoint` was opened, most recent first.
    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) -> Rev<Drain<'_, T>> {
        bramble_assert_simple!(new_checkpoint < self.current_checkpoint);

        let new_trail_len = self.trail_delimiter[new_checkpoint];

        self.current_checkpoint = new_checkpoint;
        self.trail_delimiter.truncate(new_checkpoint);
        self.trail.drain(new_trail_len..).rev()
    }

    /// Removes every entry at or beyond `position`, most recent first.
    ///
    /// Checkpoints which were opened at or beyond `position` are closed as well.
    pub(crate) fn rollback_to(&mut self, position: usize) -> Rev<Drain<'_, T>> {
        bramble_assert_simple!(position <= self.trail.len());

        let num_open = self
            .trail_delimiter
            .iter()
            .take_while(|&&start| start < position)
            .count();
        self.trail_delimiter.truncate(num_open);
        self.current_checkpoint = num_open;

        self.trail.drain(position..).rev()
    }

    pub(crate) fn push(&mut self, elem: T) {
        self.trail.push(elem)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.trail
    }
}
