use std::cmp::Ordering;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::basic_types::Tolerance;
use crate::model::OptimisationDirection;
use crate::search::NodeId;

#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    node_id: NodeId,
    bound: f64,
    depth: usize,
    direction: OptimisationDirection,
    tolerance: Tolerance,
}

/// The heap order: best bound, then greatest depth, then the earliest created node.
///
/// Bounds within the tolerance of each other tie.
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tolerance
            .compare(self.direction, self.bound, other.bound)
            .then(self.depth.cmp(&other.depth))
            .then(Reverse(self.node_id).cmp(&Reverse(other.node_id)))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// The nodes which still have to be processed, either as a stack (depth-first) or as a priority
/// queue on the bound (best-first).
#[derive(Debug)]
pub(crate) struct OpenNodes {
    direction: OptimisationDirection,
    tolerance: Tolerance,
    best_first: bool,
    stack: Vec<OpenEntry>,
    heap: BinaryHeap<OpenEntry>,
}

impl OpenNodes {
    pub(crate) fn new(
        direction: OptimisationDirection,
        tolerance: Tolerance,
        best_first: bool,
    ) -> Self {
        OpenNodes {
            direction,
            tolerance,
            best_first,
            stack: Vec::new(),
            heap: BinaryHeap::new(),
        }
    }

    pub(crate) fn is_best_first(&self) -> bool {
        self.best_first
    }

    pub(crate) fn len(&self) -> usize {
        self.stack.len() + self.heap.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn push(&mut self, node_id: NodeId, bound: f64, depth: usize) {
        let entry = OpenEntry {
            node_id,
            bound,
            depth,
            direction: self.direction,
            tolerance: self.tolerance,
        };
        if self.best_first {
            self.heap.push(entry);
        } else {
            self.stack.push(entry);
        }
    }

    /// Adds the children of a node such that, in depth-first order, the first child is
    /// processed first.
    pub(crate) fn push_children(&mut self, children: &[(NodeId, f64)], depth: usize) {
        for &(node_id, bound) in children.iter().rev() {
            self.push(node_id, bound, depth);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        if self.best_first {
            self.heap.pop().map(|entry| entry.node_id)
        } else {
            self.stack.pop().map(|entry| entry.node_id)
        }
    }

    /// Moves every open node into the best-first order.
    pub(crate) fn switch_to_best_first(&mut self) {
        self.best_first = true;
        self.heap.extend(self.stack.drain(..));
    }

    /// The best bound among the open nodes.
    pub(crate) fn best_bound(&self) -> Option<f64> {
        self.stack
            .iter()
            .chain(self.heap.iter())
            .map(|entry| entry.bound)
            .reduce(|a, b| self.direction.best(a, b))
    }
}
