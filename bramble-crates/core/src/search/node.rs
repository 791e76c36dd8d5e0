use std::fmt::Display;

use crate::branching::BranchDecision;
use crate::containers::StorageKey;

/// The identity of a search node: its position in the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl StorageKey for NodeId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        NodeId(index as u32)
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    Open,
    Infeasible,
    Solved,
    Pruned,
    Branched,
}

impl Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            NodeStatus::Open => "open",
            NodeStatus::Infeasible => "infeasible",
            NodeStatus::Solved => "solved",
            NodeStatus::Pruned => "pruned",
            NodeStatus::Branched => "branched",
        };
        write!(f, "{status}")
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: usize,
    /// The restriction this node adds to its parent; `None` for the root.
    pub(crate) decision: Option<BranchDecision>,
    pub(crate) status: NodeStatus,
    /// The best objective value any solution below this node can attain.
    pub(crate) bound: f64,
    /// The trail position at which the node's decision was applied, while the node is on the
    /// active path.
    pub(crate) trail_position: Option<usize>,
    /// The expansion step at which the node was processed.
    pub(crate) step: Option<u64>,
}

impl Node {
    pub(crate) fn root(bound: f64) -> Node {
        Node {
            parent: None,
            depth: 0,
            decision: None,
            status: NodeStatus::Open,
            bound,
            trail_position: None,
            step: None,
        }
    }

    pub(crate) fn child(parent: NodeId, parent_node: &Node, decision: BranchDecision) -> Node {
        Node {
            parent: Some(parent),
            depth: parent_node.depth + 1,
            decision: Some(decision),
            status: NodeStatus::Open,
            bound: parent_node.bound,
            trail_position: None,
            step: None,
        }
    }
}
