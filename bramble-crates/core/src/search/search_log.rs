use std::fmt::Display;
use std::time::Duration;

use itertools::Itertools;

use crate::branching::BranchDecision;
use crate::containers::HashMap;
use crate::containers::HashSet;
use crate::engine::variables::DomainId;
use crate::model::VariableNames;
use crate::search::NodeId;
use crate::search::NodeStatus;

/// The record of a single processed node.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchLogEntry {
    pub node_id: NodeId,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub decision: Option<BranchDecision>,
    pub status: NodeStatus,
    pub bound: f64,
    pub step: Option<u64>,
    /// The time since the start of the search at which the node was processed.
    pub timestamp: Duration,
    /// The values removed at this node relative to its parent, per variable.
    pub removed: Vec<(DomainId, Vec<i32>)>,
}

/// The per-node record of a search, kept when `keep_logs` is enabled.
#[derive(Clone, Debug, Default)]
pub struct SearchLog {
    entries: Vec<SearchLogEntry>,
}

impl SearchLog {
    pub(crate) fn record(&mut self, entry: SearchLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SearchLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the tree of the logged nodes, naming variables through `variable_names`.
    ///
    /// Nodes whose parent was never processed become roots of the document.
    pub fn export(&self, variable_names: &VariableNames) -> SearchTreeDocument {
        let logged = self
            .entries
            .iter()
            .map(|entry| entry.node_id)
            .collect::<HashSet<_>>();
        let mut children: HashMap<NodeId, Vec<usize>> = HashMap::default();
        let mut roots = Vec::new();

        for (index, entry) in self.entries.iter().enumerate() {
            match entry.parent {
                Some(parent) if logged.contains(&parent) => {
                    children.entry(parent).or_default().push(index)
                }
                _ => roots.push(index),
            }
        }

        SearchTreeDocument {
            roots: roots
                .into_iter()
                .map(|index| self.build_node(index, &children, variable_names))
                .collect(),
        }
    }

    fn build_node(
        &self,
        index: usize,
        children: &HashMap<NodeId, Vec<usize>>,
        variable_names: &VariableNames,
    ) -> DocumentNode {
        let entry = &self.entries[index];

        DocumentNode {
            node_id: entry.node_id,
            depth: entry.depth,
            decision: entry.decision.map(|decision| {
                decision.describe(&variable_names.name_or_default(decision.domain_id))
            }),
            status: entry.status,
            bound: entry.bound,
            step: entry.step,
            timestamp: entry.timestamp,
            removed: entry
                .removed
                .iter()
                .map(|(domain_id, values)| {
                    (variable_names.name_or_default(*domain_id), values.clone())
                })
                .collect(),
            children: children
                .get(&entry.node_id)
                .into_iter()
                .flatten()
                .map(|&child| self.build_node(child, children, variable_names))
                .collect(),
        }
    }
}

/// A node of the exported search tree, with variables referred to by name.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentNode {
    pub node_id: NodeId,
    pub depth: usize,
    pub decision: Option<String>,
    pub status: NodeStatus,
    pub bound: f64,
    pub step: Option<u64>,
    pub timestamp: Duration,
    pub removed: Vec<(String, Vec<i32>)>,
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// The number of nodes in the subtree rooted at this node.
    pub fn num_nodes(&self) -> usize {
        1 + self.children.iter().map(DocumentNode::num_nodes).sum::<usize>()
    }

    fn write_indented(&self, f: &mut std::fmt::Formatter<'_>, indent: usize) -> std::fmt::Result {
        write!(
            f,
            "{:indent$}{} {} [{}] bound={}",
            "",
            self.node_id,
            self.decision.as_deref().unwrap_or("root"),
            self.status,
            self.bound,
            indent = indent * 2
        )?;
        if let Some(step) = self.step {
            write!(f, " step={step}")?;
        }
        write!(f, " t={:.3}s", self.timestamp.as_secs_f64())?;
        if !self.removed.is_empty() {
            write!(
                f,
                " removed: {}",
                self.removed
                    .iter()
                    .map(|(name, values)| format!("{name} {{{}}}", values.iter().join(", ")))
                    .join("; ")
            )?;
        }
        writeln!(f)?;

        for child in &self.children {
            child.write_indented(f, indent + 1)?;
        }
        Ok(())
    }
}

/// The exported search tree; renders as an indented text tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchTreeDocument {
    pub roots: Vec<DocumentNode>,
}

impl SearchTreeDocument {
    pub fn num_nodes(&self) -> usize {
        self.roots.iter().map(DocumentNode::num_nodes).sum()
    }
}

impl Display for SearchTreeDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for root in &self.roots {
            root.write_indented(f, 0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::Restriction;
    use crate::containers::StorageKey;

    fn entry(node: usize, parent: Option<usize>, decision: Option<BranchDecision>) -> SearchLogEntry {
        SearchLogEntry {
            node_id: NodeId::create_from_index(node),
            parent: parent.map(NodeId::create_from_index),
            depth: usize::from(parent.is_some()),
            decision,
            status: if parent.is_some() {
                NodeStatus::Solved
            } else {
                NodeStatus::Branched
            },
            bound: 0.0,
            step: Some(node as u64),
            timestamp: Duration::ZERO,
            removed: vec![(DomainId::new(1), vec![3, 4])],
        }
    }

    #[test]
    fn export_nests_children_and_uses_names() {
        let x = DomainId::new(0);
        let mut names = VariableNames::default();
        names.add_integer(x, "colour".to_owned());

        let mut log = SearchLog::default();
        log.record(entry(0, None, None));
        log.record(entry(1, Some(0), Some(BranchDecision::new(x, Restriction::Fix(2)))));
        log.record(entry(2, Some(0), Some(BranchDecision::new(x, Restriction::Remove(2)))));

        let document = log.export(&names);

        assert_eq!(1, document.roots.len());
        assert_eq!(3, document.num_nodes());
        assert_eq!(
            Some("colour = 2"),
            document.roots[0].children[0].decision.as_deref()
        );
        assert_eq!("x1", document.roots[0].removed[0].0);

        let rendered = document.to_string();
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(3, lines.len());
        assert!(lines[0].starts_with("n0 root [branched]"));
        assert!(lines[1].starts_with("  n1 colour = 2 [solved]"));
        assert!(lines[2].contains("removed: x1 {3, 4}"));
    }
}
