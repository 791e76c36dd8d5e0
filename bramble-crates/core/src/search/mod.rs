//! The branch-and-bound search tree: the node arena, the collection of open nodes, the incumbent
//! and the optional record of the search.
mod incumbent;
mod node;
mod open_nodes;
mod search_log;
mod search_statistics;

pub(crate) use incumbent::Collection;
pub(crate) use incumbent::Incumbent;
pub(crate) use node::Node;
pub use node::NodeId;
pub use node::NodeStatus;
pub(crate) use open_nodes::OpenNodes;
pub use search_log::DocumentNode;
pub use search_log::SearchLog;
pub use search_log::SearchLogEntry;
pub use search_log::SearchTreeDocument;
pub use search_statistics::SearchStatistics;
