//! Selection of the branching variable and the split of its domain into two children.
mod brancher;
mod branch_split;
mod restriction;

pub(crate) use brancher::Brancher;
pub use restriction::BranchDecision;
pub use restriction::Restriction;
