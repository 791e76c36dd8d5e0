//! The propagators of the supported constraint kinds.
mod all_different;
mod equality;
mod inequality;
mod linear_sum;
mod not_equal;

pub(crate) use all_different::AllDifferentPropagator;
pub(crate) use equality::EqualityPropagator;
pub(crate) use inequality::LessOrEqualPropagator;
pub(crate) use linear_sum::LinearSumPropagator;
pub(crate) use not_equal::NotEqualPropagator;
