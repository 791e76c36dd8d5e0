mod domain_store;
mod integer_domain;

pub use domain_store::DomainStore;
pub use domain_store::EmptyDomain;
pub use integer_domain::IntegerDomain;
