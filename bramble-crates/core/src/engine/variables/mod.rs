mod domain_id;

pub use domain_id::DomainId;
