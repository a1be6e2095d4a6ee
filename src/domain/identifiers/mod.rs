pub mod domain_name;
pub mod validation;

pub use domain_name::DomainName;
