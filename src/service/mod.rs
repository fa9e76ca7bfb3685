//! CrudService: generic CRUD delegation over a repository, bound once per entity.

mod crud;
pub mod validation;

pub use crud::{CrudService, CustomerService, ProductService};
