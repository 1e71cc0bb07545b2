//! Employee module: three-layer architecture (domain, repository, service).
//!
//! The service owns validation and password hashing; repositories only persist.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Department, Employee, EmployeeInput, Gender};
pub use repository::EmployeeRepository;
pub use service::EmployeeService;
