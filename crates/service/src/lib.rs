//! Service layer providing the employee CRUD contract on top of pluggable stores.
//! - Separates business rules (validation, hashing) from data access.
//! - Stores are injected as `Arc<dyn EmployeeRepository>`; no global state.
//! - Errors surface as `ServiceError` unchanged to the caller.

pub mod errors;
pub mod employee;
pub mod runtime;
pub mod storage;
#[cfg(test)]
pub mod test_support;
