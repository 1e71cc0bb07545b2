//! Concrete `EmployeeRepository` backends besides the in-memory one.

pub mod json_file;
pub mod seaorm;
