/// Employee table CRUD against a live database
pub mod employee_tests;
