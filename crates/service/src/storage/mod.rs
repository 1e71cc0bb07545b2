//! Storage abstractions for service layer
//!
//! Reusable file-backed stores that repositories build on.

pub mod json_store;
