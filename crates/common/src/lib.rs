//! Shared plumbing for the employee workspace: logging setup, runtime
//! directory checks and small wire types reused across crates.

pub mod types;
pub mod env;
pub mod utils {
    pub mod logging;
}
