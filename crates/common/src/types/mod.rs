use serde::Serialize;

/// Liveness payload served at `/health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
