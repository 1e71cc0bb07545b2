//! Runtime wiring helpers
//!
//! Builds the configured employee store so binaries and tests pick a backend
//! without knowing how each one is opened.

use std::path::Path;
use std::sync::Arc;

use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tracing::info;

use crate::employee::repo::{json_file::JsonFileEmployeeRepository, seaorm::SeaOrmEmployeeRepository};
use crate::employee::repository::{memory::InMemoryEmployeeRepository, EmployeeRepository};

/// Open the store selected by `storage.backend`; the postgres backend is migrated first.
pub async fn build_employee_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn EmployeeRepository>> {
    let repo: Arc<dyn EmployeeRepository> = match cfg.storage.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "employee store ready");
            Arc::new(InMemoryEmployeeRepository::new())
        }
        StorageBackend::File => {
            let path = Path::new(&cfg.storage.file_path);
            common::env::ensure_data_dir(path).await?;
            let repo = JsonFileEmployeeRepository::open(path).await?;
            info!(backend = "file", path = %path.display(), "employee store ready");
            Arc::new(repo)
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!(backend = "postgres", "employee store ready");
            Arc::new(SeaOrmEmployeeRepository::new(db))
        }
    };
    Ok(repo)
}
