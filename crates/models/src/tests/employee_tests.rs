use crate::db::connect;
use crate::employee::{self, EmployeeFields};
use crate::errors::ModelError;
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Connect and migrate; `None` when no database is configured for this run.
async fn setup_test_db() -> Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}

fn fields(name: &str) -> EmployeeFields {
    EmployeeFields {
        name: name.into(),
        gender: "MALE".into(),
        department: "SALES".into(),
        designation: "Account Manager".into(),
        email: format!("{}@example.com", name.to_lowercase()),
        password_hash: "$argon2id$v=19$stub".into(),
        contact: "555-0101".into(),
        salary: 4200.5,
    }
}

#[tokio::test]
async fn test_employee_crud() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let created = employee::create(&db, None, fields("Bob")).await?;
    assert!(created.id > 0);

    let found = employee::get(&db, created.id).await?.expect("row exists");
    assert_eq!(found, created);

    let mut changed = fields("Bob");
    changed.designation = "Sales Lead".into();
    let updated = employee::update(&db, created.id, changed).await?.expect("row exists");
    assert_eq!(updated.designation, "Sales Lead");
    assert_eq!(updated.created_at, created.created_at);

    assert!(employee::list(&db).await?.iter().any(|m| m.id == created.id));

    assert!(employee::delete(&db, created.id).await?);
    assert!(!employee::delete(&db, created.id).await?);
    assert!(employee::get(&db, created.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_explicit_id_conflicts_and_sequence_moves_on() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let explicit_id = 900_000 + (std::process::id() as i32 % 50_000);
    let _ = employee::delete(&db, explicit_id).await?;
    let created = employee::create(&db, Some(explicit_id), fields("Carol")).await?;
    assert_eq!(created.id, explicit_id);

    let dup = employee::create(&db, Some(explicit_id), fields("Carol")).await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));

    let next = employee::create(&db, None, fields("Dave")).await?;
    assert!(next.id > explicit_id);

    employee::delete(&db, next.id).await?;
    employee::delete(&db, explicit_id).await?;
    Ok(())
}

#[tokio::test]
async fn test_update_missing_row_is_none() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };
    assert!(employee::update(&db, i32::MAX, fields("Nobody")).await?.is_none());
    Ok(())
}
