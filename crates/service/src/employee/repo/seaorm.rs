use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::employee::{self as row, EmployeeFields};

use crate::employee::domain::{Employee, EmployeeProfile, NewEmployee};
use crate::employee::repository::EmployeeRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmEmployeeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_fields(profile: EmployeeProfile, password_hash: String) -> EmployeeFields {
    EmployeeFields {
        name: profile.name,
        gender: profile.gender.as_str().to_string(),
        department: profile.department.as_str().to_string(),
        designation: profile.designation,
        email: profile.email,
        password_hash,
        contact: profile.contact,
        salary: profile.salary,
    }
}

fn to_domain(m: row::Model) -> Result<Employee, ServiceError> {
    // enum columns are written by this repository; a mismatch means the row was edited out of band
    let id = m.id;
    let corrupt = move |e: ServiceError| ServiceError::Db(format!("employee {id}: {e}"));
    Ok(Employee {
        id,
        gender: m.gender.parse().map_err(corrupt)?,
        department: m.department.parse().map_err(corrupt)?,
        name: m.name,
        designation: m.designation,
        email: m.email,
        password_hash: m.password_hash,
        contact: m.contact,
        salary: m.salary,
    })
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn insert(&self, new: NewEmployee) -> Result<Employee, ServiceError> {
        let created = row::create(&self.db, new.id, to_fields(new.profile, new.password_hash)).await?;
        to_domain(created)
    }

    async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        row::list(&self.db).await?.into_iter().map(to_domain).collect()
    }

    async fn get(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        row::get(&self.db, id).await?.map(to_domain).transpose()
    }

    async fn update(&self, employee: Employee) -> Result<Option<Employee>, ServiceError> {
        let fields = EmployeeFields {
            name: employee.name,
            gender: employee.gender.as_str().to_string(),
            department: employee.department.as_str().to_string(),
            designation: employee.designation,
            email: employee.email,
            password_hash: employee.password_hash,
            contact: employee.contact,
            salary: employee.salary,
        };
        row::update(&self.db, employee.id, fields).await?.map(to_domain).transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(row::delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::domain::{Department, Gender};
    use crate::employee::repository::fixtures::new_employee;
    use crate::test_support::get_db;

    #[test]
    fn enum_columns_round_trip_through_text() {
        let m = row::Model {
            id: 4,
            name: "Ann".into(),
            gender: "FEMALE".into(),
            department: "HR".into(),
            designation: "Partner".into(),
            email: "ann@example.com".into(),
            password_hash: "$argon2id$stub".into(),
            contact: "5550100200".into(),
            salary: 1.0,
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        };
        let e = to_domain(m).unwrap();
        assert_eq!(e.gender, Gender::Female);
        assert_eq!(e.department, Department::Hr);
    }

    #[test]
    fn unknown_enum_value_is_a_db_error() {
        let m = row::Model {
            id: 5,
            name: "Bo".into(),
            gender: "UNKNOWN".into(),
            department: "HR".into(),
            designation: "x".into(),
            email: "bo@example.com".into(),
            password_hash: String::new(),
            contact: "5550100200".into(),
            salary: 0.0,
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        };
        assert!(matches!(to_domain(m), Err(ServiceError::Db(_))));
    }

    #[tokio::test]
    async fn seaorm_repository_crud() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() { return Ok(()); }
        let repo = SeaOrmEmployeeRepository::new(get_db().await?);

        let created = repo.insert(new_employee(None, "Repo")).await?;
        assert_eq!(repo.get(created.id).await?, Some(created.clone()));

        let mut changed = created.clone();
        changed.department = Department::Sales;
        let updated = repo.update(changed).await?.expect("row exists");
        assert_eq!(updated.department, Department::Sales);

        assert!(repo.delete(created.id).await?);
        assert!(repo.get(created.id).await?.is_none());
        Ok(())
    }
}
