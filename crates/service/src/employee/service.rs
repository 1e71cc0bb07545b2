use std::sync::Arc;

use argon2::{password_hash::{PasswordHasher, SaltString}, Argon2};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{Employee, EmployeeInput, NewEmployee};
use super::repository::EmployeeRepository;
use crate::errors::ServiceError;

/// Employee business service independent of web framework and store.
///
/// Holds nothing but the injected store handle, so separate instances over
/// separate stores never observe each other.
pub struct EmployeeService<R: EmployeeRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: EmployeeRepository + ?Sized> EmployeeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Validate and persist a new employee. `input.id == 0` lets the store pick the id.
    ///
    /// # Examples
    /// ```
    /// use service::employee::{EmployeeService, EmployeeInput, repository::memory::InMemoryEmployeeRepository};
    /// use std::sync::Arc;
    /// let svc = EmployeeService::new(Arc::new(InMemoryEmployeeRepository::new()));
    /// let input = EmployeeInput {
    ///     name: "Alice".into(), gender: "FEMALE".into(), department: "IT".into(),
    ///     designation: "Engineer".into(), email: "alice@example.com".into(),
    ///     password: Some("Secret123".into()), contact: "5550100200".into(),
    ///     salary: Some(5000.0), ..Default::default()
    /// };
    /// let created = tokio_test::block_on(svc.add_employee(input)).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.name, "Alice");
    /// ```
    #[instrument(skip(self, input), fields(id = input.id))]
    pub async fn add_employee(&self, input: EmployeeInput) -> Result<Employee, ServiceError> {
        let profile = input.validate_profile()?;
        let id = match input.id {
            0 => None,
            id if id < 0 => return Err(ServiceError::Validation("id must be positive".into())),
            id => Some(id),
        };
        let password = input
            .validated_password(true)?
            .ok_or_else(|| ServiceError::Validation("password required".into()))?;
        let password_hash = hash_password(password)?;

        let created = self.repo.insert(NewEmployee { id, profile, password_hash }).await?;
        info!(employee_id = created.id, department = %created.department, "employee_added");
        Ok(created)
    }

    /// Every employee currently stored, ascending by id.
    #[instrument(skip(self))]
    pub async fn get_all_employees(&self) -> Result<Vec<Employee>, ServiceError> {
        let all = self.repo.list().await?;
        debug!(count = all.len(), "employees listed");
        Ok(all)
    }

    #[instrument(skip(self))]
    pub async fn get_employee_by_id(&self, id: i32) -> Result<Employee, ServiceError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(&format!("employee {id}")))
    }

    /// Overwrite every field of an existing employee except its id.
    ///
    /// An absent or empty password keeps the stored hash.
    ///
    /// # Examples
    /// ```
    /// use service::employee::{EmployeeService, EmployeeInput, repository::memory::InMemoryEmployeeRepository};
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = EmployeeService::new(Arc::new(InMemoryEmployeeRepository::new()));
    /// let input = EmployeeInput {
    ///     id: 7, name: "Ghost".into(), gender: "MALE".into(), department: "HR".into(),
    ///     designation: "None".into(), email: "ghost@example.com".into(),
    ///     contact: "5550100200".into(), salary: Some(0.0), ..Default::default()
    /// };
    /// let err = tokio_test::block_on(svc.update_employee(input)).unwrap_err();
    /// assert!(matches!(err, ServiceError::NotFound(_)));
    /// ```
    #[instrument(skip(self, input), fields(id = input.id))]
    pub async fn update_employee(&self, input: EmployeeInput) -> Result<Employee, ServiceError> {
        let profile = input.validate_profile()?;
        let new_password = input.validated_password(false)?;
        if input.id <= 0 {
            return Err(ServiceError::Validation("id must be positive".into()));
        }

        let current = self.get_employee_by_id(input.id).await?;
        let password_hash = match new_password {
            Some(p) => hash_password(p)?,
            None => current.password_hash,
        };

        let updated = self
            .repo
            .update(Employee::new(input.id, profile, password_hash))
            .await?
            // deleted between the read and the write
            .ok_or_else(|| ServiceError::not_found(&format!("employee {}", input.id)))?;
        info!(employee_id = updated.id, "employee_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_employee_by_id(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(&format!("employee {id}")));
        }
        info!(employee_id = id, "employee_deleted");
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Validation(format!("password cannot be hashed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::repository::memory::InMemoryEmployeeRepository;
    use argon2::{password_hash::PasswordVerifier, PasswordHash};

    fn service() -> EmployeeService<InMemoryEmployeeRepository> {
        EmployeeService::new(Arc::new(InMemoryEmployeeRepository::new()))
    }

    fn input(id: i32, name: &str) -> EmployeeInput {
        EmployeeInput {
            id,
            name: name.into(),
            gender: "FEMALE".into(),
            department: "IT".into(),
            designation: "Engineer".into(),
            email: "alice@example.com".into(),
            password: Some("Passw0rd!".into()),
            contact: "+44 20 7946 0000".into(),
            salary: Some(6100.0),
        }
    }

    fn verifies(hash: &str, password: &str) -> bool {
        let parsed = PasswordHash::new(hash).unwrap();
        Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
    }

    #[tokio::test]
    async fn add_assigns_id_and_round_trips() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.add_employee(input(0, "Alice")).await?;
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "Alice");
        assert_eq!(svc.get_employee_by_id(1).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn password_is_stored_hashed() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.add_employee(input(0, "Alice")).await?;
        assert_ne!(created.password_hash, "Passw0rd!");
        assert!(verifies(&created.password_hash, "Passw0rd!"));
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_fields_and_is_visible() -> Result<(), anyhow::Error> {
        let svc = service();
        svc.add_employee(input(0, "Alice")).await?;
        let updated = svc.update_employee(input(1, "Alice B.")).await?;
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Alice B.");
        assert_eq!(svc.get_employee_by_id(1).await?.name, "Alice B.");
        Ok(())
    }

    #[tokio::test]
    async fn update_without_password_keeps_hash() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.add_employee(input(0, "Alice")).await?;

        let mut change = input(created.id, "Alice");
        change.password = None;
        change.salary = Some(7000.0);
        let updated = svc.update_employee(change).await?;
        assert_eq!(updated.password_hash, created.password_hash);
        assert_eq!(updated.salary, 7000.0);

        let mut rotate = input(created.id, "Alice");
        rotate.password = Some("NewPassw0rd".into());
        let rotated = svc.update_employee(rotate).await?;
        assert!(verifies(&rotated.password_hash, "NewPassw0rd"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() -> Result<(), anyhow::Error> {
        let svc = service();
        assert!(matches!(svc.get_employee_by_id(42).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_employee_by_id(999).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update_employee(input(5, "Nobody")).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.add_employee(input(0, "Alice")).await?;
        svc.delete_employee_by_id(created.id).await?;
        assert!(matches!(svc.get_employee_by_id(created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_employee_by_id(created.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn deleted_highest_id_stays_gone() -> Result<(), anyhow::Error> {
        let svc = service();
        svc.add_employee(input(0, "A")).await?;
        let b = svc.add_employee(input(0, "B")).await?;
        assert_eq!(b.id, 2);
        svc.delete_employee_by_id(b.id).await?;

        let c = svc.add_employee(input(0, "C")).await?;
        assert_eq!(c.id, 3);
        assert!(matches!(svc.get_employee_by_id(2).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update_employee(input(2, "B again")).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_tracks_creates_and_deletes() -> Result<(), anyhow::Error> {
        let svc = service();
        assert!(svc.get_all_employees().await?.is_empty());
        for n in ["A", "B", "C"] {
            svc.add_employee(input(0, n)).await?;
        }
        assert_eq!(svc.get_all_employees().await?.len(), 3);
        svc.delete_employee_by_id(2).await?;
        let names: Vec<String> = svc.get_all_employees().await?.into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["A", "C"]);
        Ok(())
    }

    #[tokio::test]
    async fn explicit_ids_and_conflicts() -> Result<(), anyhow::Error> {
        let svc = service();
        let created = svc.add_employee(input(25, "Zed")).await?;
        assert_eq!(created.id, 25);
        assert!(matches!(svc.add_employee(input(25, "Zed")).await, Err(ServiceError::Conflict(_))));
        assert!(matches!(svc.add_employee(input(-3, "Neg")).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_store() -> Result<(), anyhow::Error> {
        let svc = service();
        let mut bad = input(0, "Alice");
        bad.email = "not-an-email".into();
        assert!(matches!(svc.add_employee(bad).await, Err(ServiceError::Validation(_))));

        let mut no_pw = input(0, "Alice");
        no_pw.password = None;
        assert!(matches!(svc.add_employee(no_pw).await, Err(ServiceError::Validation(_))));
        assert!(svc.get_all_employees().await?.is_empty());

        svc.add_employee(input(0, "Alice")).await?;
        let mut bad_update = input(1, "Alice");
        bad_update.department = "MARKETING".into();
        assert!(matches!(svc.update_employee(bad_update).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.update_employee(input(0, "Alice")).await, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn services_over_separate_stores_are_isolated() -> Result<(), anyhow::Error> {
        let a = service();
        let b = service();
        a.add_employee(input(0, "OnlyInA")).await?;
        assert_eq!(a.get_all_employees().await?.len(), 1);
        assert!(b.get_all_employees().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn works_behind_a_trait_object() -> Result<(), anyhow::Error> {
        let repo: Arc<dyn EmployeeRepository> = Arc::new(InMemoryEmployeeRepository::new());
        let svc: EmployeeService<dyn EmployeeRepository> = EmployeeService::new(repo);
        let created = svc.add_employee(input(0, "Dyn")).await?;
        assert_eq!(svc.get_employee_by_id(created.id).await?.name, "Dyn");
        Ok(())
    }
}
