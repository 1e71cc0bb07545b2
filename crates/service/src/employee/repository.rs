use async_trait::async_trait;

use super::domain::{Employee, NewEmployee};
use crate::errors::ServiceError;

/// Persistence seam for employee records, keyed by integer id.
///
/// Stores report absence through `Option`/`bool`; turning that into
/// `NotFound` is the service's job.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Persist a new record. An explicit id that is already taken yields `Conflict`.
    async fn insert(&self, new: NewEmployee) -> Result<Employee, ServiceError>;
    /// All records ordered by ascending id.
    async fn list(&self) -> Result<Vec<Employee>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Employee>, ServiceError>;
    /// Overwrite the record with `employee.id`; `None` when it does not exist.
    async fn update(&self, employee: Employee) -> Result<Option<Employee>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// In-memory repository for tests, doc examples and the `memory` backend
pub mod memory {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use tokio::sync::RwLock;

    /// Rows plus the highest id ever handed out, so deleted ids are never reissued.
    /// Serialized as-is by the JSON file backend.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct EmployeeTable {
        #[serde(default)]
        last_id: i32,
        #[serde(default)]
        rows: BTreeMap<i32, Employee>,
    }

    impl EmployeeTable {
        fn next_id(&self) -> Result<i32, ServiceError> {
            let high = self.rows.keys().next_back().copied().unwrap_or(0).max(self.last_id);
            high.checked_add(1).ok_or_else(|| ServiceError::Db("employee id space exhausted".into()))
        }

        /// Caller holds the write guard, so id assignment is atomic.
        pub fn insert(&mut self, new: NewEmployee) -> Result<Employee, ServiceError> {
            let id = match new.id {
                Some(id) if self.rows.contains_key(&id) => {
                    return Err(ServiceError::Conflict(format!("employee {id} already exists")));
                }
                Some(id) => id,
                None => self.next_id()?,
            };
            self.last_id = self.last_id.max(id);
            let employee = new.with_id(id);
            self.rows.insert(id, employee.clone());
            Ok(employee)
        }

        pub fn list(&self) -> Vec<Employee> { self.rows.values().cloned().collect() }

        pub fn get(&self, id: i32) -> Option<Employee> { self.rows.get(&id).cloned() }

        pub fn replace(&mut self, employee: Employee) -> Option<Employee> {
            let slot = self.rows.get_mut(&employee.id)?;
            *slot = employee.clone();
            Some(employee)
        }

        pub fn remove(&mut self, id: i32) -> bool { self.rows.remove(&id).is_some() }
    }

    #[derive(Default)]
    pub struct InMemoryEmployeeRepository {
        table: RwLock<EmployeeTable>,
    }

    impl InMemoryEmployeeRepository {
        pub fn new() -> Self { Self::default() }
    }

    #[async_trait]
    impl EmployeeRepository for InMemoryEmployeeRepository {
        async fn insert(&self, new: NewEmployee) -> Result<Employee, ServiceError> {
            self.table.write().await.insert(new)
        }

        async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
            Ok(self.table.read().await.list())
        }

        async fn get(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
            Ok(self.table.read().await.get(id))
        }

        async fn update(&self, employee: Employee) -> Result<Option<Employee>, ServiceError> {
            Ok(self.table.write().await.replace(employee))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.table.write().await.remove(id))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::new_employee;
    use super::memory::InMemoryEmployeeRepository;
    use super::*;

    #[tokio::test]
    async fn assigns_increasing_ids_after_max() -> Result<(), anyhow::Error> {
        let repo = InMemoryEmployeeRepository::new();
        let a = repo.insert(new_employee(None, "A")).await?;
        assert_eq!(a.id, 1);
        let b = repo.insert(new_employee(Some(10), "B")).await?;
        assert_eq!(b.id, 10);
        let c = repo.insert(new_employee(None, "C")).await?;
        assert_eq!(c.id, 11);
        let ids: Vec<i32> = repo.list().await?.into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 10, 11]);
        Ok(())
    }

    #[tokio::test]
    async fn explicit_id_conflict() -> Result<(), anyhow::Error> {
        let repo = InMemoryEmployeeRepository::new();
        repo.insert(new_employee(Some(3), "A")).await?;
        let err = repo.insert(new_employee(Some(3), "B")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(repo.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_report_absence() -> Result<(), anyhow::Error> {
        let repo = InMemoryEmployeeRepository::new();
        let missing = new_employee(None, "Ghost").with_id(99);
        assert!(repo.update(missing).await?.is_none());
        assert!(!repo.delete(99).await?);

        let a = repo.insert(new_employee(None, "A")).await?;
        let mut changed = a.clone();
        changed.designation = "Controller".into();
        assert_eq!(repo.update(changed.clone()).await?, Some(changed.clone()));
        assert_eq!(repo.get(a.id).await?, Some(changed));
        assert!(repo.delete(a.id).await?);
        assert!(repo.get(a.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reissued() -> Result<(), anyhow::Error> {
        let repo = InMemoryEmployeeRepository::new();
        repo.insert(new_employee(None, "A")).await?;
        let b = repo.insert(new_employee(None, "B")).await?;
        assert!(repo.delete(b.id).await?);

        let c = repo.insert(new_employee(None, "C")).await?;
        assert_eq!(c.id, 3);
        assert!(repo.get(b.id).await?.is_none());

        // an explicit id raises the high-water mark too
        repo.insert(new_employee(Some(40), "D")).await?;
        assert!(repo.delete(40).await?);
        assert_eq!(repo.insert(new_employee(None, "E")).await?.id, 41);
        Ok(())
    }

    #[test]
    fn table_round_trips_its_counter_through_json() {
        let mut table = memory::EmployeeTable::default();
        table.insert(new_employee(None, "A")).unwrap();
        table.insert(new_employee(None, "B")).unwrap();
        assert!(table.remove(2));

        let json = serde_json::to_string(&table).unwrap();
        let mut restored: memory::EmployeeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.insert(new_employee(None, "C")).unwrap().id, 3);
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() -> Result<(), anyhow::Error> {
        let repo = std::sync::Arc::new(InMemoryEmployeeRepository::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.insert(new_employee(None, &format!("E{i}"))).await }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await??.id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
        Ok(())
    }
}
