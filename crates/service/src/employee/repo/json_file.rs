use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;

use crate::employee::domain::{Employee, NewEmployee};
use crate::employee::repository::{memory::EmployeeTable, EmployeeRepository};
use crate::errors::ServiceError;
use crate::storage::json_store::JsonStore;

/// Employee store persisted as one JSON document: the rows keyed by id plus the id high-water mark.
pub struct JsonFileEmployeeRepository {
    store: Arc<JsonStore<EmployeeTable>>,
}

impl JsonFileEmployeeRepository {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonStore::open(path).await? })
    }
}

#[async_trait]
impl EmployeeRepository for JsonFileEmployeeRepository {
    async fn insert(&self, new: NewEmployee) -> Result<Employee, ServiceError> {
        self.store.update(|table| table.insert(new)).await
    }

    async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        Ok(self.store.read(EmployeeTable::list).await)
    }

    async fn get(&self, id: i32) -> Result<Option<Employee>, ServiceError> {
        Ok(self.store.read(|table| table.get(id)).await)
    }

    async fn update(&self, employee: Employee) -> Result<Option<Employee>, ServiceError> {
        self.store.update(|table| Ok(table.replace(employee))).await
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        self.store.update(|table| Ok(table.remove(id))).await
    }
}
