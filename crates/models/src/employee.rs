use chrono::Utc;
use sea_orm::{
    entity::prelude::*, ConnectionTrait, DatabaseBackend, DatabaseConnection, QueryOrder, Set, Statement,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub department: String,
    pub designation: String,
    pub email: String,
    pub password_hash: String,
    pub contact: String,
    #[sea_orm(column_type = "Double")]
    pub salary: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values written on insert and update; `id` and timestamps are managed here.
#[derive(Clone, Debug, PartialEq)]
pub struct EmployeeFields {
    pub name: String,
    pub gender: String,
    pub department: String,
    pub designation: String,
    pub email: String,
    pub password_hash: String,
    pub contact: String,
    pub salary: f64,
}

impl EmployeeFields {
    fn apply(self, am: &mut ActiveModel) {
        am.name = Set(self.name);
        am.gender = Set(self.gender);
        am.department = Set(self.department);
        am.designation = Set(self.designation);
        am.email = Set(self.email);
        am.password_hash = Set(self.password_hash);
        am.contact = Set(self.contact);
        am.salary = Set(self.salary);
    }
}

fn new_active_model(id: Option<i32>, fields: EmployeeFields) -> ActiveModel {
    let now = Utc::now().into();
    let mut am = ActiveModel { created_at: Set(now), updated_at: Set(now), ..Default::default() };
    if let Some(id) = id {
        am.id = Set(id);
    }
    fields.apply(&mut am);
    am
}

/// Insert a row. `None` lets the serial column pick the id.
pub async fn create(db: &DatabaseConnection, id: Option<i32>, fields: EmployeeFields) -> Result<Model, ModelError> {
    if let Some(id) = id {
        if Entity::find_by_id(id).one(db).await?.is_some() {
            return Err(ModelError::Conflict(format!("employee {id} already exists")));
        }
    }
    let created = new_active_model(id, fields).insert(db).await?;
    if id.is_some() {
        sync_id_sequence(db).await?;
    }
    Ok(created)
}

/// Move the serial sequence past any explicitly inserted ids.
async fn sync_id_sequence(db: &DatabaseConnection) -> Result<(), ModelError> {
    if db.get_database_backend() != DatabaseBackend::Postgres {
        return Ok(());
    }
    let sql = "SELECT setval(pg_get_serial_sequence('employee', 'id'), GREATEST((SELECT MAX(id) FROM employee), 1))";
    db.execute(Statement::from_string(DatabaseBackend::Postgres, sql.to_owned())).await?;
    Ok(())
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Overwrite every column except `id` and `created_at`; `None` when the row is missing.
pub async fn update(db: &DatabaseConnection, id: i32, fields: EmployeeFields) -> Result<Option<Model>, ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    fields.apply(&mut am);
    am.updated_at = Set(Utc::now().into());
    Ok(Some(am.update(db).await?))
}

/// Hard delete; returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
