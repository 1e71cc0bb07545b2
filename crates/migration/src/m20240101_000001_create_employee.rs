//! Create `employee` table.
//! One row per employee; `id` is a serial key that may also be supplied by callers.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string_len(Employee::Name, 100).not_null())
                    .col(string_len(Employee::Gender, 16).not_null())
                    .col(string_len(Employee::Department, 32).not_null())
                    .col(string_len(Employee::Designation, 100).not_null())
                    .col(string_len(Employee::Email, 254).not_null())
                    .col(string_len(Employee::PasswordHash, 255).not_null())
                    .col(string_len(Employee::Contact, 32).not_null())
                    .col(double(Employee::Salary).not_null())
                    .col(timestamp_with_time_zone(Employee::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Employee::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Employee {
    Table,
    Id,
    Name,
    Gender,
    Department,
    Designation,
    Email,
    PasswordHash,
    Contact,
    Salary,
    CreatedAt,
    UpdatedAt,
}
