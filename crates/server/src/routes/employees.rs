use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use service::employee::{Employee, EmployeeInput};
use tracing::info;
use utoipa::ToSchema;

use crate::{errors::JsonApiError, routes::ServerState};

/// Employee as returned over HTTP; the password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: i32,
    pub name: String,
    #[schema(example = "FEMALE")]
    pub gender: String,
    #[schema(example = "IT")]
    pub department: String,
    pub designation: String,
    pub email: String,
    pub contact: String,
    pub salary: f64,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            name: e.name,
            gender: e.gender.as_str().to_string(),
            department: e.department.as_str().to_string(),
            designation: e.designation,
            email: e.email,
            contact: e.contact,
            salary: e.salary,
        }
    }
}

#[utoipa::path(
    post, path = "/employeeapi/add", tag = "employee",
    request_body = crate::openapi::EmployeeInputDoc,
    responses(
        (status = 200, description = "Created", body = EmployeeResponse),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Id already taken")
    )
)]
pub async fn add(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<EmployeeResponse>, JsonApiError> {
    let Json(input) = payload?;
    let created = state.employees.add_employee(input).await?;
    info!(id = created.id, "created employee");
    Ok(Json(created.into()))
}

#[utoipa::path(
    get, path = "/employeeapi/all", tag = "employee",
    responses(
        (status = 200, description = "List OK", body = [EmployeeResponse]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<EmployeeResponse>>, JsonApiError> {
    let all = state.employees.get_all_employees().await?;
    Ok(Json(all.into_iter().map(EmployeeResponse::from).collect()))
}

#[utoipa::path(
    get, path = "/employeeapi/get/{id}", tag = "employee",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "OK", body = EmployeeResponse),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<EmployeeResponse>, JsonApiError> {
    let Path(id) = path?;
    let found = state.employees.get_employee_by_id(id).await?;
    Ok(Json(found.into()))
}

#[utoipa::path(
    put, path = "/employeeapi/update", tag = "employee",
    request_body = crate::openapi::EmployeeInputDoc,
    responses(
        (status = 200, description = "Updated", body = EmployeeResponse),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<EmployeeResponse>, JsonApiError> {
    let Json(input) = payload?;
    let updated = state.employees.update_employee(input).await?;
    info!(id = updated.id, "updated employee");
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete, path = "/employeeapi/delete/{id}", tag = "employee",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Deleted", body = String),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<(StatusCode, String), JsonApiError> {
    let Path(id) = path?;
    state.employees.delete_employee_by_id(id).await?;
    info!(id, "deleted employee");
    Ok((StatusCode::OK, format!("Employee with ID {id} deleted successfully")))
}
