use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::employees::EmployeeResponse;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Write shape for `/employeeapi/add` and `/employeeapi/update`.
/// `id` and `salary` also accept numeric strings.
#[derive(ToSchema)]
pub struct EmployeeInputDoc {
    /// 0 or omitted on add lets the server assign one
    pub id: Option<i32>,
    pub name: String,
    #[schema(example = "MALE")]
    pub gender: String,
    #[schema(example = "SALES")]
    pub department: String,
    pub designation: String,
    pub email: String,
    /// required on add, optional on update
    pub password: Option<String>,
    pub contact: String,
    pub salary: f64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::employees::add,
        crate::routes::employees::list,
        crate::routes::employees::get,
        crate::routes::employees::update,
        crate::routes::employees::delete,
    ),
    components(
        schemas(
            HealthResponse,
            EmployeeInputDoc,
            EmployeeResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "employee")
    )
)]
pub struct ApiDoc;
