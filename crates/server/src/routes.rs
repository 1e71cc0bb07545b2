use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::employee::{EmployeeRepository, EmployeeService};

use crate::openapi::ApiDoc;

pub mod employees;

/// Shared handler state: the employee service over whichever store was configured.
#[derive(Clone)]
pub struct ServerState {
    pub employees: Arc<EmployeeService<dyn EmployeeRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { employees: Arc::new(EmployeeService::new(repo)) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, employee API and docs.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let employee_api = Router::new()
        .route("/add", post(employees::add))
        .route("/all", get(employees::list))
        .route("/get/:id", get(employees::get))
        .route("/update", put(employees::update))
        .route("/delete/:id", delete(employees::delete));

    Router::new()
        .route("/health", get(health))
        .nest("/employeeapi", employee_api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request with method and path, INFO level
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
