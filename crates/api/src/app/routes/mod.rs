use axum::{
    routing::{get, post},
    Router,
};

pub mod compensation;
pub mod employees;
pub mod reporting;
pub mod system;

/// Router for the directory endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/employee", post(employees::create_employee))
        .route(
            "/employee/:id",
            get(employees::get_employee).put(employees::update_employee),
        )
        .route(
            "/compensation/:id",
            get(compensation::get_compensation).post(compensation::create_compensation),
        )
        .route("/reporting-structure/:id", get(reporting::get_reporting_structure))
}
