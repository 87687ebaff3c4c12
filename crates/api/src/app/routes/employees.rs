use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use roster_core::EmployeeId;
use roster_directory::EmployeeDetails;

use crate::app::errors;
use crate::app::services::AppServices;

/// `POST /employee`. Any `employeeId` in the body is ignored.
pub async fn create_employee(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<EmployeeDetails>, JsonRejection>,
) -> axum::response::Response {
    let Json(details) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.employees().create(details).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.employees().read(&EmployeeId::from(id)).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `PUT /employee/{id}`. The path id wins over the body.
pub async fn update_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<EmployeeDetails>, JsonRejection>,
) -> axum::response::Response {
    let Json(details) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.employees().update(&EmployeeId::from(id), details).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
