use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use roster_core::EmployeeId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn get_compensation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.compensation().retrieve(&EmployeeId::from(id)).await {
        Ok(compensation) => (StatusCode::OK, Json(compensation)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// An unreadable body counts as one with no fields, so an unknown employee
/// is still a 404 and a known one gets the missing-salary 400.
pub async fn create_compensation(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::CreateCompensationRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match body {
        Ok(Json(b)) => b,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "unreadable compensation body");
            dto::CreateCompensationRequest::default()
        }
    };

    let salary = body.salary_text();
    let effective_date = body.effective_date_text();
    let created = services
        .compensation()
        .create(
            &EmployeeId::from(id),
            salary.as_deref(),
            effective_date.as_deref(),
        )
        .await;

    match created {
        Ok(compensation) => (StatusCode::OK, Json(compensation)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
