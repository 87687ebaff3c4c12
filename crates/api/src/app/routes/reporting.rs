use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use roster_core::EmployeeId;

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn get_reporting_structure(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.reporting().resolve(&EmployeeId::from(id)).await {
        Ok(structure) => (StatusCode::OK, Json(structure)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
