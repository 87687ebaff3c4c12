//! Directory services: orchestrate document stores + domain rules.

pub mod compensation;
pub mod employees;
pub mod reporting;

pub use compensation::CompensationService;
pub use employees::EmployeeService;
pub use reporting::ReportingStructureResolver;

use roster_core::{DomainError, EmployeeId};
use roster_directory::Employee;

use crate::document_store::DocumentStore;
use crate::error::ServiceError;

/// Fetch an employee or fail with `NotFound`.
pub(crate) async fn require_employee<S>(store: &S, id: &EmployeeId) -> Result<Employee, ServiceError>
where
    S: DocumentStore<EmployeeId, Employee> + ?Sized,
{
    store
        .get(id)
        .await?
        .ok_or_else(|| DomainError::not_found("employee", id.as_str()).into())
}
