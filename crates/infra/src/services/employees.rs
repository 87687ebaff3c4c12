//! Employee records: create, read, update.

use tracing::debug;

use roster_core::{EmployeeId, Entity};
use roster_directory::{Employee, EmployeeDetails};

use super::require_employee;
use crate::document_store::DocumentStore;
use crate::error::ServiceError;

pub struct EmployeeService<E> {
    employees: E,
}

impl<E> EmployeeService<E>
where
    E: DocumentStore<EmployeeId, Employee>,
{
    pub fn new(employees: E) -> Self {
        Self { employees }
    }

    /// Store a new employee under a freshly generated id.
    pub async fn create(&self, details: EmployeeDetails) -> Result<Employee, ServiceError> {
        let employee = Employee::new(EmployeeId::generate(), details);
        debug!(
            employee_id = %employee.id(),
            name = %employee.full_name(),
            "creating employee"
        );

        self.employees
            .upsert(employee.id().clone(), employee.clone())
            .await?;
        Ok(employee)
    }

    pub async fn read(&self, id: &EmployeeId) -> Result<Employee, ServiceError> {
        debug!(employee_id = %id, "reading employee");
        require_employee(&self.employees, id).await
    }

    /// Replace an existing employee's attributes. The id is taken from
    /// `id`, never from the payload.
    pub async fn update(
        &self,
        id: &EmployeeId,
        details: EmployeeDetails,
    ) -> Result<Employee, ServiceError> {
        debug!(employee_id = %id, "updating employee");

        require_employee(&self.employees, id).await?;

        let employee = Employee::new(id.clone(), details);
        self.employees
            .upsert(employee.id().clone(), employee.clone())
            .await?;
        Ok(employee)
    }
}
