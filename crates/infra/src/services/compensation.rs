//! Compensation records: validated create (last write wins) and lookup.

use tracing::debug;

use roster_core::{DomainError, EmployeeId, Entity};
use roster_directory::{Compensation, CompensationRecord, Employee};

use super::require_employee;
use crate::document_store::DocumentStore;
use crate::error::ServiceError;

pub struct CompensationService<E, C> {
    employees: E,
    compensations: C,
}

impl<E, C> CompensationService<E, C>
where
    E: DocumentStore<EmployeeId, Employee>,
    C: DocumentStore<EmployeeId, CompensationRecord>,
{
    pub fn new(employees: E, compensations: C) -> Self {
        Self {
            employees,
            compensations,
        }
    }

    /// Current compensation of `employee_id`.
    ///
    /// `NotFound` when the employee is unknown, and also when the employee
    /// exists but has no compensation on file.
    pub async fn retrieve(&self, employee_id: &EmployeeId) -> Result<Compensation, ServiceError> {
        debug!(employee_id = %employee_id, "retrieving compensation");

        require_employee(&self.employees, employee_id).await?;

        let record = self
            .compensations
            .get(employee_id)
            .await?
            .ok_or_else(|| DomainError::not_found("compensation", employee_id.as_str()))?;

        Ok(Compensation::from(&record))
    }

    /// Validate and store a compensation, replacing any previous one.
    ///
    /// Checks run in order: employee exists, salary present and parses,
    /// date present and parses. The response echoes the submitted text.
    pub async fn create(
        &self,
        employee_id: &EmployeeId,
        salary: Option<&str>,
        effective_date: Option<&str>,
    ) -> Result<Compensation, ServiceError> {
        debug!(employee_id = %employee_id, "creating compensation");

        require_employee(&self.employees, employee_id).await?;

        let record = CompensationRecord::parse(employee_id.clone(), salary, effective_date)?;
        self.compensations.upsert(record.id().clone(), record).await?;

        // Both fields are present once parsing succeeded.
        Ok(Compensation {
            employee_id: employee_id.clone(),
            salary: salary.unwrap_or_default().to_string(),
            effective_date: effective_date.unwrap_or_default().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::document_store::InMemoryDocumentStore;
    use roster_directory::EmployeeDetails;

    type Employees = Arc<InMemoryDocumentStore<EmployeeId, Employee>>;
    type Records = Arc<InMemoryDocumentStore<EmployeeId, CompensationRecord>>;

    const PETE: &str = "62c1084e-6e34-4630-93fd-9153afb65309";

    async fn service() -> (CompensationService<Employees, Records>, Records) {
        let employees: Employees = Arc::new(InMemoryDocumentStore::new());
        let pete = Employee::new(EmployeeId::from(PETE), EmployeeDetails::default());
        employees.upsert(pete.employee_id.clone(), pete).await.unwrap();

        let records: Records = Arc::new(InMemoryDocumentStore::new());
        (CompensationService::new(employees, records.clone()), records)
    }

    fn pete() -> EmployeeId {
        EmployeeId::from(PETE)
    }

    fn assert_validation(err: ServiceError, needle: &str) {
        match err {
            ServiceError::Domain(DomainError::Validation(msg)) => {
                assert!(msg.contains(needle), "{msg:?} should mention {needle:?}")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_then_retrieve_round_trips_text() {
        let (svc, _) = service().await;

        let created = svc.create(&pete(), Some("200000"), Some("2024-09-08")).await.unwrap();
        assert_eq!(created.salary, "200000");

        let read = svc.retrieve(&pete()).await.unwrap();
        assert_eq!(read.employee_id, pete());
        assert_eq!(read.salary, "200000");
        assert_eq!(read.effective_date, "2024-09-08");
    }

    #[tokio::test]
    async fn fractional_salary_keeps_its_scale() {
        let (svc, _) = service().await;
        svc.create(&pete(), Some("200000.50"), Some("2024-09-08")).await.unwrap();
        assert_eq!(svc.retrieve(&pete()).await.unwrap().salary, "200000.50");
    }

    #[tokio::test]
    async fn second_create_overwrites_first() {
        let (svc, records) = service().await;
        svc.create(&pete(), Some("100"), Some("2024-01-01")).await.unwrap();
        svc.create(&pete(), Some("200"), Some("2025-01-01")).await.unwrap();

        let read = svc.retrieve(&pete()).await.unwrap();
        assert_eq!(read.salary, "200");
        assert_eq!(read.effective_date, "2025-01-01");
        assert_eq!(records.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn retrieve_without_record_is_not_found() {
        let (svc, _) = service().await;
        assert!(svc.retrieve(&pete()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn unknown_employee_is_not_found_for_both_operations() {
        let (svc, records) = service().await;
        let ghost = EmployeeId::from("iaman-employeethat-doesnot-exist");

        assert!(svc.retrieve(&ghost).await.unwrap_err().is_not_found());
        // Existence is checked before the (invalid) fields.
        assert!(svc.create(&ghost, Some("bad"), Some("bad")).await.unwrap_err().is_not_found());
        assert!(records.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_salary_is_rejected_before_date() {
        let (svc, records) = service().await;
        let err = svc.create(&pete(), Some("200000.5.5"), Some("2024-09-088")).await.unwrap_err();
        assert_validation(err, "salary");
        assert!(records.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn absent_fields_are_checked_after_existence() {
        let (svc, records) = service().await;
        let ghost = EmployeeId::from("iaman-employeethat-doesnot-exist");

        let err = svc.create(&ghost, Some("200000"), None).await.unwrap_err();
        assert!(err.is_not_found());

        let err = svc.create(&pete(), None, Some("2024-09-088")).await.unwrap_err();
        assert_validation(err, "salary");

        let err = svc.create(&pete(), Some("200000"), None).await.unwrap_err();
        assert_validation(err, "effective date");
        assert!(records.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_date_is_rejected() {
        let (svc, _) = service().await;
        let err = svc.create(&pete(), Some("200000.5"), Some("2024-09-088")).await.unwrap_err();
        assert_validation(err, "effective date");
    }
}
