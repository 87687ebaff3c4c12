//! Initial employee data.

use thiserror::Error;
use tracing::info;

use roster_core::{EmployeeId, Entity};
use roster_directory::Employee;

use crate::document_store::{DocumentStore, DocumentStoreError};

/// Bundled reference hierarchy (JSON array of employee records).
pub const DEFAULT_EMPLOYEES: &str = include_str!("../../../data/employee_database.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}

/// Parse `json` and upsert every employee. Returns how many were written.
pub async fn seed_employees<S>(store: &S, json: &str) -> Result<usize, SeedError>
where
    S: DocumentStore<EmployeeId, Employee> + ?Sized,
{
    let employees: Vec<Employee> = serde_json::from_str(json)?;
    let count = employees.len();
    for employee in employees {
        store.upsert(employee.id().clone(), employee).await?;
    }
    info!(count, "seeded employee store");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_store::InMemoryDocumentStore;

    #[tokio::test]
    async fn bundled_seed_loads_reference_hierarchy() {
        let store = InMemoryDocumentStore::new();
        let n = seed_employees(&store, DEFAULT_EMPLOYEES).await.unwrap();
        assert_eq!(n, 5);

        let john = store
            .get(&EmployeeId::from("16a596ae-edd3-4847-99fe-c4518e82c86f"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(john.full_name(), "John Lennon");
        assert_eq!(john.direct_reports.len(), 2);
    }

    #[tokio::test]
    async fn malformed_seed_is_rejected() {
        let store = InMemoryDocumentStore::<EmployeeId, Employee>::new();
        let err = seed_employees(&store, "{not json").await.unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }
}
