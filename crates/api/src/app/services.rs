//! Service wiring: pick a store backend, seed it, and build the directory
//! services on top.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use roster_directory::ResolveObserver;
use roster_infra::document_store::postgres::{self, COMPENSATIONS, EMPLOYEES};
use roster_infra::seed::{seed_employees, SeedError, DEFAULT_EMPLOYEES};
use roster_infra::{
    CompensationService, CompensationStore, DocumentStoreError, EmployeeService, EmployeeStore,
    InMemoryDocumentStore, PostgresDocumentStore, ReportingStructureResolver, TracingObserver,
};

use crate::config::{AppConfig, StoreBackend};

pub type SharedEmployeeStore = Arc<EmployeeStore>;
pub type SharedCompensationStore = Arc<CompensationStore>;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open document store: {0}")]
    Store(#[from] DocumentStoreError),

    #[error("failed to seed employee store: {0}")]
    Seed(#[from] SeedError),
}

/// Everything the handlers need, shared behind one `Arc`.
pub struct AppServices {
    employees: EmployeeService<SharedEmployeeStore>,
    compensation: CompensationService<SharedEmployeeStore, SharedCompensationStore>,
    reporting: ReportingStructureResolver<SharedEmployeeStore>,
}

impl AppServices {
    pub fn new(
        employees: SharedEmployeeStore,
        compensations: SharedCompensationStore,
        observer: Arc<dyn ResolveObserver>,
    ) -> Self {
        Self {
            employees: EmployeeService::new(employees.clone()),
            compensation: CompensationService::new(employees.clone(), compensations),
            reporting: ReportingStructureResolver::new(employees, observer),
        }
    }

    /// Empty in-memory stores with the tracing observer.
    pub fn in_memory() -> (Self, SharedEmployeeStore) {
        let employees: SharedEmployeeStore = Arc::new(InMemoryDocumentStore::new());
        let compensations: SharedCompensationStore = Arc::new(InMemoryDocumentStore::new());
        let services = Self::new(employees.clone(), compensations, Arc::new(TracingObserver));
        (services, employees)
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let (services, employees) = match &config.backend {
            StoreBackend::InMemory => {
                info!("using in-memory document stores");
                Self::in_memory()
            }
            StoreBackend::Postgres {
                database_url,
                max_connections,
            } => {
                info!(max_connections, "using postgres document stores");
                let pool = postgres::connect(database_url, *max_connections).await?;
                postgres::ensure_schema(&pool).await?;

                let employees: SharedEmployeeStore =
                    Arc::new(PostgresDocumentStore::new(pool.clone(), EMPLOYEES));
                let compensations: SharedCompensationStore =
                    Arc::new(PostgresDocumentStore::new(pool, COMPENSATIONS));
                let services =
                    Self::new(employees.clone(), compensations, Arc::new(TracingObserver));
                (services, employees)
            }
        };

        if config.seed {
            seed_employees(employees.as_ref(), DEFAULT_EMPLOYEES).await?;
        }

        Ok(services)
    }

    pub fn employees(&self) -> &EmployeeService<SharedEmployeeStore> {
        &self.employees
    }

    pub fn compensation(&self) -> &CompensationService<SharedEmployeeStore, SharedCompensationStore> {
        &self.compensation
    }

    pub fn reporting(&self) -> &ReportingStructureResolver<SharedEmployeeStore> {
        &self.reporting
    }
}
