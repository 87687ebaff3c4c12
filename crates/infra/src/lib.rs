//! Infrastructure layer: document stores, directory services, seeding.

pub mod document_store;
pub mod error;
pub mod observer;
pub mod seed;
pub mod services;

pub use document_store::{
    CompensationStore, DocumentStore, DocumentStoreError, EmployeeStore, InMemoryDocumentStore,
    PostgresDocumentStore,
};
pub use error::ServiceError;
pub use observer::TracingObserver;
pub use services::{CompensationService, EmployeeService, ReportingStructureResolver};
