//! Keyed document storage (employee and compensation collections).
//!
//! One record per key, last write wins. Backends: in-memory (dev/tests)
//! and a Postgres JSONB table.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

use roster_core::EmployeeId;
use roster_directory::{CompensationRecord, Employee};

pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use r#trait::{DocumentStore, DocumentStoreError};

/// Employee collection (`findById` / `save` collaborator).
pub type EmployeeStore = dyn DocumentStore<EmployeeId, Employee>;

/// Compensation collection, keyed by employee id.
pub type CompensationStore = dyn DocumentStore<EmployeeId, CompensationRecord>;
