//! Errors surfaced by the directory services.

use thiserror::Error;

use roster_core::DomainError;

use crate::document_store::DocumentStoreError;

/// Service operation error: either a domain outcome (not found, bad input)
/// or a storage failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Domain(e) if e.is_not_found())
    }
}
