// src/infrastructure/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

// Infrastructure failures surface to callers as data-access errors
impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::LockPoisoned(msg) => DomainError::Repository(msg),
        }
    }
}
