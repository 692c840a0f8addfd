// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid search query: {0}")]
    InvalidSearchQuery(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Other error: {0}")]
    Other(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Prefix the error message with additional context
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            DomainError::InvalidSearchQuery(msg) => {
                DomainError::InvalidSearchQuery(format!("{}: {}", context.into(), msg))
            }
            DomainError::Repository(msg) => {
                DomainError::Repository(format!("{}: {}", context.into(), msg))
            }
            DomainError::Other(msg) => {
                DomainError::Other(format!("{}: {}", context.into(), msg))
            }
        }
    }
}
