//! Service layer: orchestrates repositories, outbound clients and exports
//! independently of the HTTP layer.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod api;
pub mod main;
pub mod regions;
pub mod settings;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// User input was rejected; the message is safe to show.
    #[error("{0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    /// The places search failed; carries the message reported upstream.
    #[error("{0}")]
    Search(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
