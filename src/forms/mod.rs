//! Form definitions backing the lead finder routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod main;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("API key is required")]
    MissingApiKey,

    #[error("keyword is required")]
    MissingKeyword,

    #[error("province and city are required")]
    MissingLocation,
}
