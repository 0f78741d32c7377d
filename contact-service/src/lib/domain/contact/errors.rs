use thiserror::Error;

use crate::domain::contact::models::ContactId;
use crate::domain::user::errors::EmailError;

/// Error for ContactId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactIdError {
    #[error("Invalid contact id: {0}")]
    InvalidFormat(String),
}

/// Error for name field validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Error for SIREN number validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SirenError {
    #[error("SIREN number must contain exactly 9 digits")]
    InvalidFormat,
}

/// Top-level error type for all contact-related operations
#[derive(Debug, Clone, Error)]
pub enum ContactError {
    #[error("Invalid contact ID: {0}")]
    InvalidContactId(#[from] ContactIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid SIREN number: {0}")]
    InvalidSiren(#[from] SirenError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Contact is missing required field: {0}")]
    IncompleteContact(&'static str),

    #[error("Contact not found: {0}")]
    NotFound(ContactId),

    #[error("A contact with this email already exists: {0}")]
    EmailAlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
