use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is not an error; `verify` reports it as `Ok(false)`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password record is corrupt: {0}")]
    CorruptRecord(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}
