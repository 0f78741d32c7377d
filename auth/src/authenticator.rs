use std::sync::Arc;

use crate::gate::AuthGate;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::PasswordRecord;
use crate::token::IdentityClaims;
use crate::token::TokenError;
use crate::token::TokenService;

/// Authentication coordinator combining password verification and token issuance.
///
/// The password operations are CPU and memory heavy. Async callers run them
/// on a blocking worker.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    tokens: Arc<TokenService>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Hasher with the configured work factor
    /// * `tokens` - Token service holding the signing secret
    pub fn new(password_hasher: PasswordHasher, tokens: TokenService) -> Self {
        Self {
            password_hasher,
            tokens: Arc::new(tokens),
        }
    }

    /// Gate sharing this authenticator's token service.
    pub fn gate(&self) -> AuthGate {
        AuthGate::new(Arc::clone(&self.tokens))
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<PasswordRecord, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored record.
    pub fn verify_password(
        &self,
        password: &str,
        record: &PasswordRecord,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, record)
    }

    /// Issue a token without password verification, e.g. right after registration.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token(&self, claims: &IdentityClaims) -> Result<String, TokenError> {
        self.tokens.issue(claims)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `record` - Stored password record
    /// * `claims` - Identity to bind into the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored record is unreadable
    /// * `Token` - Token generation failed
    pub fn login(
        &self,
        password: &str,
        record: &PasswordRecord,
        claims: &IdentityClaims,
    ) -> Result<String, AuthenticationError> {
        if !self.password_hasher.verify(password, record)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.tokens.issue(claims)?)
    }
}
