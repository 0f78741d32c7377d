use std::fmt;

use super::errors::TokenSecretError;

/// Signing key for identity tokens.
///
/// Loaded once at startup and handed to the `TokenService`. The value is
/// never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone)]
pub struct TokenSecret(Vec<u8>);

impl TokenSecret {
    /// Create a signing secret.
    ///
    /// # Errors
    /// * `Missing` - Secret is empty or whitespace only
    pub fn new(secret: impl Into<String>) -> Result<Self, TokenSecretError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(TokenSecretError::Missing);
        }

        Ok(Self(secret.into_bytes()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_secret() {
        assert_eq!(TokenSecret::new("").unwrap_err(), TokenSecretError::Missing);
        assert_eq!(TokenSecret::new("   ").unwrap_err(), TokenSecretError::Missing);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = TokenSecret::new("super-secret-value").unwrap();
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("super-secret-value"));
        assert_eq!(secret.as_bytes(), b"super-secret-value");
    }
}
