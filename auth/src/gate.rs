use std::sync::Arc;

use thiserror::Error;

use crate::token::TokenError;
use crate::token::TokenService;

const BEARER_SCHEME: &str = "Bearer";

/// Identity of the caller of a single in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedContext {
    pub user_id: i64,
    pub email: String,
}

/// Authentication failure surfaced at the request boundary.
///
/// The message never says which verification step failed. The underlying
/// token error stays available through [`Unauthenticated::token_error`] for
/// server-side logging.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Unauthenticated {
    #[error("missing credential")]
    MissingCredential,

    #[error("invalid or expired credential")]
    InvalidCredential(#[source] TokenError),
}

impl Unauthenticated {
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            Unauthenticated::MissingCredential => None,
            Unauthenticated::InvalidCredential(e) => Some(e),
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts exactly `Bearer <token>`: case-sensitive scheme, one space, and
/// a non-empty token with no further spaces. Anything else yields `None`.
pub fn extract_credential(header_value: Option<&str>) -> Option<&str> {
    let mut parts = header_value?.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(BEARER_SCHEME), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// Turns a raw `Authorization` header into a verified identity.
#[derive(Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Authenticate a request from its `Authorization` header value.
    ///
    /// # Errors
    /// * `MissingCredential` - No well-formed bearer credential
    /// * `InvalidCredential` - Token is malformed, forged or expired
    pub fn authenticate(
        &self,
        header_value: Option<&str>,
    ) -> Result<AuthenticatedContext, Unauthenticated> {
        let token = extract_credential(header_value).ok_or(Unauthenticated::MissingCredential)?;

        let claims = self
            .tokens
            .verify(token)
            .map_err(Unauthenticated::InvalidCredential)?;

        Ok(AuthenticatedContext {
            user_id: claims.user_id,
            email: claims.email,
        })
    }
}
