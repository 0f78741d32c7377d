use serde::Deserialize;
use serde::Serialize;

/// Identity bound into a token at issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub user_id: i64,
    pub email: String,
}

impl IdentityClaims {
    pub fn new(user_id: i64, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

/// Token payload as it appears on the wire.
///
/// Every field is required: a payload missing any of them does not decode,
/// so claims are never default-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenPayload {
    pub user_id: i64,
    pub email: String,
    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl TokenPayload {
    pub fn new(claims: &IdentityClaims, issued_at: i64, expires_at: i64) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email.clone(),
            iat: issued_at,
            exp: expires_at,
        }
    }

    /// A token is expired from its `exp` second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn into_claims(self) -> IdentityClaims {
        IdentityClaims {
            user_id: self.user_id,
            email: self.email,
        }
    }
}
