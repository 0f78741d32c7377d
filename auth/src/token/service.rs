use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::IdentityClaims;
use super::claims::TokenPayload;
use super::errors::TokenError;
use super::secret::TokenSecret;

/// Issues and verifies signed, time-limited identity tokens.
///
/// Tokens are HS256 JWTs. Holds no mutable state; share it behind an `Arc`.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    expiry: Duration,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Signing secret loaded at startup
    /// * `expiry` - Lifetime of every issued token
    pub fn new(secret: &TokenSecret, expiry: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            expiry,
        }
    }

    /// Issue a token for `claims`, valid from now until now + expiry.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: &IdentityClaims) -> Result<String, TokenError> {
        self.issue_at(claims, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry is not representable, or encoding failed
    pub fn issue_at(
        &self,
        claims: &IdentityClaims,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = now.checked_add_signed(self.expiry).ok_or_else(|| {
            TokenError::EncodingFailed("token expiry is out of range".to_string())
        })?;
        let payload = TokenPayload::new(claims, now.timestamp(), expires_at.timestamp());

        encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return the claims bound at issuance.
    ///
    /// # Errors
    /// * `Malformed` - Not structurally a token, or its payload is incomplete
    /// * `SignatureInvalid` - Signed with another key or algorithm, or tampered with
    /// * `Expired` - Current time is at or past the token's expiry
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against the given clock reading.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<IdentityClaims, TokenError> {
        // Expiry is checked below against our own clock with no leeway.
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        // jsonwebtoken checks the signature before the payload is decoded.
        let payload = decode::<TokenPayload>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::SignatureInvalid
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            })?
            .claims;

        if payload.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(payload.into_claims())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str, expiry: Duration) -> TokenService {
        TokenService::new(&TokenSecret::new(secret).unwrap(), expiry)
    }

    fn claims() -> IdentityClaims {
        IdentityClaims::new(1, "a@b.com")
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service("my_secret_key_at_least_32_bytes_long!", Duration::hours(5));

        let token = tokens.issue(&claims()).expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let verified = tokens.verify(&token).expect("Failed to verify token");
        assert_eq!(verified, claims());
    }

    #[test]
    fn test_issue_with_unrepresentable_expiry() {
        let tokens = service(
            "my_secret_key_at_least_32_bytes_long!",
            Duration::days(365 * 1_000_000),
        );

        assert!(matches!(
            tokens.issue(&claims()),
            Err(TokenError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_verify_expired_token() {
        let tokens = service("my_secret_key_at_least_32_bytes_long!", Duration::seconds(1));
        let issued_at = Utc::now();

        let token = tokens.issue_at(&claims(), issued_at).unwrap();

        assert_eq!(tokens.verify_at(&token, issued_at).unwrap(), claims());
        assert_eq!(
            tokens.verify_at(&token, issued_at + Duration::seconds(1)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            tokens.verify_at(&token, issued_at + Duration::seconds(2)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_verify_long_expired_token_with_real_clock() {
        let tokens = service("my_secret_key_at_least_32_bytes_long!", Duration::hours(5));
        let token = tokens
            .issue_at(&claims(), Utc::now() - Duration::hours(6))
            .unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = service("secret1_at_least_32_bytes_long_key!", Duration::hours(5));
        let verifier = service("secret2_at_least_32_bytes_long_key!", Duration::hours(5));

        let token = issuer.issue(&claims()).unwrap();

        assert_eq!(verifier.verify(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        let issuer = service("secret1_at_least_32_bytes_long_key!", Duration::seconds(1));
        let verifier = service("secret2_at_least_32_bytes_long_key!", Duration::seconds(1));
        let issued_at = Utc::now();

        let token = issuer.issue_at(&claims(), issued_at).unwrap();

        assert_eq!(
            verifier.verify_at(&token, issued_at + Duration::hours(1)),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_verify_tampered_signature() {
        let tokens = service("my_secret_key_at_least_32_bytes_long!", Duration::hours(5));
        let token = tokens.issue(&claims()).unwrap();

        let signature_start = token.rfind('.').unwrap() + 1;
        let position = signature_start + 5;
        let original = token.as_bytes()[position];
        let replacement = if original == b'A' { "B" } else { "A" };

        let mut tampered = token.clone();
        tampered.replace_range(position..position + 1, replacement);

        assert_eq!(tokens.verify(&tampered), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_verify_swapped_payload() {
        let tokens = service("my_secret_key_at_least_32_bytes_long!", Duration::hours(5));
        let victim = tokens.issue(&IdentityClaims::new(2, "victim@b.com")).unwrap();
        let attacker = tokens.issue(&claims()).unwrap();

        let victim_parts: Vec<&str> = victim.split('.').collect();
        let attacker_parts: Vec<&str> = attacker.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            attacker_parts[0], victim_parts[1], attacker_parts[2]
        );

        assert_eq!(tokens.verify(&forged), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_verify_other_algorithm() {
        let secret = "my_secret_key_at_least_32_bytes_long!";
        let tokens = service(secret, Duration::hours(5));
        let now = Utc::now();
        let payload = TokenPayload::new(
            &claims(),
            now.timestamp(),
            (now + Duration::hours(1)).timestamp(),
        );

        let token = encode(
            &Header::new(Algorithm::HS384),
            &payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_verify_malformed_token() {
        let tokens = service("my_secret_key_at_least_32_bytes_long!", Duration::hours(5));

        for token in ["", "not-a-token", "invalid.token.here", "a.b", "a.b.c.d"] {
            assert!(
                matches!(tokens.verify(token), Err(TokenError::Malformed(_))),
                "token {:?} should be malformed",
                token
            );
        }
    }

    #[test]
    fn test_verify_incomplete_payload() {
        let secret = "my_secret_key_at_least_32_bytes_long!";
        let tokens = service(secret, Duration::hours(5));

        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "userId": 1, "exp": Utc::now().timestamp() + 3600 }),
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Malformed(_))));
    }
}
