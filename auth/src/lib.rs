//! Authentication core
//!
//! - Password hashing (Argon2id)
//! - Signed, time-limited identity tokens (HS256 JWT)
//! - Request gating: `Authorization: Bearer <token>` to a typed identity
//!
//! Nothing here performs I/O or holds mutable state. The signing secret is
//! passed in explicitly at construction.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let record = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &record).unwrap());
//! assert!(!hasher.verify("other_password", &record).unwrap());
//! ```
//!
//! ## Tokens and the Gate
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AuthGate, IdentityClaims, TokenSecret, TokenService};
//!
//! let secret = TokenSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let tokens = Arc::new(TokenService::new(&secret, chrono::Duration::hours(5)));
//!
//! let token = tokens.issue(&IdentityClaims::new(1, "a@b.com")).unwrap();
//!
//! let gate = AuthGate::new(Arc::clone(&tokens));
//! let context = gate.authenticate(Some(&format!("Bearer {}", token))).unwrap();
//! assert_eq!(context.user_id, 1);
//! assert!(gate.authenticate(None).is_err());
//! ```

pub mod authenticator;
pub mod gate;
pub mod password;
pub mod token;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use gate::extract_credential;
pub use gate::AuthGate;
pub use gate::AuthenticatedContext;
pub use gate::Unauthenticated;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordRecord;
pub use token::IdentityClaims;
pub use token::TokenError;
pub use token::TokenSecret;
pub use token::TokenSecretError;
pub use token::TokenService;
