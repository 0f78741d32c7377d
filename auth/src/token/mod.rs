pub mod claims;
pub mod errors;
pub mod secret;
pub mod service;

pub use claims::IdentityClaims;
pub use errors::TokenError;
pub use errors::TokenSecretError;
pub use secret::TokenSecret;
pub use service::TokenService;
