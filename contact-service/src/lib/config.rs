use std::env;

use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenSecret;
use auth::TokenSecretError;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// `secret` has no default: a missing secret fails configuration loading.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

/// Argon2 work factor.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

/// Upper bound on token lifetime: one year.
const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_hours() -> i64 {
    5
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtConfig {
    pub fn token_secret(&self) -> Result<TokenSecret, TokenSecretError> {
        TokenSecret::new(self.secret.clone())
    }

    pub fn expiry(&self) -> Result<chrono::TimeDelta, ConfigError> {
        chrono::TimeDelta::try_hours(self.expiration_hours).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.expiration_hours is out of range: {}",
                self.expiration_hours
            ))
        })
    }
}

impl PasswordConfig {
    pub fn hasher(&self) -> Result<PasswordHasher, PasswordError> {
        PasswordHasher::with_params(self.memory_kib, self.iterations, self.parallelism)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings that would make the service insecure or unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }

        if self.jwt.expiration_hours <= 0 || self.jwt.expiration_hours > MAX_EXPIRATION_HOURS {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                MAX_EXPIRATION_HOURS, self.jwt.expiration_hours
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiration_hours: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/contacts".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { http_port: 3000 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_hours,
            },
            password: PasswordConfig::default(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let config = config("test-secret-key-for-jwt-signing-at-least-32-bytes", 5);
        assert!(config.validate().is_ok());
        assert_eq!(config.jwt.expiry().unwrap(), chrono::Duration::hours(5));
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        assert!(config("", 5).validate().is_err());
        assert!(config("  ", 5).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_expiry() {
        let secret = "test-secret-key-for-jwt-signing-at-least-32-bytes";
        assert!(config(secret, 0).validate().is_err());
        assert!(config(secret, -1).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_excessive_expiry() {
        let secret = "test-secret-key-for-jwt-signing-at-least-32-bytes";
        assert!(config(secret, 24 * 365).validate().is_ok());
        assert!(config(secret, 24 * 365 + 1).validate().is_err());
        assert!(config(secret, 1_000_000_000_000).validate().is_err());
    }

    #[test]
    fn test_expiry_out_of_range_is_an_error() {
        let secret = "test-secret-key-for-jwt-signing-at-least-32-bytes";
        assert!(config(secret, i64::MAX).jwt.expiry().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = config("do-not-print-me", 5);
        assert!(!format!("{:?}", config).contains("do-not-print-me"));
    }

    #[test]
    fn test_default_password_config_builds_hasher() {
        assert!(PasswordConfig::default().hasher().is_ok());
    }
}
