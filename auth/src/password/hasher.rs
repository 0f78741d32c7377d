use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use super::record::PasswordRecord;

/// Password hashing implementation.
///
/// Argon2id with a fresh random salt per hash. Hashing and verification are
/// deliberately expensive; async callers should run them on a blocking
/// worker rather than on the request executor.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher with the Argon2 default work factor.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a password hasher with a tuned work factor.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters are outside the Argon2 bounds
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password.
    ///
    /// Two calls with the same password yield different records.
    ///
    /// # Errors
    /// * `HashingFailed` - The hashing primitive failed
    pub fn hash(&self, password: &str) -> Result<PasswordRecord, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordRecord::new(hash.to_string()))
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored record.
    ///
    /// The salt and work factor are read from the record. The digest
    /// comparison is constant time.
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `CorruptRecord` - The record cannot be parsed or uses an unsupported scheme
    pub fn verify(&self, password: &str, record: &PasswordRecord) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(record.as_str())
            .map_err(|e| PasswordError::CorruptRecord(e.to_string()))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::CorruptRecord(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let record = hasher.hash(password).expect("Failed to hash password");
        assert!(record.as_str().starts_with("$argon2id$"));

        assert!(hasher
            .verify(password, &record)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &record)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();

        let first = hasher.hash("same_password").expect("Failed to hash password");
        let second = hasher.hash("same_password").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("same_password", &first).unwrap());
        assert!(hasher.verify("same_password", &second).unwrap());
    }

    #[test]
    fn test_distinct_passwords_do_not_verify() {
        let hasher = fast_hasher();
        let passwords = ["", "a", "password", "Password", "password ", "pässwörd"];

        for (i, stored) in passwords.iter().enumerate() {
            let record = hasher.hash(stored).unwrap();
            for (j, candidate) in passwords.iter().enumerate() {
                assert_eq!(hasher.verify(candidate, &record).unwrap(), i == j);
            }
        }
    }

    #[test]
    fn test_verify_uses_record_params() {
        let record = fast_hasher().hash("password").unwrap();
        assert!(PasswordHasher::new().verify("password", &record).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", &PasswordRecord::from_stored("invalid_hash"));
        assert!(matches!(result, Err(PasswordError::CorruptRecord(_))));
    }

    #[test]
    fn test_verify_unsupported_scheme() {
        let hasher = PasswordHasher::new();
        let record = PasswordRecord::from_stored("$pbkdf2-sha256$i=1000$c2FsdHNhbHQ$aGFzaGhhc2hoYXNo");
        assert!(matches!(
            hasher.verify("password", &record),
            Err(PasswordError::CorruptRecord(_))
        ));
    }

    #[test]
    fn test_with_params_rejects_invalid() {
        let result = PasswordHasher::with_params(1, 0, 0);
        assert!(matches!(result, Err(PasswordError::InvalidParams(_))));
    }
}
