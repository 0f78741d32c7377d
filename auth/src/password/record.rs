use std::fmt;

/// One-way password record in PHC string format.
///
/// The salt and the work factor are embedded in the encoding, so a record
/// is self-describing and can be verified without any other input than the
/// candidate password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordRecord(String);

impl PasswordRecord {
    pub(crate) fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Wrap a record read back from storage.
    ///
    /// The value is not parsed here; a malformed record surfaces as
    /// `PasswordError::CorruptRecord` when it is verified.
    pub fn from_stored(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Get the encoded record for persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordRecord(<redacted>)")
    }
}
