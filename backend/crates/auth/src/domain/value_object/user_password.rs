//! User Password Value Object
//!
//! Domain wrappers over `platform::password`: the clear text a request
//! carries, and the digest the model gateway stores.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(4).unwrap();
//! let raw = RawPassword::new("MySecurePass123!");
//! let hashed = UserPassword::from_raw(&raw, &hasher).unwrap();
//! assert!(hashed.verify(&raw, &hasher).unwrap());
//! ```

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from a request payload
///
/// Memory is zeroized when dropped. No policy is applied here: the payload
/// only has to carry the field.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password, safe to persist
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with a fresh salt
    pub fn from_raw(raw: &RawPassword, hasher: &PasswordHasher) -> AuthResult<Self> {
        Ok(Self(hasher.hash(raw.inner())?))
    }

    /// Wrap a digest read back from storage
    pub fn from_stored(digest: impl Into<String>) -> AuthResult<Self> {
        Ok(Self(HashedPassword::from_hash_string(digest)?))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_string(self) -> String {
        self.0.into_string()
    }

    /// Compare a raw password against this digest in constant time
    pub fn verify(&self, raw: &RawPassword, hasher: &PasswordHasher) -> AuthResult<bool> {
        Ok(hasher.verify(raw.inner(), &self.0)?)
    }

    pub fn needs_rehash(&self, hasher: &PasswordHasher) -> bool {
        hasher.needs_rehash(&self.0)
    }

    /// [`from_raw`](Self::from_raw) on the blocking thread pool
    pub async fn hash_blocking(raw: RawPassword, hasher: PasswordHasher) -> AuthResult<Self> {
        run_blocking(move || Self::from_raw(&raw, &hasher)).await
    }

    /// [`verify`](Self::verify) on the blocking thread pool
    pub async fn verify_blocking(
        &self,
        raw: RawPassword,
        hasher: PasswordHasher,
    ) -> AuthResult<bool> {
        let digest = self.clone();
        run_blocking(move || digest.verify(&raw, &hasher)).await
    }
}

/// bcrypt is CPU-bound; keep it off the async worker threads
async fn run_blocking<T, F>(task: F) -> AuthResult<T>
where
    F: FnOnce() -> AuthResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AuthError::Internal(format!("Password task failed: {e}")))?
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("TestPassword123!");
        let hashed = UserPassword::from_raw(&raw, &hasher()).unwrap();

        assert_ne!(hashed.as_str(), "TestPassword123!");
        assert!(hashed.verify(&raw, &hasher()).unwrap());
        assert!(!hashed.verify(&RawPassword::new("WrongPassword123!"), &hasher()).unwrap());
    }

    #[test]
    fn test_stored_digest_roundtrip() {
        let raw = RawPassword::new("TestPassword123!");
        let stored = UserPassword::from_raw(&raw, &hasher()).unwrap().into_string();

        let restored = UserPassword::from_stored(stored).unwrap();
        assert!(restored.verify(&raw, &hasher()).unwrap());
        assert!(!restored.needs_rehash(&hasher()));
    }

    #[tokio::test]
    async fn test_blocking_hash_and_verify() {
        let hashed = UserPassword::hash_blocking(RawPassword::new("TestPassword123!"), hasher())
            .await
            .unwrap();

        assert!(
            hashed
                .verify_blocking(RawPassword::new("TestPassword123!"), hasher())
                .await
                .unwrap()
        );
        assert!(
            !hashed
                .verify_blocking(RawPassword::new("WrongPassword123!"), hasher())
                .await
                .unwrap()
        );
    }

    #[test]
    fn test_malformed_stored_digest() {
        let err = UserPassword::from_stored("plaintext-in-db").unwrap_err();
        assert!(matches!(err, AuthError::Password(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!");
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = UserPassword::from_raw(&raw, &hasher()).unwrap();
        assert!(format!("{:?}", hashed).contains("HASH"));
        assert_eq!(hashed.to_string(), "[HASHED_PASSWORD]");
    }
}
