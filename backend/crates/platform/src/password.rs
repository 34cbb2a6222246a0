//! Password Hashing and Verification
//!
//! bcrypt-based password handling with:
//! - Random per-hash salt (two hashes of one password never match)
//! - Adaptive cost factor injected at construction
//! - Constant-time comparison
//! - Zeroization of clear text on drop
//!
//! Stored digests use the modular crypt format (`$2b$10$<salt><hash>`), which
//! carries its own cost so old digests keep verifying after the cost changes.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Default bcrypt cost (2^10 rounds)
pub const DEFAULT_HASH_COST: u32 = 10;

/// Lowest cost bcrypt accepts
pub const MIN_HASH_COST: u32 = 4;

/// Highest cost bcrypt accepts
pub const MAX_HASH_COST: u32 = 31;

/// Length of a modular crypt bcrypt digest
const BCRYPT_DIGEST_LEN: usize = 60;

const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Cost outside bcrypt's accepted range
    #[error("Hash cost must be between 4 and 31 (got {0})")]
    InvalidCost(u32),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored digest is not a bcrypt digest
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<String> for ClearTextPassword {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// bcrypt digest in modular crypt format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored digest (e.g. from the database)
    ///
    /// Only the shape is checked here; a digest that passes but is still
    /// corrupt fails later in [`PasswordHasher::verify`].
    pub fn from_hash_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        parse_cost(&hash).ok_or(PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Cost the digest was produced with
    pub fn cost(&self) -> u32 {
        parse_cost(&self.hash).unwrap_or_default()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// bcrypt hasher with a fixed cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&cost) {
            return Err(PasswordHashError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash with a fresh random salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let hash = bcrypt::hash(password.as_bytes(), self.cost)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        Ok(HashedPassword { hash })
    }

    /// Check a password against a stored digest
    ///
    /// The digest's own cost and salt are used, so this works for digests
    /// produced under any cost. bcrypt compares in constant time.
    pub fn verify(
        &self,
        password: &ClearTextPassword,
        hashed: &HashedPassword,
    ) -> Result<bool, PasswordHashError> {
        bcrypt::verify(password.as_bytes(), hashed.as_str())
            .map_err(|_| PasswordHashError::InvalidHashFormat)
    }

    /// True when the digest was produced with a different cost
    pub fn needs_rehash(&self, hashed: &HashedPassword) -> bool {
        hashed.cost() != self.cost
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: DEFAULT_HASH_COST,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Extract the cost from a `$2?$NN$...` digest, `None` if malformed
fn parse_cost(hash: &str) -> Option<u32> {
    if hash.len() != BCRYPT_DIGEST_LEN || !BCRYPT_PREFIXES.iter().any(|p| hash.starts_with(p)) {
        return None;
    }

    let cost_part = hash.get(4..6)?;
    if hash.as_bytes().get(6) != Some(&b'$') {
        return None;
    }

    let cost = cost_part.parse::<u32>().ok()?;
    (MIN_HASH_COST..=MAX_HASH_COST).contains(&cost).then_some(cost)
}

// ============================================================================
// Tests
// ============================================================================
