//! Password hashing and verification.
//!
//! Stored hashes are bcrypt digests, so credentials hashed by earlier
//! deployments keep verifying unchanged.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(bcrypt::BcryptError),

    #[error("stored password hash is not a valid bcrypt digest")]
    BadStoredHash,
}

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, PasswordError> {
    bcrypt::hash(plain, cost).map_err(PasswordError::Hash)
}

/// Check a plaintext password against a stored bcrypt digest.
///
/// A mismatch is `Ok(false)`; `Err` means the stored digest itself is
/// unusable and should be treated as a server-side fault, not as bad
/// credentials.
pub fn verify_password(plain: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(plain, stored_hash).map_err(|_| PasswordError::BadStoredHash)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the suite fast; production callers pass DEFAULT_COST.
    const TEST_COST: u32 = 4;

    #[test]
    fn round_trip_verifies() {
        let hash = hash_password("admin123", TEST_COST).unwrap();
        assert!(verify_password("admin123", &hash).unwrap());
        assert!(!verify_password("admin124", &hash).unwrap());
    }

    #[test]
    fn garbage_stored_hash_is_an_error_not_a_mismatch() {
        assert!(matches!(
            verify_password("whatever", "not-a-bcrypt-hash"),
            Err(PasswordError::BadStoredHash)
        ));
    }
}
