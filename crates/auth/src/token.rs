//! Opaque bearer tokens.
//!
//! Tokens are 32 random bytes, hex-encoded, held in a store table together
//! with the owning user and an optional expiry instant. Validating a token
//! record is deterministic; minting one is the only place randomness enters
//! this crate.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use almacen_core::{DomainError, DomainResult, UnauthorizedReason};

/// Identity attached to a valid token: everything a handler may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    /// Employee file number, echoed back to the client on login.
    pub legajo: String,
}

/// A token row as loaded from the store, not yet judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub user: AuthUser,
    /// `None` means the token never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Mint a fresh opaque token: 32 random bytes, hex-encoded (64 chars).
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Judge a loaded token record against the clock.
///
/// The lookup result is passed in as an `Option` so "token not in the store"
/// and "token expired" stay distinguishable in the rejection reason.
pub fn validate_token_record(
    record: Option<TokenRecord>,
    now: DateTime<Utc>,
) -> DomainResult<AuthUser> {
    let record = record.ok_or(DomainError::unauthorized(UnauthorizedReason::Unknown))?;

    if let Some(expires_at) = record.expires_at {
        if expires_at < now {
            return Err(DomainError::unauthorized(UnauthorizedReason::Expired));
        }
    }

    Ok(record.user)
}
