//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Why a bearer credential was rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnauthorizedReason {
    /// No `Authorization` header was present.
    Missing,
    /// The header was present but not a usable `Bearer <token>` value.
    Malformed,
    /// The token is not known to the store.
    Unknown,
    /// The token exists but its expiry instant has passed.
    Expired,
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, rejections). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A movement would drive a quantity below zero.
    #[error("stock quantity cannot be negative (current {current}, attempted delta {attempted})")]
    NegativeStock { current: i64, attempted: i64 },

    /// An operation that is never valid, e.g. creating an article with a
    /// non-positive delta.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// Authorization failure at the domain boundary.
    #[error("unauthorized: {0:?}")]
    Unauthorized(UnauthorizedReason),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn negative_stock(current: i64, attempted: i64) -> Self {
        Self::NegativeStock { current, attempted }
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn unauthorized(reason: UnauthorizedReason) -> Self {
        Self::Unauthorized(reason)
    }
}
