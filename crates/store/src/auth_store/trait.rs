use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use almacen_auth::TokenRecord;

use crate::error::StoreError;

/// A user row as stored, password hash included.
///
/// This type never leaves the login path; the rest of the system only sees
/// [`almacen_auth::AuthUser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub legajo: String,
}

/// The user and token tables consumed by login and bearer authentication.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Look a user up by exact email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError>;

    /// Persist a freshly minted token. `expires_at = None` never expires.
    async fn insert_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError>;

    /// Resolve a bearer token to its record (user + expiry), if known.
    ///
    /// Expiry is *not* judged here; that is
    /// [`almacen_auth::validate_token_record`]'s job, so the rejection reason
    /// stays precise.
    async fn lookup_token(&self, token: &str) -> Result<Option<TokenRecord>, StoreError>;
}

#[async_trait]
impl<S> AuthStore for Arc<S>
where
    S: AuthStore + ?Sized,
{
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError> {
        (**self).find_user_by_email(email).await
    }

    async fn insert_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        (**self).insert_token(user_id, token, expires_at).await
    }

    async fn lookup_token(&self, token: &str) -> Result<Option<TokenRecord>, StoreError> {
        (**self).lookup_token(token).await
    }
}
