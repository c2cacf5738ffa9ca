use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use almacen_auth::{AuthUser, TokenRecord};
use async_trait::async_trait;

use super::r#trait::{AuthStore, StoredUser};
use crate::error::StoreError;

/// In-memory auth store. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAuthStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<StoredUser>,
    tokens: HashMap<String, IssuedToken>,
    next_user_id: i64,
}

#[derive(Debug)]
struct IssuedToken {
    user_id: i64,
    expires_at: Option<DateTime<Utc>>,
}

impl InMemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user, returning its assigned id.
    pub fn add_user(
        &self,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        legajo: impl Into<String>,
    ) -> i64 {
        let mut inner = self.inner.write().expect("auth store lock poisoned");
        inner.next_user_id += 1;
        let id = inner.next_user_id;
        inner.users.push(StoredUser {
            id,
            email: email.into(),
            password_hash: password_hash.into(),
            legajo: legajo.into(),
        });
        id
    }
}

#[async_trait]
impl AuthStore for InMemoryAuthStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError> {
        let inner = self.inner.read().expect("auth store lock poisoned");
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("auth store lock poisoned");
        inner.tokens.insert(
            token.to_string(),
            IssuedToken {
                user_id,
                expires_at,
            },
        );
        Ok(())
    }

    async fn lookup_token(&self, token: &str) -> Result<Option<TokenRecord>, StoreError> {
        let inner = self.inner.read().expect("auth store lock poisoned");
        let Some(issued) = inner.tokens.get(token) else {
            return Ok(None);
        };
        let Some(user) = inner.users.iter().find(|u| u.id == issued.user_id) else {
            return Ok(None);
        };
        Ok(Some(TokenRecord {
            user: AuthUser {
                id: user.id,
                email: user.email.clone(),
                legajo: user.legajo.clone(),
            },
            expires_at: issued.expires_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn user_lookup_is_exact_match() {
        let store = InMemoryAuthStore::new();
        store.add_user("alex@tecmade.com", "$2y$04$hash", "L-0042");

        assert!(store
            .find_user_by_email("alex@tecmade.com")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_user_by_email("Alex@tecmade.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn issued_token_resolves_to_its_user() {
        let store = InMemoryAuthStore::new();
        let id = store.add_user("alex@tecmade.com", "$2y$04$hash", "L-0042");

        let expires = Utc::now() + Duration::hours(1);
        store
            .insert_token(id, "tok-abc", Some(expires))
            .await
            .unwrap();

        let record = store.lookup_token("tok-abc").await.unwrap().unwrap();
        assert_eq!(record.user.id, id);
        assert_eq!(record.user.legajo, "L-0042");
        assert_eq!(record.expires_at, Some(expires));

        assert!(store.lookup_token("tok-other").await.unwrap().is_none());
    }
}
