//! Postgres-backed auth store.
//!
//! Plain single-statement queries against `usuarios` and `tokens`; the
//! token lookup joins back to the user so one round trip yields everything
//! the middleware needs.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;

use almacen_auth::{AuthUser, TokenRecord};
use async_trait::async_trait;

use super::r#trait::{AuthStore, StoredUser};
use crate::error::StoreError;
use crate::pg::map_sqlx_error;

/// Postgres-backed auth store. Cheap to clone; all clones share the pool.
#[derive(Debug, Clone)]
pub struct PgAuthStore {
    pool: PgPool,
}

impl PgAuthStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthStore for PgAuthStore {
    #[instrument(skip(self), err)]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, legajo
            FROM usuarios
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user_by_email", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(StoredUser {
            id: row
                .try_get("id")
                .map_err(|e| map_sqlx_error("find_user_by_email", e))?,
            email: row
                .try_get("email")
                .map_err(|e| map_sqlx_error("find_user_by_email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| map_sqlx_error("find_user_by_email", e))?,
            legajo: row
                .try_get("legajo")
                .map_err(|e| map_sqlx_error("find_user_by_email", e))?,
        }))
    }

    #[instrument(skip(self, token), err)]
    async fn insert_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO tokens (usuario_id, token, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_token", e))?;

        Ok(())
    }

    #[instrument(skip(self, token), err)]
    async fn lookup_token(&self, token: &str) -> Result<Option<TokenRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.email, u.legajo, t.expires_at
            FROM tokens t
            INNER JOIN usuarios u ON t.usuario_id = u.id
            WHERE t.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("lookup_token", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(TokenRecord {
            user: AuthUser {
                id: row
                    .try_get("id")
                    .map_err(|e| map_sqlx_error("lookup_token", e))?,
                email: row
                    .try_get("email")
                    .map_err(|e| map_sqlx_error("lookup_token", e))?,
                legajo: row
                    .try_get("legajo")
                    .map_err(|e| map_sqlx_error("lookup_token", e))?,
            },
            expires_at: row
                .try_get("expires_at")
                .map_err(|e| map_sqlx_error("lookup_token", e))?,
        }))
    }
}
