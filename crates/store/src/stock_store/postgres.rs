//! Postgres-backed stock store.
//!
//! The movement path runs inside one transaction per call:
//!
//! 1. `SELECT ... FOR UPDATE` locks the article's row (if any) for the rest
//!    of the transaction, so concurrent movements on the same articulo queue
//!    behind each other while other articulos stay untouched.
//! 2. [`almacen_stock::decide`] turns the locked state plus the delta into
//!    exactly one of update/delete/insert, or a domain rejection.
//! 3. The single write runs and the transaction commits. Every failure path
//!    rolls back before surfacing, so no partial write is ever observable.
//!
//! ## Create race
//!
//! `FOR UPDATE` on an absent row locks nothing, so two concurrent creates of
//! the same new articulo can both reach the insert. The unique constraint on
//! `stock.articulo` arbitrates: the loser's insert fails with `23505`, its
//! transaction is rolled back, and the movement is retried once from the
//! top — the second attempt finds the winner's row and takes the update
//! path. A second consecutive unique violation surfaces as a storage
//! failure instead of looping.

use sqlx::{PgPool, Row};
use tracing::instrument;

use almacen_stock::{decide, Movement, MovementDecision, MovementResult, StockItem, StockItemId};
use async_trait::async_trait;

use super::r#trait::StockStore;
use crate::error::StoreError;
use crate::pg::{is_unique_violation, map_sqlx_error};

/// Postgres-backed stock store. Cheap to clone; all clones share the pool.
#[derive(Debug, Clone)]
pub struct PgStockStore {
    pool: PgPool,
}

/// Outcome of one transactional attempt, before retry arbitration.
enum AttemptError {
    /// The insert branch lost the create race (`23505` on articulo).
    LostCreateRace,
    Store(StoreError),
}

impl AttemptError {
    fn into_store(self) -> StoreError {
        match self {
            AttemptError::LostCreateRace => StoreError::Storage(
                "unique violation on stock.articulo persisted after retry".to_string(),
            ),
            AttemptError::Store(e) => e,
        }
    }
}

impl PgStockStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One full transactional attempt at the movement.
    async fn apply_once(&self, movement: &Movement) -> Result<MovementResult, AttemptError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AttemptError::Store(map_sqlx_error("begin_transaction", e)))?;

        let row = sqlx::query(
            r#"
            SELECT idstock, cantidad
            FROM stock
            WHERE articulo = $1
            FOR UPDATE
            "#,
        )
        .bind(movement.articulo())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AttemptError::Store(map_sqlx_error("select_stock_for_update", e)))?;

        let current = match row {
            Some(row) => {
                let id: i64 = row
                    .try_get("idstock")
                    .map_err(|e| AttemptError::Store(map_sqlx_error("select_stock_for_update", e)))?;
                let cantidad: i64 = row
                    .try_get("cantidad")
                    .map_err(|e| AttemptError::Store(map_sqlx_error("select_stock_for_update", e)))?;
                Some(StockItem {
                    id: StockItemId(id),
                    articulo: movement.articulo().to_string(),
                    cantidad,
                })
            }
            None => None,
        };

        let decision = match decide(current.as_ref(), movement) {
            Ok(d) => d,
            Err(domain) => {
                tx.rollback()
                    .await
                    .map_err(|e| AttemptError::Store(map_sqlx_error("rollback", e)))?;
                return Err(AttemptError::Store(StoreError::Domain(domain)));
            }
        };

        match decision {
            MovementDecision::Update {
                id,
                previous,
                cantidad,
            } => {
                sqlx::query("UPDATE stock SET cantidad = $1 WHERE idstock = $2")
                    .bind(cantidad)
                    .bind(id.as_i64())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AttemptError::Store(map_sqlx_error("update_stock", e)))?;

                tx.commit()
                    .await
                    .map_err(|e| AttemptError::Store(map_sqlx_error("commit_transaction", e)))?;

                Ok(MovementResult::Updated {
                    id,
                    articulo: movement.articulo().to_string(),
                    previous,
                    delta: movement.delta(),
                    cantidad,
                })
            }
            MovementDecision::Delete { id, previous } => {
                sqlx::query("DELETE FROM stock WHERE idstock = $1")
                    .bind(id.as_i64())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| AttemptError::Store(map_sqlx_error("delete_stock", e)))?;

                tx.commit()
                    .await
                    .map_err(|e| AttemptError::Store(map_sqlx_error("commit_transaction", e)))?;

                Ok(MovementResult::Deleted {
                    articulo: movement.articulo().to_string(),
                    previous,
                    delta: movement.delta(),
                })
            }
            MovementDecision::Create { cantidad } => {
                let inserted = sqlx::query(
                    r#"
                    INSERT INTO stock (articulo, cantidad)
                    VALUES ($1, $2)
                    RETURNING idstock
                    "#,
                )
                .bind(movement.articulo())
                .bind(cantidad)
                .fetch_one(&mut *tx)
                .await;

                let row = match inserted {
                    Ok(row) => row,
                    Err(e) if is_unique_violation(&e) => {
                        tx.rollback()
                            .await
                            .map_err(|e| AttemptError::Store(map_sqlx_error("rollback", e)))?;
                        return Err(AttemptError::LostCreateRace);
                    }
                    Err(e) => {
                        return Err(AttemptError::Store(map_sqlx_error("insert_stock", e)));
                    }
                };

                let id: i64 = row
                    .try_get("idstock")
                    .map_err(|e| AttemptError::Store(map_sqlx_error("insert_stock", e)))?;

                tx.commit()
                    .await
                    .map_err(|e| AttemptError::Store(map_sqlx_error("commit_transaction", e)))?;

                Ok(MovementResult::Created {
                    id: StockItemId(id),
                    articulo: movement.articulo().to_string(),
                    cantidad,
                })
            }
        }
    }
}

#[async_trait]
impl StockStore for PgStockStore {
    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<StockItem>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT idstock, articulo, cantidad
            FROM stock
            ORDER BY articulo ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_stock", e))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row
                .try_get("idstock")
                .map_err(|e| map_sqlx_error("list_stock", e))?;
            let articulo: String = row
                .try_get("articulo")
                .map_err(|e| map_sqlx_error("list_stock", e))?;
            let cantidad: i64 = row
                .try_get("cantidad")
                .map_err(|e| map_sqlx_error("list_stock", e))?;
            items.push(StockItem {
                id: StockItemId(id),
                articulo,
                cantidad,
            });
        }
        Ok(items)
    }

    #[instrument(
        skip(self, movement),
        fields(articulo = %movement.articulo(), delta = movement.delta()),
        err
    )]
    async fn apply(&self, movement: Movement) -> Result<MovementResult, StoreError> {
        match self.apply_once(&movement).await {
            Err(AttemptError::LostCreateRace) => {
                tracing::debug!(
                    articulo = %movement.articulo(),
                    "create race lost, retrying as update"
                );
                self.apply_once(&movement)
                    .await
                    .map_err(AttemptError::into_store)
            }
            other => other.map_err(AttemptError::into_store),
        }
    }
}
