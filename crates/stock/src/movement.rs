//! Movement decision logic.
//!
//! A movement is a signed quantity delta applied to one article. Given the
//! row currently held under lock (or its absence), [`decide`] picks exactly
//! one of update/delete/insert or rejects the movement. The caller is
//! responsible for executing the decision inside the same transaction that
//! read the row.

use serde::{Deserialize, Serialize};

use almacen_core::{DomainError, DomainResult};

use crate::item::{StockItem, StockItemId};

/// A validated movement request: a signed delta against one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    articulo: String,
    delta: i64,
}

impl Movement {
    /// Validate and build a movement.
    ///
    /// `articulo` is trimmed; an empty result is rejected. The delta may be
    /// positive, negative or zero here — whether zero is acceptable depends
    /// on the state of the row and is decided in [`decide`].
    pub fn new(articulo: impl Into<String>, delta: i64) -> DomainResult<Self> {
        let articulo = articulo.into().trim().to_string();
        if articulo.is_empty() {
            return Err(DomainError::validation("articulo cannot be empty"));
        }
        Ok(Self { articulo, delta })
    }

    pub fn articulo(&self) -> &str {
        &self.articulo
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }
}

/// What the store must do to the row, determined under lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementDecision {
    /// No row exists: insert one with this quantity.
    Create { cantidad: i64 },
    /// Row exists and the new quantity stays positive: write it.
    ///
    /// A zero delta lands here as a same-value update (accepted no-op).
    Update {
        id: StockItemId,
        previous: i64,
        cantidad: i64,
    },
    /// Row exists and the new quantity is exactly zero: remove it.
    Delete { id: StockItemId, previous: i64 },
}

/// Committed outcome of a movement, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementResult {
    Created {
        id: StockItemId,
        articulo: String,
        cantidad: i64,
    },
    Updated {
        id: StockItemId,
        articulo: String,
        previous: i64,
        delta: i64,
        cantidad: i64,
    },
    Deleted {
        articulo: String,
        previous: i64,
        delta: i64,
    },
}

/// Decide what a movement does to the row currently held under lock.
///
/// The rules, in order:
/// - existing row, `current + delta < 0` → [`DomainError::NegativeStock`]
/// - existing row, `current + delta == 0` → delete
/// - existing row, otherwise → update (zero delta is a no-op update)
/// - no row, `delta <= 0` → [`DomainError::InvalidOperation`]
/// - no row, `delta > 0` → create with `cantidad = delta`
pub fn decide(current: Option<&StockItem>, movement: &Movement) -> DomainResult<MovementDecision> {
    match current {
        Some(item) => {
            let nueva = item
                .cantidad
                .checked_add(movement.delta())
                .ok_or_else(|| DomainError::validation("delta out of range"))?;

            if nueva < 0 {
                return Err(DomainError::negative_stock(item.cantidad, movement.delta()));
            }

            if nueva == 0 {
                Ok(MovementDecision::Delete {
                    id: item.id,
                    previous: item.cantidad,
                })
            } else {
                Ok(MovementDecision::Update {
                    id: item.id,
                    previous: item.cantidad,
                    cantidad: nueva,
                })
            }
        }
        None => {
            if movement.delta() <= 0 {
                return Err(DomainError::invalid_operation(
                    "cannot create article with non-positive delta",
                ));
            }
            Ok(MovementDecision::Create {
                cantidad: movement.delta(),
            })
        }
    }
}
