use std::sync::Arc;

use async_trait::async_trait;

use almacen_stock::{Movement, MovementResult, StockItem};

use crate::error::StoreError;

/// The stock table boundary.
///
/// ## Movement semantics
///
/// `apply()` is the only writer path for quantities. Implementations must:
/// - run the whole read-decide-write sequence atomically, with the affected
///   row held exclusively for the duration (concurrent movements on the same
///   articulo serialize; movements on different articulos proceed
///   independently)
/// - perform exactly one insert, update or delete per successful call, and
///   zero writes on any failure path
/// - never leave a row with `cantidad <= 0` observable (zero deletes the
///   row, negative aborts)
///
/// ## Listing semantics
///
/// `list()` returns every live row ordered by articulo ascending, with the
/// store's default read consistency. No locks are taken.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// All live stock rows, ordered by articulo ascending.
    async fn list(&self) -> Result<Vec<StockItem>, StoreError>;

    /// Atomically apply one movement and report the committed outcome.
    async fn apply(&self, movement: Movement) -> Result<MovementResult, StoreError>;
}

#[async_trait]
impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    async fn list(&self) -> Result<Vec<StockItem>, StoreError> {
        (**self).list().await
    }

    async fn apply(&self, movement: Movement) -> Result<MovementResult, StoreError> {
        (**self).apply(movement).await
    }
}
