use serde::{Deserialize, Serialize};

/// Identifier of a stock row, assigned by the store on creation and never
/// reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockItemId(pub i64);

impl StockItemId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for StockItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for StockItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A live stock row: one article with its current on-hand quantity.
///
/// Invariant: a persisted `StockItem` always has `cantidad >= 1`. A quantity
/// of zero means the row is deleted, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: StockItemId,
    /// Business key: unique, case-sensitive exact match.
    pub articulo: String,
    pub cantidad: i64,
}
