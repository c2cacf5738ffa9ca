//! Stock domain module.
//!
//! This crate contains the business rules for stock movements, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). The
//! storage layer loads the current row, asks [`decide`] what to do with it,
//! and executes exactly that.

pub mod item;
pub mod movement;

pub use item::{StockItem, StockItemId};
pub use movement::{decide, Movement, MovementDecision, MovementResult};
