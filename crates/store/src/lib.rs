//! `almacen-store` — storage layer.
//!
//! Two store boundaries live here, each as a trait with a Postgres
//! implementation for production and an in-memory implementation for
//! tests/dev:
//!
//! - [`StockStore`]: the stock table, including the transactional movement
//!   path (row lock, decision, single write, commit).
//! - [`AuthStore`]: the user and token tables consumed by the login and
//!   bearer-authentication paths.
//!
//! The SQL schema is in `schema.sql` at the crate root.

pub mod auth_store;
pub mod error;
pub mod pg;
pub mod stock_store;

pub use auth_store::{AuthStore, InMemoryAuthStore, PgAuthStore, StoredUser};
pub use error::StoreError;
pub use stock_store::{InMemoryStockStore, PgStockStore, StockStore};
