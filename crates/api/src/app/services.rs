//! Store wiring behind the handlers.

use std::sync::Arc;

use chrono::Duration;

use almacen_store::{AuthStore, PgAuthStore, PgStockStore, StockStore, StoreError};

use crate::config::Config;

/// Everything the handlers need, passed via `Extension<Arc<AppServices>>`.
pub struct AppServices {
    pub stock: Arc<dyn StockStore>,
    pub auth: Arc<dyn AuthStore>,
    /// Lifetime of freshly issued tokens; `None` issues tokens that never
    /// expire.
    pub token_ttl: Option<Duration>,
}

impl AppServices {
    pub fn new(
        stock: Arc<dyn StockStore>,
        auth: Arc<dyn AuthStore>,
        token_ttl: Option<Duration>,
    ) -> Self {
        Self {
            stock,
            auth,
            token_ttl,
        }
    }

    /// Production wiring: one Postgres pool shared by both stores.
    pub async fn postgres(config: &Config) -> Result<Self, StoreError> {
        let pool = almacen_store::pg::connect(&config.database_url).await?;
        Ok(Self::new(
            Arc::new(PgStockStore::new(pool.clone())),
            Arc::new(PgAuthStore::new(pool)),
            token_ttl_from_secs(config.token_ttl_secs),
        ))
    }
}

/// `0` means "tokens never expire".
pub fn token_ttl_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::seconds(secs as i64))
}
