use std::sync::Arc;

use almacen_api::app::services::AppServices;
use almacen_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    almacen_observability::init();

    let config = Config::from_env()?;

    let services = Arc::new(AppServices::postgres(&config).await?);
    let app = almacen_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
