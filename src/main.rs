use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod http;
mod metrics;
mod store;

use config::{Config, StoreBackend};
use domain::customer::CustomerService;
use store::{CustomerStore, InMemoryCustomerStore, OrmCustomerStore, SqlCustomerStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,customer_service=debug")),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("🚀 Starting customer service");

    // === 1. Select the active store (the only place a backend is named) ===
    let store: Arc<dyn CustomerStore> = match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory customer store");
            Arc::new(InMemoryCustomerStore::new())
        }
        StoreBackend::Sql => {
            tracing::info!(url = %config.database_url, "Using SQL customer store");
            Arc::new(SqlCustomerStore::connect(&config.database_url).await?)
        }
        StoreBackend::Orm => {
            tracing::info!(url = %config.database_url, "Using ORM customer store");
            Arc::new(OrmCustomerStore::connect(&config.database_url).await?)
        }
    };

    // === 2. Initialize Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!(
        "📊 Metrics registry created with {} metrics",
        metrics.registry().gather().len()
    );

    // === 3. Serve the customer API ===
    let state = http::AppState {
        service: CustomerService::new(store),
        metrics,
    };

    tracing::info!("Listening on http://{}:{}", config.bind_addr, config.port);
    http::run_server(state, &config.bind_addr, config.port).await?;

    Ok(())
}
