use std::net::SocketAddr;
use std::sync::Arc;
use tenant_dashboard::api::{create_router, AppState};
use tenant_dashboard::infrastructure::{AppConfig, InMemoryConnectionRegistry, MongoConnector};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let fmt_layer = match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => tracing_subscriber::fmt::layer().json().boxed(),
        _ => tracing_subscriber::fmt::layer().boxed(),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=debug,tenant_dashboard=debug,tower_http=debug".into()),
        )
        .with(fmt_layer)
        .init();

    let config = AppConfig::load()?;

    let registry = Arc::new(InMemoryConnectionRegistry::with_default_collection(
        &config.store.default_collection,
    ));
    let connector = Arc::new(MongoConnector::from_config(&config.store));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let seeds = config.connections.clone();
    let state = AppState::new(config, registry, connector);

    let registered = state.connections.register_all(seeds).await?;
    if !registered.is_empty() {
        info!(count = registered.len(), "Pre-registered connections from config");
    }

    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
