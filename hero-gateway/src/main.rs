//! Entry point for the `hero-gateway` HTTP server.

use std::sync::Arc;

use hero_core::seed_data;
use hero_gateway::{config::GatewayConfig, routes::create_router};
use hero_store::{HeroStore, SqliteStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = match SqliteStore::connect(&config.store).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(url = %config.store.url, error = %e, "failed to open database");
            std::process::exit(1);
        }
    };

    if config.seed {
        match store.seed(&seed_data()).await {
            Ok(report) if report.is_empty() => info!("database already populated"),
            Ok(report) => info!(
                heroes = report.heroes,
                powers = report.powers,
                hero_powers = report.hero_powers,
                "database seeded"
            ),
            Err(e) => {
                tracing::error!(error = %e, "failed to seed database");
                std::process::exit(1);
            }
        }
    }

    let app = create_router(Arc::new(store.clone()));

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, "hero-gateway listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    store.close().await;

    if let Err(e) = served {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
