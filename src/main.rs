//! StayLink Server
//!
//! Serves the hotel catalog, bookings and owner listings over REST.
//!
//! Usage:
//!   cargo run --bin staylink         # start server (STAYLINK_* env vars, see config.rs)
//!   cargo run --bin staylink-cli -- login -e traveller@example.com -p password123

use tokio::net::TcpListener;
use tracing::info;

use staylink::auth::{TokenKeys, UserDirectory};
use staylink::catalog::Catalog;
use staylink::config::Config;
use staylink::rest::{create_router, AppState};
use staylink::telemetry;
use staylink::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    let _log_guard = telemetry::init(&config);

    info!(addr = %config.addr, "StayLink starting");

    let users = UserDirectory::demo(config.hash_cost)?;
    let keys = TokenKeys::new(config.jwt_secret.as_bytes(), config.token_ttl_secs);
    let catalog = Catalog::default();
    info!(hotels = catalog.all().len(), "sample catalog loaded");

    let app = create_router(AppState::new(catalog, users, keys));

    let listener = TcpListener::bind(config.addr).await?;
    info!("REST API listening on {} (docs at /swagger-ui)", listener.local_addr()?);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down...");
        })
        .await?;

    Ok(())
}
