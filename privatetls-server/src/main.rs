use std::sync::Arc;
use std::time::Duration;

use axum_server::Handle;
use tracing_subscriber::EnvFilter;

use privatetls_core::CredentialFactory;
use privatetls_server::api::build_router;
use privatetls_server::config::Config;
use privatetls_server::state::AppState;
use privatetls_server::{generate_credential, resolve_address, serve_with_credential};

#[tokio::main]
async fn main() {
    // Load .env first so RUST_LOG set there reaches the subscriber.
    let dotenv = dotenvy::dotenv();

    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("privatetls_server=info,privatetls_core=info,tower_http=info")
            }),
        )
        .init();

    if let Err(e) = dotenv {
        tracing::debug!("no .env file loaded: {e}");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let factory = CredentialFactory::new(config.credential);
    tracing::info!(
        address = %config.address,
        key_bits = factory.config().key_bits,
        validity_days = factory.config().validity.whole_days(),
        "configuration loaded"
    );

    let addr = match resolve_address(&config.address).await {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "invalid listen address");
            std::process::exit(1);
        }
    };

    // Fresh key and certificate on every start; nothing is read from or written to disk.
    let credential = match generate_credential(factory).await {
        Ok(credential) => credential,
        Err(e) => {
            tracing::error!(error = %e, "failed to generate self-signed credential");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::from_credential(&credential));
    let router = build_router(state);

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
            shutdown.graceful_shutdown(Some(Duration::from_secs(10)));
        }
    });

    if let Err(e) = serve_with_credential(addr, credential, router, handle).await {
        tracing::error!(error = %e, "HTTPS listener failed");
        std::process::exit(1);
    }
}
