use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use privatetls_core::constants::DEFAULT_HTTPS_PORT;
use privatetls_core::{CredentialFactory, TlsCredential};

use crate::error::{Result, ServerError};

/// Generate a default self-signed credential and serve `router` over HTTPS
/// at `address` until the listener stops or fails.
///
/// An empty address binds all interfaces on port 443.
pub async fn start_secure_listener(address: &str, router: Router) -> Result<()> {
    start_secure_listener_with(address, CredentialFactory::default(), router).await
}

/// Like [`start_secure_listener`] with a caller-supplied factory.
pub async fn start_secure_listener_with(
    address: &str,
    factory: CredentialFactory,
    router: Router,
) -> Result<()> {
    let addr = resolve_address(address).await?;
    let credential = generate_credential(factory).await?;
    serve_with_credential(addr, credential, router, Handle::new()).await
}

/// Run credential generation off the async runtime threads.
pub async fn generate_credential(factory: CredentialFactory) -> Result<TlsCredential> {
    let credential = tokio::task::spawn_blocking(move || factory.generate())
        .await
        .map_err(|e| ServerError::Internal(format!("credential task failed: {e}")))??;
    Ok(credential)
}

/// Serve `router` over HTTPS with an existing credential.
///
/// `handle` reports the bound address and drives shutdown.
pub async fn serve_with_credential(
    addr: SocketAddr,
    credential: TlsCredential,
    router: Router,
    handle: Handle,
) -> Result<()> {
    let mut tls_config = (*credential.server_config()).clone();
    tls_config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];
    let rustls_config = RustlsConfig::from_config(Arc::new(tls_config));

    tracing::info!(
        %addr,
        fingerprint = %credential.fingerprint_sha256(),
        "HTTPS listener starting"
    );

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .map_err(|e| ServerError::Io(format!("HTTPS listener error: {e}")))
}

/// Turn a listen address into a socket address.
///
/// Accepts `host:port`, `:port` (all interfaces) and the empty string
/// (all interfaces, port 443). The port may be given as `https`.
pub async fn resolve_address(address: &str) -> Result<SocketAddr> {
    let address = address.trim();
    if address.is_empty() {
        return Ok(SocketAddr::from(([0, 0, 0, 0], DEFAULT_HTTPS_PORT)));
    }

    let candidate = match address.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => address.to_string(),
    };
    let candidate = match candidate.rsplit_once(':') {
        Some((host, "https")) => format!("{host}:{DEFAULT_HTTPS_PORT}"),
        _ => candidate,
    };

    if let Ok(addr) = candidate.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let resolved = tokio::net::lookup_host(candidate.as_str())
        .await
        .map_err(|e| ServerError::Config(format!("cannot resolve listen address {address:?}: {e}")))?
        .next()
        .ok_or_else(|| ServerError::Config(format!("listen address {address:?} resolved to nothing")));
    resolved
}
