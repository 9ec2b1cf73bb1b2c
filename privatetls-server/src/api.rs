use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the default router: health check and certificate details.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/certificate", get(certificate_info))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Simple health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

/// GET /certificate
///
/// Returns the served certificate and its SHA-256 fingerprint so clients
/// can pin it.
async fn certificate_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    axum::Json(json!({
        "certificate_pem": state.certificate_pem,
        "fingerprint_sha256": state.fingerprint_sha256,
        "serial_number": state.serial_number,
        "not_before": state.not_before,
        "not_after": state.not_after,
    }))
}
