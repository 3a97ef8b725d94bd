//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use thermopanel_app::ports::HostClient;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the SSR fragment routes at `/` and a `/health` probe. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG`
/// level using the `tracing` ecosystem.
pub fn build<H: HostClient + 'static>(state: AppState<H>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
